#[cfg(test)]
mod tests;

use crate::{
    array::{Array, ArrayKind, ObjectArray, Repeats, SearchPositions, SearchProbe, Side},
    dtype::DType,
    engine::{self, EngineTarget},
    error::IndexError,
    scalar::Scalar,
};
use std::{
    ops::Range,
    sync::{Arc, OnceLock},
};

///
/// IndexKind
///
/// Closed set of index kinds. All metadata comes from the registry: the
/// accepted backing encoding, the specificity rank used for operator
/// resolution, arithmetic support, and whether the kind is buffer-backed.
///

macro_rules! define_index_kinds {
    (
        @entries
        $((
            $kind:ident,
            name = $name:literal,
            $array:path,
            specificity = $spec:literal,
            supports_arithmetic = $arith:literal,
            buffer_backed = $buf:literal
        )),* $(,)?
    ) => {
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum IndexKind {
            $( $kind, )*
        }

        impl IndexKind {
            /// Public-facing index type name.
            #[must_use]
            pub const fn type_name(self) -> &'static str {
                match self {
                    $( Self::$kind => $name, )*
                }
            }

            /// The one backing encoding this kind accepts.
            #[must_use]
            pub const fn accepts(self) -> ArrayKind {
                match self {
                    $( Self::$kind => $array, )*
                }
            }

            /// Rank used by two-phase operator resolution; higher defers to.
            #[must_use]
            pub const fn specificity(self) -> u8 {
                match self {
                    $( Self::$kind => $spec, )*
                }
            }

            #[must_use]
            pub const fn supports_arithmetic(self) -> bool {
                match self {
                    $( Self::$kind => $arith, )*
                }
            }

            /// Whether the backing encoding exposes a fixed-width buffer to
            /// the engine.
            #[must_use]
            pub const fn buffer_backed(self) -> bool {
                match self {
                    $( Self::$kind => $buf, )*
                }
            }

            /// Most specific kind accepting the given encoding.
            #[must_use]
            pub const fn for_array(array: ArrayKind) -> Self {
                match array {
                    $( $array => Self::$kind, )*
                }
            }
        }
    };
}

index_registry!(define_index_kinds);

///
/// IndexMapper
///
/// Element transform applied through `TypedIndex::map`. `map_index` may
/// handle the whole index in one typed pass; when it cannot, the index
/// falls back to applying `map_element` value by value.
///

pub trait IndexMapper {
    /// Whole-index transform. Return an error to request the element-wise
    /// fallback.
    fn map_index(&self, index: &TypedIndex) -> Result<TypedIndex, IndexError>;

    /// Single-element transform used by the fallback path.
    fn map_element(&self, value: &Scalar) -> Scalar;
}

///
/// TypedIndex
///
/// An immutable, ordered, positionally addressed sequence with a fixed
/// dtype and an optional name. The backing array is shared; every mutation
/// returns a new index and structural edits copy the buffer.
///

#[derive(Clone, Debug)]
pub struct TypedIndex {
    kind: IndexKind,
    data: Arc<Array>,
    name: Option<String>,
    null_mask: OnceLock<Vec<bool>>,
}

impl TypedIndex {
    ///
    /// CONSTRUCTORS
    ///

    /// Wrap an array under an explicit kind, without copying it. Fails when
    /// the kind does not accept the array's encoding.
    pub fn try_new(
        kind: IndexKind,
        data: Array,
        name: Option<String>,
    ) -> Result<Self, IndexError> {
        if kind.accepts() != data.kind() {
            return Err(IndexError::TypeMismatch {
                index_type: kind.type_name(),
                array_type: data.kind().type_name(),
            });
        }

        Ok(Self {
            kind,
            data: Arc::new(data),
            name,
            null_mask: OnceLock::new(),
        })
    }

    /// Wrap an array under the kind inferred from its encoding.
    #[must_use]
    pub fn from_array(data: Array) -> Self {
        Self {
            kind: IndexKind::for_array(data.kind()),
            data: Arc::new(data),
            name: None,
            null_mask: OnceLock::new(),
        }
    }

    /// New index over fresh data, carrying this index's name.
    fn with_data(&self, data: Array) -> Self {
        Self::from_array(data).rename(self.name.clone())
    }

    ///
    /// METADATA
    ///

    #[must_use]
    pub const fn kind(&self) -> IndexKind {
        self.kind
    }

    #[must_use]
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    #[must_use]
    pub fn data(&self) -> &Array {
        &self.data
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// New index sharing this data under a different name.
    #[must_use]
    pub fn rename(&self, name: Option<String>) -> Self {
        Self {
            kind: self.kind,
            data: Arc::clone(&self.data),
            name,
            null_mask: self.null_mask.clone(),
        }
    }

    /// Deep copy: the backing buffer is duplicated, not shared.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            kind: self.kind,
            data: Arc::new((*self.data).clone()),
            name: self.name.clone(),
            null_mask: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    ///
    /// ELEMENT ACCESS
    ///

    pub fn get(&self, loc: usize) -> Result<Scalar, IndexError> {
        self.data
            .get(loc)
            .ok_or_else(|| IndexError::out_of_bounds(loc, self.len()))
    }

    /// New index holding the elements at `locs`, in order.
    pub fn take(&self, locs: &[usize]) -> Result<Self, IndexError> {
        self.data.take(locs).map(|data| self.with_data(data))
    }

    /// Contiguous positional slice.
    pub fn slice(&self, range: Range<usize>) -> Result<Self, IndexError> {
        if range.end > self.len() || range.start > range.end {
            return Err(IndexError::out_of_bounds(range.end, self.len()));
        }
        let locs: Vec<usize> = range.collect();

        self.take(&locs)
    }

    ///
    /// STRUCTURAL EDITS
    ///

    /// New index with `item` inserted at `loc` (negative counts from the
    /// end). When the current dtype rejects the value, the index widens to
    /// the minimal common dtype and retries once.
    pub fn insert(&self, loc: isize, item: &Scalar) -> Result<Self, IndexError> {
        let at = self.normalize_insert_loc(loc)?;

        match self.data.insert(at, item) {
            Ok(data) => Ok(self.with_data(data)),
            Err(err) if err.is_value_rejection() => {
                let common = self.dtype().common_with(item);
                if common == self.dtype() {
                    // Widening cannot make progress; surface the rejection.
                    return Err(err);
                }
                self.astype(&common, false)?.insert(loc, item)
            }
            Err(err) => Err(err),
        }
    }

    /// New index with the given positions removed.
    pub fn delete(&self, locs: &[usize]) -> Result<Self, IndexError> {
        self.data.delete(locs).map(|data| self.with_data(data))
    }

    /// New index with elements repeated. Only the single axis exists, so
    /// `axis` must be absent or 0.
    pub fn repeat(&self, repeats: &Repeats, axis: Option<usize>) -> Result<Self, IndexError> {
        if let Some(axis) = axis {
            if axis != 0 {
                return Err(IndexError::invalid(format!(
                    "axis {axis} does not exist on a one-dimensional index"
                )));
            }
        }

        self.data.repeat(repeats).map(|data| self.with_data(data))
    }

    /// Setitem-style validation against the current dtype.
    pub fn validate_fill_value(&self, value: &Scalar) -> Result<Scalar, IndexError> {
        self.data.validate_setitem(value)
    }

    fn normalize_insert_loc(&self, loc: isize) -> Result<usize, IndexError> {
        let len = isize::try_from(self.len()).unwrap_or(isize::MAX);
        let adjusted = if loc < 0 { loc + len } else { loc };
        if adjusted < 0 || adjusted > len {
            return Err(IndexError::OutOfBounds {
                position: loc,
                len: self.len(),
            });
        }

        usize::try_from(adjusted).map_err(|_| IndexError::OutOfBounds {
            position: loc,
            len: self.len(),
        })
    }

    ///
    /// CASTING
    ///

    /// Cast to another dtype. Same-dtype casts share the buffer unless
    /// `copy` forces a duplicate; date/time-like indexes refuse
    /// non-nanosecond targets outright.
    pub fn astype(&self, dtype: &DType, copy: bool) -> Result<Self, IndexError> {
        if *dtype == self.dtype() {
            return Ok(if copy { self.copy() } else { self.clone() });
        }
        if self.dtype().is_datetime_like() && dtype.is_non_nano() {
            return Err(IndexError::UnsupportedResolution {
                index_type: self.kind.type_name(),
                dtype: dtype.to_string(),
            });
        }

        self.data.astype(dtype).map(|data| self.with_data(data))
    }

    ///
    /// TRANSFORMS
    ///

    /// Apply a mapper. The typed whole-index pass runs first; if the mapper
    /// declines, each element maps individually into an object-backed
    /// result. The name survives either way.
    #[must_use]
    pub fn map<M: IndexMapper>(&self, mapper: &M) -> Self {
        match mapper.map_index(self) {
            Ok(index) => index.rename(self.name.clone()),
            Err(_) => {
                let values: Vec<Scalar> = self
                    .data
                    .to_scalars()
                    .iter()
                    .map(|v| mapper.map_element(v))
                    .collect();
                self.with_data(Array::Object(ObjectArray::new(values)))
            }
        }
    }

    ///
    /// NULLS / EQUALITY
    ///

    /// Per-position missing-value mask, computed once and cached.
    pub fn isna(&self) -> &[bool] {
        self.null_mask.get_or_init(|| self.data.isna())
    }

    /// Value equality. Indexes of different kinds are never equal; indexes
    /// sharing the same backing buffer are equal without comparison.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }

        self.data.equals(&other.data)
    }

    /// Whether two indexes share the same backing buffer.
    #[must_use]
    pub fn shares_data(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    ///
    /// ORDERED SEARCH
    ///

    /// Insertion positions keeping the index sorted.
    pub fn searchsorted(
        &self,
        probe: &SearchProbe,
        side: Side,
        sorter: Option<&[usize]>,
    ) -> Result<SearchPositions, IndexError> {
        self.data.searchsorted(probe, side, sorter)
    }

    ///
    /// ENGINE INTEROP
    ///

    /// Engine-facing view of the backing array.
    #[must_use]
    pub fn engine_target(&self) -> EngineTarget<'_> {
        engine::engine_target(&self.data)
    }

    /// Rebuild an index of this kind from an engine target, carrying this
    /// index's dtype parameters and name.
    #[must_use]
    pub fn from_join_target(&self, target: &EngineTarget<'_>) -> Self {
        self.with_data(engine::from_join_target(&self.data, target))
    }
}
