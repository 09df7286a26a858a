pub(crate) mod arith;
pub mod categorical;
pub mod datetime;
pub mod float64;
pub mod int64;
pub mod interval;
pub mod object;
pub mod period;
pub mod timedelta;

#[cfg(test)]
mod tests;

use crate::{
    dtype::{DType, TimeUnit},
    error::IndexError,
    scalar::{Scalar, compare::order_cmp},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub use categorical::CategoricalArray;
pub use datetime::DatetimeArray;
pub use float64::Float64Array;
pub use int64::Int64Array;
pub use interval::IntervalArray;
pub use object::ObjectArray;
pub use period::PeriodArray;
pub use timedelta::TimedeltaArray;

/// Missing-value sentinel shared by the tick-based encodings.
pub const NULL_TICK: i64 = i64::MIN;

///
/// ArrayKind
///
/// Closed tag set over the concrete backing encodings.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ArrayKind {
    Int64,
    Float64,
    Categorical,
    Datetime,
    Timedelta,
    Period,
    Interval,
    Object,
}

impl ArrayKind {
    /// Concrete type name used in cast and validation diagnostics.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Int64 => "Int64Array",
            Self::Float64 => "Float64Array",
            Self::Categorical => "CategoricalArray",
            Self::Datetime => "DatetimeArray",
            Self::Timedelta => "TimedeltaArray",
            Self::Period => "PeriodArray",
            Self::Interval => "IntervalArray",
            Self::Object => "ObjectArray",
        }
    }
}

///
/// Side
///
/// Insertion-point selection for `searchsorted`.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Side {
    #[default]
    Left,
    Right,
}

///
/// Repeats
///
/// Uniform or per-element repetition counts.
///

#[derive(Clone, Debug)]
pub enum Repeats {
    Uniform(usize),
    PerElement(Vec<usize>),
}

///
/// SearchProbe / SearchPositions
///
/// Scalar probes return one position, sequence probes return many.
///

#[derive(Clone, Debug)]
pub enum SearchProbe {
    One(Scalar),
    Many(Vec<Scalar>),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchPositions {
    One(usize),
    Many(Vec<usize>),
}

///
/// Array
///
/// The backing-array capability surface: a fixed-dtype contiguous sequence
/// with null detection, structural edits, casting, and ordered search.
/// Content is immutable once constructed; every edit returns a new array.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum Array {
    Int64(Int64Array),
    Float64(Float64Array),
    Categorical(CategoricalArray),
    Datetime(DatetimeArray),
    Timedelta(TimedeltaArray),
    Period(PeriodArray),
    Interval(IntervalArray),
    Object(ObjectArray),
}

impl Array {
    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn kind(&self) -> ArrayKind {
        match self {
            Self::Int64(_) => ArrayKind::Int64,
            Self::Float64(_) => ArrayKind::Float64,
            Self::Categorical(_) => ArrayKind::Categorical,
            Self::Datetime(_) => ArrayKind::Datetime,
            Self::Timedelta(_) => ArrayKind::Timedelta,
            Self::Period(_) => ArrayKind::Period,
            Self::Interval(_) => ArrayKind::Interval,
            Self::Object(_) => ArrayKind::Object,
        }
    }

    #[must_use]
    pub fn dtype(&self) -> DType {
        match self {
            Self::Int64(_) => DType::Int64,
            Self::Float64(_) => DType::Float64,
            Self::Categorical(_) => DType::Categorical,
            Self::Datetime(a) => DType::Datetime(a.unit()),
            Self::Timedelta(a) => DType::Timedelta(a.unit()),
            Self::Period(a) => DType::Period(a.freq()),
            Self::Interval(_) => DType::Interval,
            Self::Object(_) => DType::Object,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Int64(a) => a.len(),
            Self::Float64(a) => a.len(),
            Self::Categorical(a) => a.len(),
            Self::Datetime(a) => a.len(),
            Self::Timedelta(a) => a.len(),
            Self::Period(a) => a.len(),
            Self::Interval(a) => a.len(),
            Self::Object(a) => a.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    ///
    /// ELEMENT ACCESS
    ///

    #[must_use]
    pub fn get(&self, loc: usize) -> Option<Scalar> {
        match self {
            Self::Int64(a) => a.get(loc),
            Self::Float64(a) => a.get(loc),
            Self::Categorical(a) => a.get(loc),
            Self::Datetime(a) => a.get(loc),
            Self::Timedelta(a) => a.get(loc),
            Self::Period(a) => a.get(loc),
            Self::Interval(a) => a.get(loc),
            Self::Object(a) => a.get(loc),
        }
    }

    /// Materialize every element as a scalar (the natural generic view).
    #[must_use]
    pub fn to_scalars(&self) -> Vec<Scalar> {
        (0..self.len()).filter_map(|i| self.get(i)).collect()
    }

    ///
    /// NULLS / EQUALITY
    ///

    #[must_use]
    pub fn isna(&self) -> Vec<bool> {
        match self {
            Self::Int64(a) => a.isna(),
            Self::Float64(a) => a.isna(),
            Self::Categorical(a) => a.isna(),
            Self::Datetime(a) => a.isna(),
            Self::Timedelta(a) => a.isna(),
            Self::Period(a) => a.isna(),
            Self::Interval(a) => a.isna(),
            Self::Object(a) => a.isna(),
        }
    }

    /// Structural equality. Nulls compare equal to nulls; variants never
    /// compare equal across kinds.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int64(a), Self::Int64(b)) => a.equals(b),
            (Self::Float64(a), Self::Float64(b)) => a.equals(b),
            (Self::Categorical(a), Self::Categorical(b)) => a.equals(b),
            (Self::Datetime(a), Self::Datetime(b)) => a.equals(b),
            (Self::Timedelta(a), Self::Timedelta(b)) => a.equals(b),
            (Self::Period(a), Self::Period(b)) => a.equals(b),
            (Self::Interval(a), Self::Interval(b)) => a.equals(b),
            (Self::Object(a), Self::Object(b)) => a.equals(b),
            _ => false,
        }
    }

    ///
    /// VALIDATION
    ///

    /// Setitem-style validation: returns the value as this array would hold
    /// it, or `InvalidValue` if the dtype cannot represent it.
    pub fn validate_setitem(&self, value: &Scalar) -> Result<Scalar, IndexError> {
        match self {
            Self::Int64(a) => a.validate(value).map(Scalar::Int),
            Self::Float64(a) => a.validate(value).map(Scalar::Float),
            Self::Categorical(a) => a.validate(value).map(|_| value.clone()),
            Self::Datetime(a) => a.validate(value).map(Scalar::Datetime),
            Self::Timedelta(a) => a.validate(value).map(Scalar::Timedelta),
            Self::Period(a) => {
                let freq = a.freq();
                a.validate(value).map(|ordinal| Scalar::Period { ordinal, freq })
            }
            Self::Interval(a) => a.validate(value).map(|(left, right)| Scalar::Interval {
                left,
                right,
            }),
            Self::Object(_) => Ok(value.clone()),
        }
    }

    ///
    /// STRUCTURAL EDITS
    ///

    /// New array with `item` spliced in at `loc`. `loc` must already be
    /// normalized to `0..=len`. Fails with `InvalidValue` when the dtype
    /// cannot hold `item`; callers recover via the widening fallback.
    pub fn insert(&self, loc: usize, item: &Scalar) -> Result<Self, IndexError> {
        if loc > self.len() {
            return Err(IndexError::out_of_bounds(loc, self.len()));
        }

        match self {
            Self::Int64(a) => a.insert(loc, item).map(Self::Int64),
            Self::Float64(a) => a.insert(loc, item).map(Self::Float64),
            Self::Categorical(a) => a.insert(loc, item).map(Self::Categorical),
            Self::Datetime(a) => a.insert(loc, item).map(Self::Datetime),
            Self::Timedelta(a) => a.insert(loc, item).map(Self::Timedelta),
            Self::Period(a) => a.insert(loc, item).map(Self::Period),
            Self::Interval(a) => a.insert(loc, item).map(Self::Interval),
            Self::Object(a) => a.insert(loc, item).map(Self::Object),
        }
    }

    /// New array with the given positions removed.
    pub fn delete(&self, locs: &[usize]) -> Result<Self, IndexError> {
        for &loc in locs {
            if loc >= self.len() {
                return Err(IndexError::out_of_bounds(loc, self.len()));
            }
        }
        let mut locs = locs.to_vec();
        locs.sort_unstable();
        locs.dedup();

        Ok(match self {
            Self::Int64(a) => Self::Int64(a.delete(&locs)),
            Self::Float64(a) => Self::Float64(a.delete(&locs)),
            Self::Categorical(a) => Self::Categorical(a.delete(&locs)),
            Self::Datetime(a) => Self::Datetime(a.delete(&locs)),
            Self::Timedelta(a) => Self::Timedelta(a.delete(&locs)),
            Self::Period(a) => Self::Period(a.delete(&locs)),
            Self::Interval(a) => Self::Interval(a.delete(&locs)),
            Self::Object(a) => Self::Object(a.delete(&locs)),
        })
    }

    /// New array with elements repeated.
    pub fn repeat(&self, repeats: &Repeats) -> Result<Self, IndexError> {
        if let Repeats::PerElement(counts) = repeats {
            if counts.len() != self.len() {
                return Err(IndexError::invalid(format!(
                    "repeat counts length {} does not match array length {}",
                    counts.len(),
                    self.len()
                )));
            }
        }

        Ok(match self {
            Self::Int64(a) => Self::Int64(a.repeat(repeats)),
            Self::Float64(a) => Self::Float64(a.repeat(repeats)),
            Self::Categorical(a) => Self::Categorical(a.repeat(repeats)),
            Self::Datetime(a) => Self::Datetime(a.repeat(repeats)),
            Self::Timedelta(a) => Self::Timedelta(a.repeat(repeats)),
            Self::Period(a) => Self::Period(a.repeat(repeats)),
            Self::Interval(a) => Self::Interval(a.repeat(repeats)),
            Self::Object(a) => Self::Object(a.repeat(repeats)),
        })
    }

    /// New array holding the elements at `locs`, in order. Dtype parameters
    /// (unit, frequency, category table) carry over unchanged.
    pub fn take(&self, locs: &[usize]) -> Result<Self, IndexError> {
        for &loc in locs {
            if loc >= self.len() {
                return Err(IndexError::out_of_bounds(loc, self.len()));
            }
        }

        Ok(match self {
            Self::Int64(a) => Self::Int64(a.take(locs)),
            Self::Float64(a) => Self::Float64(a.take(locs)),
            Self::Categorical(a) => Self::Categorical(a.take(locs)),
            Self::Datetime(a) => Self::Datetime(a.take(locs)),
            Self::Timedelta(a) => Self::Timedelta(a.take(locs)),
            Self::Period(a) => Self::Period(a.take(locs)),
            Self::Interval(a) => Self::Interval(a.take(locs)),
            Self::Object(a) => Self::Object(a.take(locs)),
        })
    }

    ///
    /// CASTING
    ///

    /// Safe cast to another dtype. Same-dtype casts clone; defined
    /// conversions go through buffer fast paths or the generic scalar
    /// sequence; everything else is `CastFailed` carrying this array's
    /// concrete type name.
    pub fn astype(&self, dtype: &DType) -> Result<Self, IndexError> {
        if *dtype == self.dtype() {
            return Ok(self.clone());
        }
        if dtype.is_non_nano() {
            return Err(IndexError::cast_failed(
                self.kind().type_name(),
                dtype,
                "only nanosecond resolution is supported",
            ));
        }

        // Fixed-width reinterpretations that skip scalar materialization.
        match (self, dtype) {
            (Self::Int64(a), DType::Float64) => {
                return Ok(Self::Float64(a.to_float64()));
            }
            (Self::Int64(a), DType::Datetime(TimeUnit::Nano)) => {
                return Ok(Self::Datetime(DatetimeArray::new(a.values().to_vec())));
            }
            (Self::Int64(a), DType::Timedelta(TimeUnit::Nano)) => {
                return Ok(Self::Timedelta(TimedeltaArray::new(a.values().to_vec())));
            }
            (Self::Float64(a), DType::Int64) => {
                return a.to_int64().map(Self::Int64);
            }
            (Self::Datetime(a), DType::Int64) => {
                return Ok(Self::Int64(Int64Array::new(a.ticks().to_vec())));
            }
            (Self::Timedelta(a), DType::Int64) => {
                return Ok(Self::Int64(Int64Array::new(a.ticks().to_vec())));
            }
            (Self::Period(a), DType::Int64) => {
                return Ok(Self::Int64(Int64Array::new(a.ordinals().to_vec())));
            }
            _ => {}
        }

        Self::from_sequence(&self.to_scalars(), dtype).map_err(|err| {
            IndexError::cast_failed(self.kind().type_name(), dtype, err.to_string())
        })
    }

    /// Build an array of the given dtype from a scalar sequence. This is the
    /// general constructor used by the generic engine strategy and by casts
    /// with no buffer fast path.
    pub fn from_sequence(values: &[Scalar], dtype: &DType) -> Result<Self, IndexError> {
        match dtype {
            DType::Int64 => Int64Array::from_sequence(values).map(Self::Int64),
            DType::Float64 => Float64Array::from_sequence(values).map(Self::Float64),
            DType::Categorical => Ok(Self::Categorical(CategoricalArray::from_values(values))),
            DType::Datetime(TimeUnit::Nano) => {
                DatetimeArray::from_sequence(values).map(Self::Datetime)
            }
            DType::Timedelta(TimeUnit::Nano) => {
                TimedeltaArray::from_sequence(values).map(Self::Timedelta)
            }
            DType::Datetime(_) | DType::Timedelta(_) => Err(IndexError::invalid(format!(
                "cannot construct {dtype} data: only nanosecond resolution is supported"
            ))),
            DType::Period(freq) => PeriodArray::from_sequence(values, *freq).map(Self::Period),
            DType::Interval => IntervalArray::from_sequence(values).map(Self::Interval),
            DType::Object => Ok(Self::Object(ObjectArray::new(values.to_vec()))),
        }
    }

    ///
    /// ORDERED SEARCH
    ///

    /// Insertion positions keeping the array sorted. The array is assumed
    /// sorted by its natural element order (or by `sorter` applied to it);
    /// probes must be order-comparable with the element dtype.
    pub fn searchsorted(
        &self,
        probe: &SearchProbe,
        side: Side,
        sorter: Option<&[usize]>,
    ) -> Result<SearchPositions, IndexError> {
        if let Some(sorter) = sorter {
            if sorter.len() != self.len() {
                return Err(IndexError::invalid(format!(
                    "sorter length {} does not match array length {}",
                    sorter.len(),
                    self.len()
                )));
            }
            if sorter.iter().any(|&i| i >= self.len()) {
                return Err(IndexError::invalid("sorter contains out-of-range positions"));
            }
        }

        match probe {
            SearchProbe::One(value) => self.bisect(value, side, sorter).map(SearchPositions::One),
            SearchProbe::Many(values) => {
                let mut positions = Vec::with_capacity(values.len());
                for value in values {
                    positions.push(self.bisect(value, side, sorter)?);
                }
                Ok(SearchPositions::Many(positions))
            }
        }
    }

    fn bisect(
        &self,
        value: &Scalar,
        side: Side,
        sorter: Option<&[usize]>,
    ) -> Result<usize, IndexError> {
        let at = |i: usize| sorter.map_or(i, |s| s[i]);

        let mut lo = 0;
        let mut hi = self.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let elem = self
                .get(at(mid))
                .ok_or_else(|| IndexError::out_of_bounds(at(mid), self.len()))?;
            let ord = order_cmp(&elem, value).ok_or_else(|| {
                IndexError::invalid(format!(
                    "cannot compare {value} probe with {} data",
                    self.dtype()
                ))
            })?;
            let go_right = match side {
                Side::Left => ord == Ordering::Less,
                Side::Right => ord != Ordering::Greater,
            };
            if go_right {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        Ok(lo)
    }
}

///
/// Buffer edit helpers shared by the concrete encodings.
///

/// Remove the (sorted, deduplicated) positions from a buffer.
pub(crate) fn delete_vec<T: Clone>(values: &[T], locs: &[usize]) -> Vec<T> {
    let mut out = Vec::with_capacity(values.len().saturating_sub(locs.len()));
    let mut next = locs.iter().copied().peekable();
    for (i, value) in values.iter().enumerate() {
        if next.peek() == Some(&i) {
            next.next();
        } else {
            out.push(value.clone());
        }
    }

    out
}

/// Gather buffer elements at the (pre-validated) positions, in order.
pub(crate) fn take_vec<T: Clone>(values: &[T], locs: &[usize]) -> Vec<T> {
    locs.iter().map(|&loc| values[loc].clone()).collect()
}

/// Splice `item` into a buffer at `loc`.
pub(crate) fn insert_vec<T: Clone>(values: &[T], loc: usize, item: T) -> Vec<T> {
    let mut out = Vec::with_capacity(values.len() + 1);
    out.extend_from_slice(&values[..loc]);
    out.push(item);
    out.extend_from_slice(&values[loc..]);

    out
}

/// Repeat buffer elements by uniform or per-element counts.
pub(crate) fn repeat_vec<T: Clone>(values: &[T], repeats: &Repeats) -> Vec<T> {
    match repeats {
        Repeats::Uniform(n) => {
            let mut out = Vec::with_capacity(values.len().saturating_mul(*n));
            for value in values {
                for _ in 0..*n {
                    out.push(value.clone());
                }
            }
            out
        }
        Repeats::PerElement(counts) => {
            let mut out = Vec::with_capacity(counts.iter().copied().fold(0, usize::saturating_add));
            for (value, &n) in values.iter().zip(counts.iter()) {
                for _ in 0..n {
                    out.push(value.clone());
                }
            }
            out
        }
    }
}
