use crate::{
    array::{Float64Array, Repeats, delete_vec, insert_vec, repeat_vec, take_vec},
    error::IndexError,
    scalar::Scalar,
};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// Int64Array
///
/// Dense signed 64-bit integers. Has no null representation; missing values
/// force a widening cast at the call site.
///

#[derive(Clone, Debug, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize)]
pub struct Int64Array(Vec<i64>);

impl Int64Array {
    #[must_use]
    pub const fn new(values: Vec<i64>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, loc: usize) -> Option<Scalar> {
        self.0.get(loc).map(|&v| Scalar::Int(v))
    }

    #[must_use]
    pub fn isna(&self) -> Vec<bool> {
        vec![false; self.0.len()]
    }

    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    /// Accepts integer scalars only.
    pub fn validate(&self, value: &Scalar) -> Result<i64, IndexError> {
        match value {
            Scalar::Int(i) => Ok(*i),
            _ => Err(IndexError::invalid(format!(
                "value {value} cannot be held in int64 data"
            ))),
        }
    }

    pub fn insert(&self, loc: usize, item: &Scalar) -> Result<Self, IndexError> {
        let value = self.validate(item)?;

        Ok(Self(insert_vec(&self.0, loc, value)))
    }

    #[must_use]
    pub fn delete(&self, locs: &[usize]) -> Self {
        Self(delete_vec(&self.0, locs))
    }

    #[must_use]
    pub fn repeat(&self, repeats: &Repeats) -> Self {
        Self(repeat_vec(&self.0, repeats))
    }

    #[must_use]
    pub fn take(&self, locs: &[usize]) -> Self {
        Self(take_vec(&self.0, locs))
    }

    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn to_float64(&self) -> Float64Array {
        Float64Array::new(self.0.iter().map(|&v| v as f64).collect())
    }

    pub fn from_sequence(values: &[Scalar]) -> Result<Self, IndexError> {
        let mut out = Vec::with_capacity(values.len());
        for value in values {
            out.push(value.to_i64().ok_or_else(|| {
                IndexError::invalid(format!("value {value} cannot be held in int64 data"))
            })?);
        }

        Ok(Self(out))
    }
}
