use crate::{
    array::{Int64Array, Repeats, delete_vec, insert_vec, repeat_vec, take_vec},
    error::IndexError,
    scalar::Scalar,
};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// Float64Array
///
/// Dense 64-bit floats. NaN is the missing value, so `equals` treats NaN as
/// equal to NaN and no derived `PartialEq` is exposed.
///

#[derive(Clone, Debug, Deref, Deserialize, IntoIterator, Serialize)]
pub struct Float64Array(Vec<f64>);

impl Float64Array {
    #[must_use]
    pub const fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, loc: usize) -> Option<Scalar> {
        self.0.get(loc).map(|&v| Scalar::Float(v))
    }

    #[must_use]
    pub fn isna(&self) -> Vec<bool> {
        self.0.iter().map(|v| v.is_nan()).collect()
    }

    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }

    /// Accepts ints, floats, and null (held as NaN).
    pub fn validate(&self, value: &Scalar) -> Result<f64, IndexError> {
        match value {
            Scalar::Null => Ok(f64::NAN),
            _ => value.to_f64().ok_or_else(|| {
                IndexError::invalid(format!("value {value} cannot be held in float64 data"))
            }),
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

    /// Narrowing cast to int64. Truncates toward zero; non-finite values
    /// cannot be represented and fail.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_int64(&self) -> Result<Int64Array, IndexError> {
        let mut out = Vec::with_capacity(self.0.len());
        for &v in &self.0 {
            if !v.is_finite() {
                return Err(IndexError::cast_failed(
                    "Float64Array",
                    "int64",
                    "cannot convert non-finite values",
                ));
            }
            out.push(v as i64);
        }

        Ok(Int64Array::new(out))
    }

    pub fn from_sequence(values: &[Scalar]) -> Result<Self, IndexError> {
        let mut out = Vec::with_capacity(values.len());
        for value in values {
            match value {
                Scalar::Null => out.push(f64::NAN),
                _ => out.push(value.to_f64().ok_or_else(|| {
                    IndexError::invalid(format!("value {value} cannot be held in float64 data"))
                })?),
            }
        }

        Ok(Self(out))
    }
}
