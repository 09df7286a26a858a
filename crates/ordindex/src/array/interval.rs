use crate::{
    array::{Repeats, delete_vec, insert_vec, repeat_vec, take_vec},
    error::IndexError,
    scalar::Scalar,
};
use serde::{Deserialize, Serialize};

///
/// IntervalArray
///
/// Right-closed float intervals stored as parallel left/right buffers.
/// A NaN pair marks a missing interval.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IntervalArray {
    left: Vec<f64>,
    right: Vec<f64>,
}

impl IntervalArray {
    /// Parallel buffers must be the same length and each bound pair ordered.
    pub fn new(left: Vec<f64>, right: Vec<f64>) -> Result<Self, IndexError> {
        if left.len() != right.len() {
            return Err(IndexError::invalid(format!(
                "left buffer length {} does not match right buffer length {}",
                left.len(),
                right.len()
            )));
        }
        for (l, r) in left.iter().zip(right.iter()) {
            if l > r {
                return Err(IndexError::invalid(format!(
                    "interval left bound {l} exceeds right bound {r}"
                )));
            }
        }

        Ok(Self { left, right })
    }

    #[must_use]
    pub fn left(&self) -> &[f64] {
        &self.left
    }

    #[must_use]
    pub fn right(&self) -> &[f64] {
        &self.right
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    #[must_use]
    pub fn get(&self, loc: usize) -> Option<Scalar> {
        let (&l, &r) = (self.left.get(loc)?, self.right.get(loc)?);
        if l.is_nan() && r.is_nan() {
            Some(Scalar::Null)
        } else {
            Some(Scalar::Interval { left: l, right: r })
        }
    }

    #[must_use]
    pub fn isna(&self) -> Vec<bool> {
        self.left
            .iter()
            .zip(self.right.iter())
            .map(|(l, r)| l.is_nan() && r.is_nan())
            .collect()
    }

    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        let eq = |a: &[f64], b: &[f64]| {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
        };

        eq(&self.left, &other.left) && eq(&self.right, &other.right)
    }

    /// Accepts ordered intervals and null.
    pub fn validate(&self, value: &Scalar) -> Result<(f64, f64), IndexError> {
        match value {
            Scalar::Interval { left, right } if left <= right => Ok((*left, *right)),
            Scalar::Interval { left, right } => Err(IndexError::invalid(format!(
                "interval left bound {left} exceeds right bound {right}"
            ))),
            Scalar::Null => Ok((f64::NAN, f64::NAN)),
            _ => Err(IndexError::invalid(format!(
                "value {value} cannot be held in interval data"
            ))),
        }
    }

    pub fn insert(&self, loc: usize, item: &Scalar) -> Result<Self, IndexError> {
        let (l, r) = self.validate(item)?;

        Ok(Self {
            left: insert_vec(&self.left, loc, l),
            right: insert_vec(&self.right, loc, r),
        })
    }

    #[must_use]
    pub fn delete(&self, locs: &[usize]) -> Self {
        Self {
            left: delete_vec(&self.left, locs),
            right: delete_vec(&self.right, locs),
        }
    }

    #[must_use]
    pub fn repeat(&self, repeats: &Repeats) -> Self {
        Self {
            left: repeat_vec(&self.left, repeats),
            right: repeat_vec(&self.right, repeats),
        }
    }

    #[must_use]
    pub fn take(&self, locs: &[usize]) -> Self {
        Self {
            left: take_vec(&self.left, locs),
            right: take_vec(&self.right, locs),
        }
    }

    pub fn from_sequence(values: &[Scalar]) -> Result<Self, IndexError> {
        let mut left = Vec::with_capacity(values.len());
        let mut right = Vec::with_capacity(values.len());
        for value in values {
            match value {
                Scalar::Interval { left: l, right: r } if l <= r => {
                    left.push(*l);
                    right.push(*r);
                }
                Scalar::Null => {
                    left.push(f64::NAN);
                    right.push(f64::NAN);
                }
                _ => {
                    return Err(IndexError::invalid(format!(
                        "value {value} cannot be held in interval data"
                    )));
                }
            }
        }

        Ok(Self { left, right })
    }
}
