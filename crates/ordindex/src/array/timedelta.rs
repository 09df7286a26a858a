use crate::{
    array::{NULL_TICK, Repeats, delete_vec, insert_vec, repeat_vec, take_vec},
    dtype::TimeUnit,
    error::IndexError,
    scalar::Scalar,
};
use serde::{Deserialize, Serialize};

///
/// TimedeltaArray
///
/// Signed durations as i64 ticks, `NULL_TICK` for missing.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TimedeltaArray {
    ticks: Vec<i64>,
    unit: TimeUnit,
}

impl TimedeltaArray {
    #[must_use]
    pub const fn new(ticks: Vec<i64>) -> Self {
        Self {
            ticks,
            unit: TimeUnit::Nano,
        }
    }

    #[must_use]
    pub fn ticks(&self) -> &[i64] {
        &self.ticks
    }

    #[must_use]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    #[must_use]
    pub fn get(&self, loc: usize) -> Option<Scalar> {
        self.ticks.get(loc).map(|&t| {
            if t == NULL_TICK {
                Scalar::Null
            } else {
                Scalar::Timedelta(t)
            }
        })
    }

    #[must_use]
    pub fn isna(&self) -> Vec<bool> {
        self.ticks.iter().map(|&t| t == NULL_TICK).collect()
    }

    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.unit == other.unit && self.ticks == other.ticks
    }

    /// Accepts timedelta scalars and null.
    pub fn validate(&self, value: &Scalar) -> Result<i64, IndexError> {
        match value {
            Scalar::Timedelta(t) => Ok(*t),
            Scalar::Null => Ok(NULL_TICK),
            _ => Err(IndexError::invalid(format!(
                "value {value} cannot be held in timedelta64[{}] data",
                self.unit
            ))),
        }
    }

    pub fn insert(&self, loc: usize, item: &Scalar) -> Result<Self, IndexError> {
        let tick = self.validate(item)?;

        Ok(Self {
            ticks: insert_vec(&self.ticks, loc, tick),
            unit: self.unit,
        })
    }

    #[must_use]
    pub fn delete(&self, locs: &[usize]) -> Self {
        Self {
            ticks: delete_vec(&self.ticks, locs),
            unit: self.unit,
        }
    }

    #[must_use]
    pub fn repeat(&self, repeats: &Repeats) -> Self {
        Self {
            ticks: repeat_vec(&self.ticks, repeats),
            unit: self.unit,
        }
    }

    #[must_use]
    pub fn take(&self, locs: &[usize]) -> Self {
        Self {
            ticks: take_vec(&self.ticks, locs),
            unit: self.unit,
        }
    }

    pub fn from_sequence(values: &[Scalar]) -> Result<Self, IndexError> {
        let mut ticks = Vec::with_capacity(values.len());
        for value in values {
            match value {
                Scalar::Timedelta(t) => ticks.push(*t),
                Scalar::Null => ticks.push(NULL_TICK),
                _ => {
                    return Err(IndexError::invalid(format!(
                        "value {value} cannot be held in timedelta64[ns] data"
                    )));
                }
            }
        }

        Ok(Self::new(ticks))
    }
}
