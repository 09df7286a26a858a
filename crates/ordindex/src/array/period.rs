use crate::{
    array::{NULL_TICK, Repeats, delete_vec, insert_vec, repeat_vec, take_vec},
    dtype::Freq,
    error::IndexError,
    scalar::Scalar,
};
use serde::{Deserialize, Serialize};

///
/// PeriodArray
///
/// Whole spans of a single frequency, stored as i64 ordinals from the epoch.
/// Every element shares the array's frequency; `NULL_TICK` marks missing.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PeriodArray {
    ordinals: Vec<i64>,
    freq: Freq,
}

impl PeriodArray {
    #[must_use]
    pub const fn new(ordinals: Vec<i64>, freq: Freq) -> Self {
        Self { ordinals, freq }
    }

    #[must_use]
    pub fn ordinals(&self) -> &[i64] {
        &self.ordinals
    }

    #[must_use]
    pub const fn freq(&self) -> Freq {
        self.freq
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    #[must_use]
    pub fn get(&self, loc: usize) -> Option<Scalar> {
        self.ordinals.get(loc).map(|&o| {
            if o == NULL_TICK {
                Scalar::Null
            } else {
                Scalar::Period {
                    ordinal: o,
                    freq: self.freq,
                }
            }
        })
    }

    #[must_use]
    pub fn isna(&self) -> Vec<bool> {
        self.ordinals.iter().map(|&o| o == NULL_TICK).collect()
    }

    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.freq == other.freq && self.ordinals == other.ordinals
    }

    /// Accepts periods of the array's frequency and null.
    pub fn validate(&self, value: &Scalar) -> Result<i64, IndexError> {
        match value {
            Scalar::Period { ordinal, freq } if *freq == self.freq => Ok(*ordinal),
            Scalar::Null => Ok(NULL_TICK),
            _ => Err(IndexError::invalid(format!(
                "value {value} cannot be held in period[{}] data",
                self.freq
            ))),
        }
    }

    pub fn insert(&self, loc: usize, item: &Scalar) -> Result<Self, IndexError> {
        let ordinal = self.validate(item)?;

        Ok(Self {
            ordinals: insert_vec(&self.ordinals, loc, ordinal),
            freq: self.freq,
        })
    }

    #[must_use]
    pub fn delete(&self, locs: &[usize]) -> Self {
        Self {
            ordinals: delete_vec(&self.ordinals, locs),
            freq: self.freq,
        }
    }

    #[must_use]
    pub fn repeat(&self, repeats: &Repeats) -> Self {
        Self {
            ordinals: repeat_vec(&self.ordinals, repeats),
            freq: self.freq,
        }
    }

    #[must_use]
    pub fn take(&self, locs: &[usize]) -> Self {
        Self {
            ordinals: take_vec(&self.ordinals, locs),
            freq: self.freq,
        }
    }

    pub fn from_sequence(values: &[Scalar], freq: Freq) -> Result<Self, IndexError> {
        let mut ordinals = Vec::with_capacity(values.len());
        for value in values {
            match value {
                Scalar::Period { ordinal, freq: f } if *f == freq => ordinals.push(*ordinal),
                Scalar::Null => ordinals.push(NULL_TICK),
                _ => {
                    return Err(IndexError::invalid(format!(
                        "value {value} cannot be held in period[{freq}] data"
                    )));
                }
            }
        }

        Ok(Self::new(ordinals, freq))
    }
}
