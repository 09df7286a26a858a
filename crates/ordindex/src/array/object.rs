use crate::{
    array::{Repeats, delete_vec, insert_vec, repeat_vec, take_vec},
    error::IndexError,
    scalar::Scalar,
};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// ObjectArray
///
/// Heterogeneous scalar storage. Accepts any value, so it is the terminal
/// target of every widening cast.
///

#[derive(Clone, Debug, Deref, Deserialize, IntoIterator, PartialEq, Serialize)]
pub struct ObjectArray(Vec<Scalar>);

impl ObjectArray {
    #[must_use]
    pub const fn new(values: Vec<Scalar>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn values(&self) -> &[Scalar] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, loc: usize) -> Option<Scalar> {
        self.0.get(loc).cloned()
    }

    #[must_use]
    pub fn isna(&self) -> Vec<bool> {
        self.0.iter().map(Scalar::is_null).collect()
    }

    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| a == b || (a.is_null() && b.is_null()))
    }

    pub fn insert(&self, loc: usize, item: &Scalar) -> Result<Self, IndexError> {
        Ok(Self(insert_vec(&self.0, loc, item.clone())))
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
}
