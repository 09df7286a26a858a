use crate::{
    array::{Repeats, delete_vec, insert_vec, repeat_vec, take_vec},
    error::IndexError,
    scalar::{Scalar, compare::canonical_cmp},
};
use serde::{Deserialize, Serialize};

/// Code reserved for missing values.
pub const NULL_CODE: i32 = -1;

///
/// CategoricalArray
///
/// Dictionary encoding: i32 codes into a sorted, distinct category table.
/// Inserting a value outside the table is a value rejection, which the
/// index layer turns into an object widening.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CategoricalArray {
    codes: Vec<i32>,
    categories: Vec<Scalar>,
}

impl CategoricalArray {
    /// Build from raw codes against an explicit category table.
    pub fn from_codes(codes: Vec<i32>, categories: Vec<Scalar>) -> Result<Self, IndexError> {
        let max = i32::try_from(categories.len())
            .map_err(|_| IndexError::invalid("category table too large"))?;
        for &code in &codes {
            if code < NULL_CODE || code >= max {
                return Err(IndexError::invalid(format!(
                    "code {code} out of range for {} categories",
                    categories.len()
                )));
            }
        }

        Ok(Self { codes, categories })
    }

    /// Build from values, deriving the category table from the distinct
    /// non-null values in canonical order.
    #[must_use]
    pub fn from_values(values: &[Scalar]) -> Self {
        let mut categories: Vec<Scalar> =
            values.iter().filter(|v| !v.is_null()).cloned().collect();
        categories.sort_by(|a, b| canonical_cmp(a, b));
        categories.dedup();

        let codes = values
            .iter()
            .map(|v| {
                if v.is_null() {
                    NULL_CODE
                } else {
                    // Position lookup cannot fail: the table was built from
                    // these exact values.
                    categories
                        .iter()
                        .position(|c| c == v)
                        .and_then(|i| i32::try_from(i).ok())
                        .unwrap_or(NULL_CODE)
                }
            })
            .collect();

        Self { codes, categories }
    }

    #[must_use]
    pub fn codes(&self) -> &[i32] {
        &self.codes
    }

    #[must_use]
    pub fn categories(&self) -> &[Scalar] {
        &self.categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    #[must_use]
    pub fn get(&self, loc: usize) -> Option<Scalar> {
        self.codes.get(loc).map(|&code| {
            usize::try_from(code)
                .ok()
                .and_then(|i| self.categories.get(i))
                .cloned()
                .unwrap_or(Scalar::Null)
        })
    }

    #[must_use]
    pub fn isna(&self) -> Vec<bool> {
        self.codes.iter().map(|&c| c == NULL_CODE).collect()
    }

    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.categories == other.categories && self.codes == other.codes
    }

    /// Accepts known categories and null; anything else is a value
    /// rejection.
    pub fn validate(&self, value: &Scalar) -> Result<i32, IndexError> {
        if value.is_null() {
            return Ok(NULL_CODE);
        }
        self.categories
            .iter()
            .position(|c| c == value)
            .and_then(|i| i32::try_from(i).ok())
            .ok_or_else(|| IndexError::invalid(format!("value {value} is not a known category")))
    }

    pub fn insert(&self, loc: usize, item: &Scalar) -> Result<Self, IndexError> {
        let code = self.validate(item)?;

        Ok(Self {
            codes: insert_vec(&self.codes, loc, code),
            categories: self.categories.clone(),
        })
    }

    #[must_use]
    pub fn delete(&self, locs: &[usize]) -> Self {
        Self {
            codes: delete_vec(&self.codes, locs),
            categories: self.categories.clone(),
        }
    }

    #[must_use]
    pub fn repeat(&self, repeats: &Repeats) -> Self {
        Self {
            codes: repeat_vec(&self.codes, repeats),
            categories: self.categories.clone(),
        }
    }

    /// Takes codes only; the category table is preserved even when some
    /// categories no longer appear in the selection.
    #[must_use]
    pub fn take(&self, locs: &[usize]) -> Self {
        Self {
            codes: take_vec(&self.codes, locs),
            categories: self.categories.clone(),
        }
    }
}
