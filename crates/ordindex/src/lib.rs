//! Typed, array-backed ordered index: a closed set of array encodings behind
//! one capability surface, an engine-target adapter for binary search and
//! joins, and operator dispatch with value semantics.

#[macro_use]
pub(crate) mod registry;

// public exports are one module level down
pub mod array;
pub mod dtype;
pub mod engine;
pub mod error;
pub mod index;
pub mod ops;
pub mod scalar;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, adapters, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        array::{Array, ArrayKind, Side},
        dtype::DType,
        index::{IndexKind, TypedIndex},
        scalar::Scalar,
    };
}
