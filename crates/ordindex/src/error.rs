use thiserror::Error as ThisError;

///
/// IndexError
///
/// Failure taxonomy for index construction, structural edits, casting, and
/// operator dispatch. Contract violations (engine-target width mismatches)
/// are not represented here; they fail fast by panicking.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum IndexError {
    /// Construction with an array variant the index kind does not accept.
    #[error("cannot construct {index_type} from {array_type} data")]
    TypeMismatch {
        index_type: &'static str,
        array_type: &'static str,
    },

    /// A cast the backing array cannot perform. Carries the concrete array
    /// type name for diagnostics.
    #[error("cannot cast {array_type} to {dtype}: {message}")]
    CastFailed {
        array_type: &'static str,
        dtype: String,
        message: String,
    },

    /// Date/time-like casts accept only the canonical nanosecond resolution.
    #[error("cannot cast {index_type} to non-nanosecond dtype {dtype}")]
    UnsupportedResolution {
        index_type: &'static str,
        dtype: String,
    },

    /// Arithmetic attempted on an index kind whose backing array has no such
    /// operator.
    #[error("cannot perform {op} with this index type: {index_type}")]
    UnsupportedOperation {
        op: &'static str,
        index_type: &'static str,
    },

    #[error("position {position} out of bounds for index of length {len}")]
    OutOfBounds { position: isize, len: usize },

    /// Invalid fill/insert value under the current dtype, undefined operand
    /// combination, or broadcast length mismatch.
    #[error("invalid value: {message}")]
    InvalidValue { message: String },
}

impl IndexError {
    /// Construct an `InvalidValue` error from any message.
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: message.into(),
        }
    }

    /// Construct an out-of-bounds error for a non-negative position.
    pub(crate) fn out_of_bounds(position: usize, len: usize) -> Self {
        Self::OutOfBounds {
            position: isize::try_from(position).unwrap_or(isize::MAX),
            len,
        }
    }

    /// Construct a cast failure carrying the concrete array type name.
    pub(crate) fn cast_failed(
        array_type: &'static str,
        dtype: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        Self::CastFailed {
            array_type,
            dtype: dtype.to_string(),
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_value_rejection(&self) -> bool {
        matches!(self, Self::InvalidValue { .. })
    }
}
