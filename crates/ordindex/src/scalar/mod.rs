pub(crate) mod compare;

#[cfg(test)]
mod tests;

use crate::{
    dtype::{DType, Freq, TimeUnit},
    error::IndexError,
};
use chrono::DateTime;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

const NANOS_PER_SEC: i64 = 1_000_000_000;

///
/// Scalar
///
/// Single element of a backing array. Date/time-like variants carry
/// nanosecond ticks; `Null` is the only cross-dtype missing value, with
/// float NaN treated as missing where floats are concerned.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Nanosecond ticks since the Unix epoch, UTC.
    Datetime(i64),
    /// Nanosecond ticks.
    Timedelta(i64),
    Period {
        ordinal: i64,
        freq: Freq,
    },
    /// Closed on the right.
    Interval {
        left: f64,
        right: f64,
    },
    Null,
}

impl Scalar {
    /// Parse an RFC-3339 timestamp into a nanosecond datetime scalar.
    pub fn datetime_from_rfc3339(s: &str) -> Result<Self, IndexError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| IndexError::invalid(format!("datetime parse error: {e}")))?;
        let ticks = dt
            .timestamp_nanos_opt()
            .ok_or_else(|| IndexError::invalid("datetime out of nanosecond range"))?;

        Ok(Self::Datetime(ticks))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float(f) => f.is_nan(),
            Self::Interval { left, right } => left.is_nan() && right.is_nan(),
            _ => false,
        }
    }

    /// Dtype this scalar naturally belongs to, or `None` for `Null`.
    #[must_use]
    pub const fn dtype_hint(&self) -> Option<DType> {
        match self {
            Self::Int(_) => Some(DType::Int64),
            Self::Float(_) => Some(DType::Float64),
            Self::Datetime(_) => Some(DType::Datetime(TimeUnit::Nano)),
            Self::Timedelta(_) => Some(DType::Timedelta(TimeUnit::Nano)),
            Self::Period { freq, .. } => Some(DType::Period(*freq)),
            Self::Interval { .. } => Some(DType::Interval),
            Self::Bool(_) | Self::Text(_) => Some(DType::Object),
            Self::Null => None,
        }
    }

    /// Lossless-enough float view for numeric coercion. Integers convert via
    /// `ToPrimitive` so the conversion site stays explicit.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => i.to_f64(),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Integer view; accepts integral floats.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => f.to_i64(),
            _ => None,
        }
    }
}

macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Scalar {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool   => Bool,
    i8     => Int,
    i16    => Int,
    i32    => Int,
    i64    => Int,
    f32    => Float,
    f64    => Float,
    &str   => Text,
    String => Text,
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Datetime(ticks) => match DateTime::from_timestamp(
                ticks.div_euclid(NANOS_PER_SEC),
                u32::try_from(ticks.rem_euclid(NANOS_PER_SEC)).unwrap_or(0),
            ) {
                Some(dt) => write!(f, "{}", dt.to_rfc3339()),
                None => write!(f, "{ticks}ns"),
            },
            Self::Timedelta(ticks) => write!(f, "{ticks}ns"),
            Self::Period { ordinal, freq } => write!(f, "{ordinal}[{freq}]"),
            Self::Interval { left, right } => write!(f, "({left}, {right}]"),
            Self::Null => write!(f, "null"),
        }
    }
}
