use crate::scalar::Scalar;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// TimeUnit
///
/// Resolution parameter for date/time-like dtypes. Only nanoseconds are
/// accepted on the cast path; the other resolutions exist so a rejected
/// target dtype can still be named in diagnostics.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum TimeUnit {
    #[display("s")]
    Second,
    #[display("ms")]
    Milli,
    #[display("us")]
    Micro,
    #[display("ns")]
    Nano,
}

///
/// Freq
///
/// Period frequency. Ordinals count whole spans of the frequency from the
/// epoch; cross-frequency arithmetic is undefined.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum Freq {
    #[display("D")]
    Day,
    #[display("M")]
    Month,
    #[display("Q")]
    Quarter,
    #[display("Y")]
    Year,
}

///
/// DType
///
/// The closed dtype set carried by backing arrays and indexes.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DType {
    Int64,
    Float64,
    Categorical,
    Datetime(TimeUnit),
    Timedelta(TimeUnit),
    Period(Freq),
    Interval,
    Object,
}

impl DType {
    /// Minimal common dtype that can represent both the existing data and
    /// `item`. Used by the insert-widening fallback: numeric pairs widen to
    /// float64, everything else falls back to object.
    #[must_use]
    pub fn common_with(&self, item: &Scalar) -> Self {
        match (self, item) {
            // int64 has no null representation; every other dtype holds
            // nulls natively.
            (Self::Int64, Scalar::Null) => Self::Float64,
            (_, Scalar::Null) => self.clone(),
            (Self::Int64, Scalar::Int(_)) => Self::Int64,
            (Self::Int64 | Self::Float64, Scalar::Int(_) | Scalar::Float(_)) => Self::Float64,
            (Self::Datetime(unit), Scalar::Datetime(_)) => Self::Datetime(*unit),
            (Self::Timedelta(unit), Scalar::Timedelta(_)) => Self::Timedelta(*unit),
            (Self::Period(freq), Scalar::Period { freq: other, .. }) if freq == other => {
                Self::Period(*freq)
            }
            (Self::Interval, Scalar::Interval { .. }) => Self::Interval,
            _ => Self::Object,
        }
    }

    /// Returns true for the tick-based date/time-like dtypes.
    #[must_use]
    pub const fn is_datetime_like(&self) -> bool {
        matches!(self, Self::Datetime(_) | Self::Timedelta(_))
    }

    /// Returns true for a date/time-like dtype parameterized away from the
    /// canonical nanosecond resolution.
    #[must_use]
    pub const fn is_non_nano(&self) -> bool {
        match self {
            Self::Datetime(unit) | Self::Timedelta(unit) => !matches!(unit, TimeUnit::Nano),
            _ => false,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int64 => write!(f, "int64"),
            Self::Float64 => write!(f, "float64"),
            Self::Categorical => write!(f, "category"),
            Self::Datetime(unit) => write!(f, "datetime64[{unit}]"),
            Self::Timedelta(unit) => write!(f, "timedelta64[{unit}]"),
            Self::Period(freq) => write!(f, "period[{freq}]"),
            Self::Interval => write!(f, "interval"),
            Self::Object => write!(f, "object"),
        }
    }
}

///
/// TESTS
///
