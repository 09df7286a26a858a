use crate::{
    array::{
        Array, CategoricalArray, DatetimeArray, Float64Array, Int64Array, ObjectArray,
        PeriodArray, TimedeltaArray,
    },
    scalar::Scalar,
};
use std::borrow::Cow;

///
/// EngineTarget
///
/// Engine-facing view of a backing array. Buffer-backed encodings expose
/// their fixed-width buffers without copying; the rest fall back to the
/// generic scalar view. Borrowed targets share the source buffer, owned
/// targets were materialized for the engine.
///

#[derive(Clone, Debug)]
pub enum EngineTarget<'a> {
    /// Dictionary codes of a categorical encoding.
    Codes(Cow<'a, [i32]>),
    /// i64 ticks or ordinals of a tick-based encoding.
    Ticks(Cow<'a, [i64]>),
    /// Raw float values.
    Values(Cow<'a, [f64]>),
    /// Generic scalar view.
    Scalars(Cow<'a, [Scalar]>),
}

impl EngineTarget<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Codes(v) => v.len(),
            Self::Ticks(v) => v.len(),
            Self::Values(v) => v.len(),
            Self::Scalars(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extract the engine-facing representation of an array. Buffer-backed
/// kinds borrow; intervals have no single buffer and materialize scalars.
#[must_use]
pub fn engine_target(array: &Array) -> EngineTarget<'_> {
    match array {
        Array::Int64(a) => EngineTarget::Ticks(Cow::Borrowed(a.values())),
        Array::Float64(a) => EngineTarget::Values(Cow::Borrowed(a.values())),
        Array::Categorical(a) => EngineTarget::Codes(Cow::Borrowed(a.codes())),
        Array::Datetime(a) => EngineTarget::Ticks(Cow::Borrowed(a.ticks())),
        Array::Timedelta(a) => EngineTarget::Ticks(Cow::Borrowed(a.ticks())),
        Array::Period(a) => EngineTarget::Ticks(Cow::Borrowed(a.ordinals())),
        Array::Interval(a) => EngineTarget::Scalars(Cow::Owned(
            (0..a.len()).filter_map(|i| a.get(i)).collect(),
        )),
        Array::Object(a) => EngineTarget::Scalars(Cow::Borrowed(a.values())),
    }
}

/// Rebuild an array from an engine target, carrying the dtype parameters of
/// `prototype` (unit, frequency, category table). The target must have come
/// from an array of the same kind; a mismatched shape is a caller bug, not a
/// recoverable state.
#[must_use]
pub fn from_join_target(prototype: &Array, target: &EngineTarget<'_>) -> Array {
    match (prototype, target) {
        (Array::Int64(_), EngineTarget::Ticks(ticks)) => {
            Array::Int64(Int64Array::new(ticks.to_vec()))
        }
        (Array::Float64(_), EngineTarget::Values(values)) => {
            Array::Float64(Float64Array::new(values.to_vec()))
        }
        (Array::Categorical(proto), EngineTarget::Codes(codes)) => {
            match CategoricalArray::from_codes(codes.to_vec(), proto.categories().to_vec()) {
                Ok(a) => Array::Categorical(a),
                Err(err) => panic!("join target carries invalid codes: {err}"),
            }
        }
        (Array::Datetime(_), EngineTarget::Ticks(ticks)) => {
            Array::Datetime(DatetimeArray::new(ticks.to_vec()))
        }
        (Array::Timedelta(_), EngineTarget::Ticks(ticks)) => {
            Array::Timedelta(TimedeltaArray::new(ticks.to_vec()))
        }
        (Array::Period(proto), EngineTarget::Ticks(ordinals)) => {
            Array::Period(PeriodArray::new(ordinals.to_vec(), proto.freq()))
        }
        (Array::Interval(_), EngineTarget::Scalars(scalars)) => {
            match Array::from_sequence(scalars, &prototype.dtype()) {
                Ok(a) => a,
                Err(err) => panic!("join target carries invalid interval scalars: {err}"),
            }
        }
        (Array::Object(_), EngineTarget::Scalars(scalars)) => {
            Array::Object(ObjectArray::new(scalars.to_vec()))
        }
        _ => panic!(
            "join target shape does not match {} prototype",
            prototype.kind().type_name()
        ),
    }
}

///
/// TESTS
///
