///
/// Index Kind Registry
///
/// Single source of truth for index-kind metadata shared across the crate.
///

// NOTE: Specificity drives two-phase operator resolution and must stay
// consistent: the generic object-backed kind is 0, primitive numerics 1,
// encoded value kinds 2, tick-based temporal kinds 3.
// Arithmetic support is registry-authoritative; do not infer it from the
// backing encoding.
macro_rules! index_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Base,
                name = "Index",
                ArrayKind::Object,
                specificity = 0,
                supports_arithmetic = false,
                buffer_backed = false
            ),
            (
                Int64,
                name = "Int64Index",
                ArrayKind::Int64,
                specificity = 1,
                supports_arithmetic = true,
                buffer_backed = true
            ),
            (
                Float64,
                name = "Float64Index",
                ArrayKind::Float64,
                specificity = 1,
                supports_arithmetic = true,
                buffer_backed = true
            ),
            (
                Categorical,
                name = "CategoricalIndex",
                ArrayKind::Categorical,
                specificity = 2,
                supports_arithmetic = false,
                buffer_backed = true
            ),
            (
                Interval,
                name = "IntervalIndex",
                ArrayKind::Interval,
                specificity = 2,
                supports_arithmetic = false,
                buffer_backed = false
            ),
            (
                Datetime,
                name = "DatetimeIndex",
                ArrayKind::Datetime,
                specificity = 3,
                supports_arithmetic = true,
                buffer_backed = true
            ),
            (
                Timedelta,
                name = "TimedeltaIndex",
                ArrayKind::Timedelta,
                specificity = 3,
                supports_arithmetic = true,
                buffer_backed = true
            ),
            (
                Period,
                name = "PeriodIndex",
                ArrayKind::Period,
                specificity = 3,
                supports_arithmetic = true,
                buffer_backed = true
            ),
        }
    };
}

// Callers invoke this at item position, so the inner expansion must end in
// a semicolon.
macro_rules! index_registry {
    ($macro:ident) => {
        index_registry_entries!($macro);
    };
    ($macro:ident, $($args:tt)+) => {
        index_registry_entries!($macro, @args $($args)+);
    };
}
