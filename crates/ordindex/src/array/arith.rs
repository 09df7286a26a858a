use crate::{
    array::{
        Array, DatetimeArray, Float64Array, Int64Array, NULL_TICK, ObjectArray, PeriodArray,
        TimedeltaArray,
    },
    error::IndexError,
    ops::{ArithOp, CmpOp},
    scalar::{Scalar, compare::order_cmp},
};
use std::cmp::Ordering;

///
/// Rhs
///
/// Right-hand operand of an element-wise kernel: either a same-length array
/// or a scalar broadcast across every position.
///

#[derive(Clone, Copy, Debug)]
pub(crate) enum Rhs<'a> {
    Array(&'a Array),
    Scalar(&'a Scalar),
}

impl Rhs<'_> {
    fn check_len(&self, len: usize) -> Result<(), IndexError> {
        if let Self::Array(a) = self {
            if a.len() != len {
                return Err(IndexError::invalid(format!(
                    "operand length {} does not match array length {len}",
                    a.len()
                )));
            }
        }

        Ok(())
    }

    fn value_at(&self, loc: usize) -> Scalar {
        match self {
            Self::Array(a) => a.get(loc).unwrap_or(Scalar::Null),
            Self::Scalar(s) => (*s).clone(),
        }
    }

    fn values(&self, len: usize) -> Vec<Scalar> {
        (0..len).map(|i| self.value_at(i)).collect()
    }
}

///
/// ArithOutput
///
/// Single result array, or the quotient/remainder pair from divmod.
///

#[derive(Clone, Debug)]
pub(crate) enum ArithOutput {
    One(Array),
    Pair(Array, Array),
}

/// Element-wise arithmetic kernel. The output dtype is determined by the
/// left dtype, the operator, and the right operand values.
pub(crate) fn arith(lhs: &Array, op: ArithOp, rhs: &Rhs<'_>) -> Result<ArithOutput, IndexError> {
    rhs.check_len(lhs.len())?;
    let others = rhs.values(lhs.len());

    match lhs {
        Array::Int64(a) => int64_arith(a, op, &others),
        Array::Float64(a) => float_arith(a.values(), op, &others),
        Array::Datetime(a) => datetime_arith(a, op, &others),
        Array::Timedelta(a) => timedelta_arith(a, op, &others),
        Array::Period(a) => period_arith(a, op, &others),
        Array::Categorical(_) | Array::Interval(_) | Array::Object(_) => {
            Err(IndexError::UnsupportedOperation {
                op: op.as_str(),
                index_type: lhs.kind().type_name(),
            })
        }
    }
}

/// Element-wise ordering/equality kernel. Null operands make `Eq` false and
/// `Ne` true; ordering comparisons against incomparable values fail.
pub(crate) fn compare(lhs: &Array, op: CmpOp, rhs: &Rhs<'_>) -> Result<Vec<bool>, IndexError> {
    rhs.check_len(lhs.len())?;

    let mut out = Vec::with_capacity(lhs.len());
    for i in 0..lhs.len() {
        let a = lhs.get(i).unwrap_or(Scalar::Null);
        let b = rhs.value_at(i);

        if a.is_null() || b.is_null() {
            out.push(matches!(op, CmpOp::Ne));
            continue;
        }

        match order_cmp(&a, &b) {
            Some(ord) => out.push(match op {
                CmpOp::Eq => ord == Ordering::Equal,
                CmpOp::Ne => ord != Ordering::Equal,
                CmpOp::Lt => ord == Ordering::Less,
                CmpOp::Gt => ord == Ordering::Greater,
                CmpOp::Le => ord != Ordering::Greater,
                CmpOp::Ge => ord != Ordering::Less,
            }),
            None if matches!(op, CmpOp::Eq) => out.push(false),
            None if matches!(op, CmpOp::Ne) => out.push(true),
            None => {
                return Err(IndexError::invalid(format!(
                    "cannot order {} data against {b}",
                    lhs.dtype()
                )));
            }
        }
    }

    Ok(out)
}

///
/// Integer kernels
///

const fn floor_div_i64(a: i64, b: i64) -> i64 {
    if a == i64::MIN && b == -1 {
        return i64::MAX;
    }
    let q = a / b;
    if a % b != 0 && (a < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

const fn floor_mod_i64(a: i64, b: i64) -> i64 {
    // i64::MIN % -1 overflows; the remainder is zero.
    if b == -1 {
        return 0;
    }
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        r + b
    } else {
        r
    }
}

fn int_kernel(op: ArithOp, a: i64, b: i64) -> Result<(i64, Option<i64>), IndexError> {
    let one = match op {
        ArithOp::Add => a.saturating_add(b),
        ArithOp::Sub => a.saturating_sub(b),
        ArithOp::Mul => a.saturating_mul(b),
        ArithOp::Pow => a.saturating_pow(u32::try_from(b).unwrap_or(u32::MAX)),
        ArithOp::FloorDiv | ArithOp::Mod | ArithOp::DivMod => {
            if b == 0 {
                return Err(IndexError::invalid("integer division or modulo by zero"));
            }
            match op {
                ArithOp::FloorDiv => floor_div_i64(a, b),
                ArithOp::Mod => floor_mod_i64(a, b),
                _ => return Ok((floor_div_i64(a, b), Some(floor_mod_i64(a, b)))),
            }
        }
        ArithOp::Div => {
            return Err(IndexError::invalid("true division always produces floats"));
        }
    };

    Ok((one, None))
}

fn int64_arith(
    a: &Int64Array,
    op: ArithOp,
    others: &[Scalar],
) -> Result<ArithOutput, IndexError> {
    for other in others {
        if !matches!(other, Scalar::Int(_) | Scalar::Float(_) | Scalar::Null) {
            return Err(IndexError::invalid(format!(
                "cannot {op} int64 data with value {other}"
            )));
        }
    }

    let stays_int = !matches!(op, ArithOp::Div)
        && others.iter().all(|v| matches!(v, Scalar::Int(_)))
        && !(matches!(op, ArithOp::Pow)
            && others.iter().any(|v| matches!(v, Scalar::Int(e) if *e < 0)));

    if stays_int {
        let mut ones = Vec::with_capacity(a.len());
        let mut twos = Vec::with_capacity(a.len());
        for (&x, other) in a.values().iter().zip(others.iter()) {
            let Scalar::Int(y) = other else { continue };
            let (one, two) = int_kernel(op, x, *y)?;
            ones.push(one);
            if let Some(two) = two {
                twos.push(two);
            }
        }
        return Ok(wrap_int(op, ones, twos));
    }

    float_arith_f64(&to_f64_vec(a.values()), op, others)
}

///
/// Float kernels
///

fn floor_mod_f64(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

fn float_kernel(op: ArithOp, a: f64, b: f64) -> (f64, Option<f64>) {
    match op {
        ArithOp::Add => (a + b, None),
        ArithOp::Sub => (a - b, None),
        ArithOp::Mul => (a * b, None),
        ArithOp::Div => (a / b, None),
        ArithOp::FloorDiv => ((a / b).floor(), None),
        ArithOp::Mod => (floor_mod_f64(a, b), None),
        ArithOp::Pow => (a.powf(b), None),
        ArithOp::DivMod => ((a / b).floor(), Some(floor_mod_f64(a, b))),
    }
}

fn float_arith(values: &[f64], op: ArithOp, others: &[Scalar]) -> Result<ArithOutput, IndexError> {
    for other in others {
        if !matches!(other, Scalar::Int(_) | Scalar::Float(_) | Scalar::Null) {
            return Err(IndexError::invalid(format!(
                "cannot {op} float64 data with value {other}"
            )));
        }
    }

    float_arith_f64(values, op, others)
}

fn float_arith_f64(
    values: &[f64],
    op: ArithOp,
    others: &[Scalar],
) -> Result<ArithOutput, IndexError> {
    let mut ones = Vec::with_capacity(values.len());
    let mut twos = Vec::with_capacity(values.len());
    for (&x, other) in values.iter().zip(others.iter()) {
        let y = other.to_f64().unwrap_or(f64::NAN);
        let (one, two) = float_kernel(op, x, y);
        ones.push(one);
        if let Some(two) = two {
            twos.push(two);
        }
    }

    Ok(wrap_float(op, ones, twos))
}

#[allow(clippy::cast_precision_loss)]
fn to_f64_vec(values: &[i64]) -> Vec<f64> {
    values.iter().map(|&v| v as f64).collect()
}

fn wrap_int(op: ArithOp, ones: Vec<i64>, twos: Vec<i64>) -> ArithOutput {
    if matches!(op, ArithOp::DivMod) {
        ArithOutput::Pair(
            Array::Int64(Int64Array::new(ones)),
            Array::Int64(Int64Array::new(twos)),
        )
    } else {
        ArithOutput::One(Array::Int64(Int64Array::new(ones)))
    }
}

fn wrap_float(op: ArithOp, ones: Vec<f64>, twos: Vec<f64>) -> ArithOutput {
    if matches!(op, ArithOp::DivMod) {
        ArithOutput::Pair(
            Array::Float64(Float64Array::new(ones)),
            Array::Float64(Float64Array::new(twos)),
        )
    } else {
        ArithOutput::One(Array::Float64(Float64Array::new(ones)))
    }
}

///
/// Tick kernels
///

/// Saturating tick combine with sentinel propagation.
fn tick_combine(a: i64, b: i64, sub: bool) -> i64 {
    if a == NULL_TICK || b == NULL_TICK {
        NULL_TICK
    } else if sub {
        a.saturating_sub(b)
    } else {
        a.saturating_add(b)
    }
}

fn datetime_arith(
    a: &DatetimeArray,
    op: ArithOp,
    others: &[Scalar],
) -> Result<ArithOutput, IndexError> {
    let all_timedelta = others
        .iter()
        .all(|v| matches!(v, Scalar::Timedelta(_) | Scalar::Null));
    let all_datetime = others
        .iter()
        .all(|v| matches!(v, Scalar::Datetime(_) | Scalar::Null));

    match op {
        ArithOp::Add | ArithOp::Sub if all_timedelta => {
            let ticks = a
                .ticks()
                .iter()
                .zip(others.iter())
                .map(|(&t, other)| match other {
                    Scalar::Timedelta(d) => tick_combine(t, *d, matches!(op, ArithOp::Sub)),
                    _ => NULL_TICK,
                })
                .collect();
            Ok(ArithOutput::One(Array::Datetime(DatetimeArray::new(ticks))))
        }
        ArithOp::Sub if all_datetime => {
            let ticks = a
                .ticks()
                .iter()
                .zip(others.iter())
                .map(|(&t, other)| match other {
                    Scalar::Datetime(u) => tick_combine(t, *u, true),
                    _ => NULL_TICK,
                })
                .collect();
            Ok(ArithOutput::One(Array::Timedelta(TimedeltaArray::new(
                ticks,
            ))))
        }
        ArithOp::Add | ArithOp::Sub => Err(IndexError::invalid(format!(
            "cannot {op} datetime64[ns] data with the given operand"
        ))),
        _ => Err(IndexError::UnsupportedOperation {
            op: op.as_str(),
            index_type: "DatetimeArray",
        }),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn timedelta_arith(
    a: &TimedeltaArray,
    op: ArithOp,
    others: &[Scalar],
) -> Result<ArithOutput, IndexError> {
    let all_timedelta = others
        .iter()
        .all(|v| matches!(v, Scalar::Timedelta(_) | Scalar::Null));
    let all_datetime = others
        .iter()
        .all(|v| matches!(v, Scalar::Datetime(_) | Scalar::Null));
    let all_numeric = others
        .iter()
        .all(|v| matches!(v, Scalar::Int(_) | Scalar::Float(_) | Scalar::Null));

    match op {
        // Duration shifted by duration, or anchored onto a timestamp.
        ArithOp::Add | ArithOp::Sub if all_timedelta => {
            let ticks = a
                .ticks()
                .iter()
                .zip(others.iter())
                .map(|(&t, other)| match other {
                    Scalar::Timedelta(d) => tick_combine(t, *d, matches!(op, ArithOp::Sub)),
                    _ => NULL_TICK,
                })
                .collect();
            Ok(ArithOutput::One(Array::Timedelta(TimedeltaArray::new(
                ticks,
            ))))
        }
        ArithOp::Add if all_datetime => {
            let ticks = a
                .ticks()
                .iter()
                .zip(others.iter())
                .map(|(&t, other)| match other {
                    Scalar::Datetime(u) => tick_combine(t, *u, false),
                    _ => NULL_TICK,
                })
                .collect();
            Ok(ArithOutput::One(Array::Datetime(DatetimeArray::new(ticks))))
        }

        // Scaling by a numeric factor keeps the duration dtype.
        ArithOp::Mul | ArithOp::Div | ArithOp::FloorDiv if all_numeric => {
            let mut ticks = Vec::with_capacity(a.len());
            for (&t, other) in a.ticks().iter().zip(others.iter()) {
                if t == NULL_TICK || other.is_null() {
                    ticks.push(NULL_TICK);
                    continue;
                }
                let x = other.to_f64().unwrap_or(f64::NAN);
                if matches!(op, ArithOp::Div | ArithOp::FloorDiv) && x == 0.0 {
                    return Err(IndexError::invalid("timedelta division by zero"));
                }
                let scaled = match op {
                    ArithOp::Mul => t as f64 * x,
                    ArithOp::Div => t as f64 / x,
                    _ => (t as f64 / x).floor(),
                };
                ticks.push(scaled as i64);
            }
            Ok(ArithOutput::One(Array::Timedelta(TimedeltaArray::new(
                ticks,
            ))))
        }

        // Duration ratios are dimensionless floats; remainders keep the
        // duration dtype.
        ArithOp::Div | ArithOp::FloorDiv | ArithOp::Mod | ArithOp::DivMod if all_timedelta => {
            let mut ratios = Vec::with_capacity(a.len());
            let mut remainders = Vec::with_capacity(a.len());
            for (&t, other) in a.ticks().iter().zip(others.iter()) {
                let d = match other {
                    Scalar::Timedelta(d) if *d != NULL_TICK => Some(*d),
                    _ => None,
                };
                match d {
                    Some(0) => {
                        return Err(IndexError::invalid("timedelta division by zero"));
                    }
                    Some(d) if t != NULL_TICK => {
                        let ratio = t as f64 / d as f64;
                        ratios.push(if matches!(op, ArithOp::Div) {
                            ratio
                        } else {
                            ratio.floor()
                        });
                        remainders.push(floor_mod_i64(t, d));
                    }
                    _ => {
                        ratios.push(f64::NAN);
                        remainders.push(NULL_TICK);
                    }
                }
            }
            Ok(match op {
                ArithOp::Mod => {
                    ArithOutput::One(Array::Timedelta(TimedeltaArray::new(remainders)))
                }
                ArithOp::DivMod => ArithOutput::Pair(
                    Array::Float64(Float64Array::new(ratios)),
                    Array::Timedelta(TimedeltaArray::new(remainders)),
                ),
                _ => ArithOutput::One(Array::Float64(Float64Array::new(ratios))),
            })
        }

        ArithOp::Add | ArithOp::Sub | ArithOp::Mul | ArithOp::Div | ArithOp::FloorDiv
        | ArithOp::Mod | ArithOp::DivMod => Err(IndexError::invalid(format!(
            "cannot {op} timedelta64[ns] data with the given operand"
        ))),
        ArithOp::Pow => Err(IndexError::UnsupportedOperation {
            op: op.as_str(),
            index_type: "TimedeltaArray",
        }),
    }
}

fn period_arith(
    a: &PeriodArray,
    op: ArithOp,
    others: &[Scalar],
) -> Result<ArithOutput, IndexError> {
    let all_int = others
        .iter()
        .all(|v| matches!(v, Scalar::Int(_) | Scalar::Null));
    let all_period = others
        .iter()
        .all(|v| matches!(v, Scalar::Period { .. } | Scalar::Null));

    match op {
        // Periods shift by whole counts of their own frequency.
        ArithOp::Add | ArithOp::Sub if all_int => {
            let ordinals = a
                .ordinals()
                .iter()
                .zip(others.iter())
                .map(|(&o, other)| match other {
                    Scalar::Int(n) => tick_combine(o, *n, matches!(op, ArithOp::Sub)),
                    _ => NULL_TICK,
                })
                .collect();
            Ok(ArithOutput::One(Array::Period(PeriodArray::new(
                ordinals,
                a.freq(),
            ))))
        }

        // Same-frequency differences are whole counts; any missing element
        // forces the heterogeneous representation.
        ArithOp::Sub if all_period => {
            let mut diffs: Vec<Option<i64>> = Vec::with_capacity(a.len());
            for (&o, other) in a.ordinals().iter().zip(others.iter()) {
                match other {
                    Scalar::Period { ordinal, freq } if *freq != a.freq() => {
                        return Err(IndexError::invalid(format!(
                            "cannot subtract period[{freq}] value {ordinal} from period[{}] data",
                            a.freq()
                        )));
                    }
                    Scalar::Period { ordinal, .. } if o != NULL_TICK => {
                        diffs.push(Some(o.saturating_sub(*ordinal)));
                    }
                    _ => diffs.push(None),
                }
            }
            if diffs.iter().all(Option::is_some) {
                Ok(ArithOutput::One(Array::Int64(Int64Array::new(
                    diffs.into_iter().flatten().collect(),
                ))))
            } else {
                Ok(ArithOutput::One(Array::Object(ObjectArray::new(
                    diffs
                        .into_iter()
                        .map(|d| d.map_or(Scalar::Null, Scalar::Int))
                        .collect(),
                ))))
            }
        }

        ArithOp::Add | ArithOp::Sub => Err(IndexError::invalid(format!(
            "cannot {op} period[{}] data with the given operand",
            a.freq()
        ))),
        _ => Err(IndexError::UnsupportedOperation {
            op: op.as_str(),
            index_type: "PeriodArray",
        }),
    }
}
