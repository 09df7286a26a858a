use crate::{dtype::Freq, scalar::Scalar};
use std::cmp::Ordering;

const fn freq_rank(freq: Freq) -> u8 {
    match freq {
        Freq::Day => 0,
        Freq::Month => 1,
        Freq::Quarter => 2,
        Freq::Year => 3,
    }
}

///
/// Canonical Scalar Rank
///
/// Stable rank used for cross-variant ordering in object-backed arrays.
/// Nulls sort last.
///

#[must_use]
pub(crate) const fn canonical_rank(value: &Scalar) -> u8 {
    match value {
        Scalar::Bool(_) => 0,
        Scalar::Int(_) => 1,
        Scalar::Float(_) => 2,
        Scalar::Text(_) => 3,
        Scalar::Datetime(_) => 4,
        Scalar::Timedelta(_) => 5,
        Scalar::Period { .. } => 6,
        Scalar::Interval { .. } => 7,
        Scalar::Null => 8,
    }
}

/// Total canonical comparator: rank first, then variant-specific comparison
/// for same-ranked values. Mixed-variant comparisons are rank-only and
/// deterministic.
#[must_use]
pub(crate) fn canonical_cmp(left: &Scalar, right: &Scalar) -> Ordering {
    let rank = canonical_rank(left).cmp(&canonical_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
        (Scalar::Int(a), Scalar::Int(b)) => a.cmp(b),
        (Scalar::Float(a), Scalar::Float(b)) => a.total_cmp(b),
        (Scalar::Text(a), Scalar::Text(b)) => a.cmp(b),
        (Scalar::Datetime(a), Scalar::Datetime(b))
        | (Scalar::Timedelta(a), Scalar::Timedelta(b)) => a.cmp(b),
        (
            Scalar::Period {
                ordinal: a,
                freq: fa,
            },
            Scalar::Period {
                ordinal: b,
                freq: fb,
            },
        ) => freq_rank(*fa).cmp(&freq_rank(*fb)).then(a.cmp(b)),
        (
            Scalar::Interval {
                left: al,
                right: ar,
            },
            Scalar::Interval {
                left: bl,
                right: br,
            },
        ) => al.total_cmp(bl).then(ar.total_cmp(br)),
        _ => Ordering::Equal,
    }
}

/// Strict comparator for order-sensitive surfaces (searchsorted, ordering
/// comparisons). Same-variant only, except int/float which compare
/// numerically. Returns `None` for mismatched variants; nulls sort last.
#[must_use]
pub(crate) fn order_cmp(left: &Scalar, right: &Scalar) -> Option<Ordering> {
    match (left.is_null(), right.is_null()) {
        (true, true) => return Some(Ordering::Equal),
        (true, false) => return Some(Ordering::Greater),
        (false, true) => return Some(Ordering::Less),
        (false, false) => {}
    }

    match (left, right) {
        (Scalar::Bool(a), Scalar::Bool(b)) => Some(a.cmp(b)),
        (Scalar::Int(a), Scalar::Int(b)) => Some(a.cmp(b)),
        (Scalar::Text(a), Scalar::Text(b)) => Some(a.cmp(b)),
        (Scalar::Datetime(a), Scalar::Datetime(b))
        | (Scalar::Timedelta(a), Scalar::Timedelta(b)) => Some(a.cmp(b)),
        (
            Scalar::Period {
                ordinal: a,
                freq: fa,
            },
            Scalar::Period {
                ordinal: b,
                freq: fb,
            },
        ) => (fa == fb).then(|| a.cmp(b)),
        (
            Scalar::Interval {
                left: al,
                right: ar,
            },
            Scalar::Interval {
                left: bl,
                right: br,
            },
        ) => Some(al.total_cmp(bl).then(ar.total_cmp(br))),
        // Cross int/float comparison goes through f64.
        (Scalar::Int(_) | Scalar::Float(_), Scalar::Int(_) | Scalar::Float(_)) => {
            let (a, b) = (left.to_f64()?, right.to_f64()?);
            a.partial_cmp(&b)
        }
        _ => None,
    }
}
