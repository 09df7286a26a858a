use crate::{
    dtype::{DType, Freq, TimeUnit},
    scalar::{
        Scalar,
        compare::{canonical_cmp, order_cmp},
    },
};
use std::cmp::Ordering;

#[test]
fn test_from_impls() {
    assert_eq!(Scalar::from(3_i32), Scalar::Int(3));
    assert_eq!(Scalar::from(2.5_f64), Scalar::Float(2.5));
    assert_eq!(Scalar::from("a"), Scalar::Text("a".to_string()));
    assert_eq!(Scalar::from(true), Scalar::Bool(true));
}

#[test]
fn test_is_null() {
    assert!(Scalar::Null.is_null());
    assert!(Scalar::Float(f64::NAN).is_null());
    assert!(!Scalar::Float(0.0).is_null());
    assert!(!Scalar::Int(0).is_null());
}

#[test]
fn test_dtype_hint() {
    assert_eq!(Scalar::Int(1).dtype_hint(), Some(DType::Int64));
    assert_eq!(
        Scalar::Datetime(0).dtype_hint(),
        Some(DType::Datetime(TimeUnit::Nano))
    );
    assert_eq!(Scalar::Null.dtype_hint(), None);
}

#[test]
fn test_datetime_from_rfc3339() {
    let s = Scalar::datetime_from_rfc3339("2024-03-09T19:45:30Z").unwrap();
    assert_eq!(s, Scalar::Datetime(1_710_013_530 * 1_000_000_000));
}

#[test]
fn test_datetime_from_rfc3339_invalid() {
    assert!(Scalar::datetime_from_rfc3339("not-a-timestamp").is_err());
}

#[test]
fn test_datetime_display_round_trips() {
    let s = Scalar::Datetime(1_710_013_530 * 1_000_000_000);
    let shown = s.to_string();
    assert_eq!(Scalar::datetime_from_rfc3339(&shown).unwrap(), s);
}

#[test]
fn test_order_cmp_same_variant() {
    assert_eq!(
        order_cmp(&Scalar::Int(1), &Scalar::Int(2)),
        Some(Ordering::Less)
    );
    assert_eq!(
        order_cmp(
            &Scalar::Text("b".to_string()),
            &Scalar::Text("a".to_string())
        ),
        Some(Ordering::Greater)
    );
}

#[test]
fn test_order_cmp_int_float_cross() {
    assert_eq!(
        order_cmp(&Scalar::Int(1), &Scalar::Float(1.5)),
        Some(Ordering::Less)
    );
    assert_eq!(
        order_cmp(&Scalar::Float(2.0), &Scalar::Int(2)),
        Some(Ordering::Equal)
    );
}

#[test]
fn test_order_cmp_mismatched_variants() {
    assert_eq!(order_cmp(&Scalar::Int(1), &Scalar::Text("a".to_string())), None);
    assert_eq!(order_cmp(&Scalar::Datetime(0), &Scalar::Timedelta(0)), None);
}

#[test]
fn test_order_cmp_cross_freq_periods() {
    let day = Scalar::Period {
        ordinal: 1,
        freq: Freq::Day,
    };
    let month = Scalar::Period {
        ordinal: 1,
        freq: Freq::Month,
    };
    assert_eq!(order_cmp(&day, &month), None);
}

#[test]
fn test_nulls_sort_last() {
    assert_eq!(
        order_cmp(&Scalar::Null, &Scalar::Int(i64::MAX)),
        Some(Ordering::Greater)
    );
    assert_eq!(
        order_cmp(&Scalar::Int(i64::MAX), &Scalar::Null),
        Some(Ordering::Less)
    );
    assert_eq!(order_cmp(&Scalar::Null, &Scalar::Null), Some(Ordering::Equal));
}

#[test]
fn test_canonical_cmp_is_total_across_variants() {
    // Mixed variants order by rank, deterministically.
    assert_eq!(
        canonical_cmp(&Scalar::Int(99), &Scalar::Text("a".to_string())),
        Ordering::Less
    );
    assert_eq!(
        canonical_cmp(&Scalar::Null, &Scalar::Interval { left: 0.0, right: 1.0 }),
        Ordering::Greater
    );
}

#[test]
fn test_serde_round_trip() {
    let values = vec![
        Scalar::Int(7),
        Scalar::Text("x".to_string()),
        Scalar::Datetime(123),
        Scalar::Period {
            ordinal: 4,
            freq: Freq::Quarter,
        },
        Scalar::Null,
    ];
    let json = serde_json::to_string(&values).unwrap();
    let back: Vec<Scalar> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, values);
}
