use crate::{
    array::{
        Array, CategoricalArray, DatetimeArray, Float64Array, Int64Array, IntervalArray,
        NULL_TICK, ObjectArray, PeriodArray, Repeats, SearchPositions, SearchProbe, Side,
        TimedeltaArray,
    },
    dtype::{DType, Freq, TimeUnit},
    scalar::Scalar,
};

fn int_array(values: &[i64]) -> Array {
    Array::Int64(Int64Array::new(values.to_vec()))
}

#[test]
fn test_get_and_to_scalars() {
    let a = int_array(&[10, 20, 30]);
    assert_eq!(a.get(1), Some(Scalar::Int(20)));
    assert_eq!(a.get(3), None);
    assert_eq!(
        a.to_scalars(),
        vec![Scalar::Int(10), Scalar::Int(20), Scalar::Int(30)]
    );
}

#[test]
fn test_isna_per_encoding() {
    assert_eq!(int_array(&[1, 2]).isna(), vec![false, false]);

    let f = Array::Float64(Float64Array::new(vec![1.0, f64::NAN]));
    assert_eq!(f.isna(), vec![false, true]);

    let d = Array::Datetime(DatetimeArray::new(vec![5, NULL_TICK]));
    assert_eq!(d.isna(), vec![false, true]);
    assert_eq!(d.get(1), Some(Scalar::Null));

    let c = Array::Categorical(CategoricalArray::from_values(&[
        Scalar::Text("a".to_string()),
        Scalar::Null,
    ]));
    assert_eq!(c.isna(), vec![false, true]);
}

#[test]
fn test_equals_treats_nan_as_equal() {
    let a = Array::Float64(Float64Array::new(vec![1.0, f64::NAN]));
    let b = Array::Float64(Float64Array::new(vec![1.0, f64::NAN]));
    assert!(a.equals(&b));
}

#[test]
fn test_equals_never_crosses_kinds() {
    let a = int_array(&[1]);
    let b = Array::Float64(Float64Array::new(vec![1.0]));
    assert!(!a.equals(&b));
}

#[test]
fn test_delete_sorts_and_dedups_positions() {
    let a = int_array(&[10, 20, 30, 40]);
    let out = a.delete(&[2, 0, 2]).unwrap();
    assert_eq!(out.to_scalars(), vec![Scalar::Int(20), Scalar::Int(40)]);
}

#[test]
fn test_delete_rejects_out_of_range() {
    let a = int_array(&[10]);
    assert!(a.delete(&[1]).is_err());
}

#[test]
fn test_insert_rejects_incompatible_value() {
    let a = int_array(&[1, 2]);
    let err = a.insert(1, &Scalar::Float(1.5)).unwrap_err();
    assert!(err.is_value_rejection());
}

#[test]
fn test_insert_null_into_tick_data() {
    let a = Array::Datetime(DatetimeArray::new(vec![1, 2]));
    let out = a.insert(1, &Scalar::Null).unwrap();
    assert_eq!(out.isna(), vec![false, true, false]);
}

#[test]
fn test_repeat_uniform_and_per_element() {
    let a = int_array(&[1, 2]);
    let uniform = a.repeat(&Repeats::Uniform(2)).unwrap();
    assert_eq!(uniform.len(), 4);

    let per = a.repeat(&Repeats::PerElement(vec![0, 3])).unwrap();
    assert_eq!(
        per.to_scalars(),
        vec![Scalar::Int(2), Scalar::Int(2), Scalar::Int(2)]
    );

    assert!(a.repeat(&Repeats::PerElement(vec![1])).is_err());
}

#[test]
fn test_searchsorted_left_and_right() {
    let a = int_array(&[1, 2, 2, 3]);
    let probe = SearchProbe::One(Scalar::Int(2));
    assert_eq!(
        a.searchsorted(&probe, Side::Left, None).unwrap(),
        SearchPositions::One(1)
    );
    assert_eq!(
        a.searchsorted(&probe, Side::Right, None).unwrap(),
        SearchPositions::One(3)
    );
}

#[test]
fn test_searchsorted_many_with_sorter() {
    let a = int_array(&[3, 1, 2]);
    let sorter = [1_usize, 2, 0];
    let probe = SearchProbe::Many(vec![Scalar::Int(0), Scalar::Int(2), Scalar::Int(9)]);
    assert_eq!(
        a.searchsorted(&probe, Side::Left, Some(&sorter)).unwrap(),
        SearchPositions::Many(vec![0, 1, 3])
    );
}

#[test]
fn test_searchsorted_validates_sorter() {
    let a = int_array(&[1, 2]);
    let probe = SearchProbe::One(Scalar::Int(1));
    assert!(a.searchsorted(&probe, Side::Left, Some(&[0])).is_err());
    assert!(a.searchsorted(&probe, Side::Left, Some(&[0, 5])).is_err());
}

#[test]
fn test_searchsorted_rejects_unordered_probe() {
    let a = int_array(&[1, 2]);
    let probe = SearchProbe::One(Scalar::Text("x".to_string()));
    assert!(a.searchsorted(&probe, Side::Left, None).is_err());
}

#[test]
fn test_astype_int_to_float_buffer_path() {
    let a = int_array(&[1, 2]);
    let out = a.astype(&DType::Float64).unwrap();
    assert_eq!(out.dtype(), DType::Float64);
    assert_eq!(out.get(0), Some(Scalar::Float(1.0)));
}

#[test]
fn test_astype_tick_reinterpretation() {
    let a = int_array(&[100, NULL_TICK]);
    let out = a.astype(&DType::Datetime(TimeUnit::Nano)).unwrap();
    assert_eq!(out.get(0), Some(Scalar::Datetime(100)));
    assert_eq!(out.get(1), Some(Scalar::Null));

    let back = out.astype(&DType::Int64).unwrap();
    assert!(back.equals(&a));
}

#[test]
fn test_astype_rejects_non_nano() {
    let a = Array::Datetime(DatetimeArray::new(vec![1]));
    let err = a.astype(&DType::Datetime(TimeUnit::Second)).unwrap_err();
    assert!(err.to_string().contains("nanosecond"));
}

#[test]
fn test_astype_float_to_int_rejects_non_finite() {
    let a = Array::Float64(Float64Array::new(vec![1.0, f64::NAN]));
    assert!(a.astype(&DType::Int64).is_err());

    let ok = Array::Float64(Float64Array::new(vec![1.9, -1.9]));
    let out = ok.astype(&DType::Int64).unwrap();
    assert_eq!(out.to_scalars(), vec![Scalar::Int(1), Scalar::Int(-1)]);
}

#[test]
fn test_astype_generic_fallback_to_object() {
    let a = Array::Period(PeriodArray::new(vec![5, NULL_TICK], Freq::Month));
    let out = a.astype(&DType::Object).unwrap();
    assert_eq!(out.kind().type_name(), "ObjectArray");
    assert_eq!(
        out.get(0),
        Some(Scalar::Period {
            ordinal: 5,
            freq: Freq::Month
        })
    );
    assert_eq!(out.get(1), Some(Scalar::Null));
}

#[test]
fn test_from_sequence_mixed_rejected_for_typed_targets() {
    let values = [Scalar::Int(1), Scalar::Text("a".to_string())];
    assert!(Array::from_sequence(&values, &DType::Int64).is_err());
    assert!(Array::from_sequence(&values, &DType::Object).is_ok());
}

#[test]
fn test_categorical_table_is_sorted_and_distinct() {
    let a = CategoricalArray::from_values(&[
        Scalar::Text("b".to_string()),
        Scalar::Text("a".to_string()),
        Scalar::Text("b".to_string()),
        Scalar::Null,
    ]);
    assert_eq!(
        a.categories(),
        &[Scalar::Text("a".to_string()), Scalar::Text("b".to_string())]
    );
    assert_eq!(a.codes(), &[1, 0, 1, -1]);
}

#[test]
fn test_categorical_rejects_unknown_category() {
    let a = CategoricalArray::from_values(&[Scalar::Text("a".to_string())]);
    let err = a.insert(0, &Scalar::Text("z".to_string())).unwrap_err();
    assert!(err.is_value_rejection());
}

#[test]
fn test_interval_buffers_must_align() {
    assert!(IntervalArray::new(vec![0.0], vec![1.0, 2.0]).is_err());
    assert!(IntervalArray::new(vec![2.0], vec![1.0]).is_err());
}

#[test]
fn test_period_from_sequence_requires_matching_freq() {
    let values = [
        Scalar::Period {
            ordinal: 1,
            freq: Freq::Day,
        },
        Scalar::Null,
    ];
    assert!(PeriodArray::from_sequence(&values, Freq::Day).is_ok());
    assert!(PeriodArray::from_sequence(&values, Freq::Month).is_err());
}

#[test]
fn test_validate_setitem_normalizes_value() {
    let f = Array::Float64(Float64Array::new(vec![1.0]));
    assert_eq!(
        f.validate_setitem(&Scalar::Int(2)).unwrap(),
        Scalar::Float(2.0)
    );

    let t = Array::Timedelta(TimedeltaArray::new(vec![1]));
    assert!(t.validate_setitem(&Scalar::Int(2)).is_err());
}

#[test]
fn test_take_preserves_categorical_table() {
    let full = CategoricalArray::from_codes(
        vec![0, 1],
        vec![
            Scalar::Text("a".to_string()),
            Scalar::Text("b".to_string()),
            Scalar::Text("c".to_string()),
        ],
    )
    .unwrap();

    let out = Array::Categorical(full).take(&[0]).unwrap();
    let Array::Categorical(taken) = out else {
        panic!("take keeps the categorical encoding");
    };
    assert_eq!(taken.codes(), &[0]);
    assert_eq!(taken.categories().len(), 3);
    // A category absent from the selection is still a valid insert.
    let inserted = taken.insert(1, &Scalar::Text("c".to_string())).unwrap();
    assert_eq!(inserted.codes(), &[0, 2]);
}

#[test]
fn test_take_keeps_dtype_parameters() {
    let a = Array::Period(PeriodArray::new(vec![7, 8, 9], Freq::Quarter));
    let out = a.take(&[2, 0]).unwrap();
    assert_eq!(out.dtype(), DType::Period(Freq::Quarter));
    assert_eq!(
        out.to_scalars(),
        vec![
            Scalar::Period {
                ordinal: 9,
                freq: Freq::Quarter
            },
            Scalar::Period {
                ordinal: 7,
                freq: Freq::Quarter
            },
        ]
    );
}

#[test]
fn test_take_reorders_and_bounds_checks() {
    let a = Array::Object(ObjectArray::new(vec![
        Scalar::Int(1),
        Scalar::Text("a".to_string()),
    ]));
    let out = a.take(&[1, 0, 1]).unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out.get(0), Some(Scalar::Text("a".to_string())));
    assert!(a.take(&[2]).is_err());
}
