use crate::{
    array::{
        Array, DatetimeArray, Float64Array, Int64Array, IntervalArray, ObjectArray, Repeats,
        SearchPositions, SearchProbe, Side,
    },
    dtype::{DType, TimeUnit},
    error::IndexError,
    index::{IndexKind, IndexMapper, TypedIndex},
    scalar::Scalar,
};
use proptest::prelude::*;

fn int_index(values: &[i64]) -> TypedIndex {
    TypedIndex::from_array(Array::Int64(Int64Array::new(values.to_vec())))
}

#[test]
fn test_try_new_enforces_kind_acceptance() {
    let data = Array::Int64(Int64Array::new(vec![1, 2]));
    let ix = TypedIndex::try_new(IndexKind::Int64, data.clone(), Some("k".to_string())).unwrap();
    assert_eq!(ix.len(), 2);
    assert_eq!(ix.name(), Some("k"));

    let err = TypedIndex::try_new(IndexKind::Datetime, data, None).unwrap_err();
    assert_eq!(
        err,
        IndexError::TypeMismatch {
            index_type: "DatetimeIndex",
            array_type: "Int64Array",
        }
    );
}

#[test]
fn test_from_array_infers_most_specific_kind() {
    assert_eq!(int_index(&[1]).kind(), IndexKind::Int64);

    let obj = TypedIndex::from_array(Array::Object(ObjectArray::new(vec![Scalar::Int(1)])));
    assert_eq!(obj.kind(), IndexKind::Base);
    assert_eq!(obj.kind().type_name(), "Index");
}

#[test]
fn test_get_take_slice() {
    let ix = int_index(&[10, 20, 30, 40]);
    assert_eq!(ix.get(2).unwrap(), Scalar::Int(30));
    assert!(ix.get(4).is_err());

    let taken = ix.take(&[3, 0]).unwrap();
    assert_eq!(taken.get(0).unwrap(), Scalar::Int(40));

    let sliced = ix.slice(1..3).unwrap();
    assert_eq!(sliced.len(), 2);
    assert_eq!(sliced.get(0).unwrap(), Scalar::Int(20));
    assert!(ix.slice(2..5).is_err());
}

#[test]
fn test_insert_and_delete_concrete() {
    let ix = int_index(&[10, 20, 30]).with_name("k");

    let inserted = ix.insert(1, &Scalar::Int(15)).unwrap();
    assert_eq!(inserted.len(), 4);
    assert_eq!(inserted.get(1).unwrap(), Scalar::Int(15));
    assert_eq!(inserted.name(), Some("k"));

    // Deleting the inserted position recovers the original values.
    let restored = inserted.delete(&[1]).unwrap();
    assert!(restored.equals(&ix));
    // The source index is untouched throughout.
    assert_eq!(ix.len(), 3);
}

#[test]
fn test_insert_negative_location() {
    let ix = int_index(&[1, 2, 3]);
    let out = ix.insert(-1, &Scalar::Int(99)).unwrap();
    assert_eq!(out.get(2).unwrap(), Scalar::Int(99));
    assert_eq!(out.get(3).unwrap(), Scalar::Int(3));

    assert!(ix.insert(-4, &Scalar::Int(0)).is_err());
    assert!(ix.insert(4, &Scalar::Int(0)).is_err());
}

#[test]
fn test_insert_widens_int_to_float() {
    let ix = int_index(&[1, 2]);
    let out = ix.insert(1, &Scalar::Float(1.5)).unwrap();
    assert_eq!(out.dtype(), DType::Float64);
    assert_eq!(out.kind(), IndexKind::Float64);
    assert_eq!(out.get(1).unwrap(), Scalar::Float(1.5));
    assert_eq!(out.len(), 3);
}

#[test]
fn test_insert_null_into_int_index_widens_to_float() {
    let ix = int_index(&[1, 2, 3]);
    let out = ix.insert(1, &Scalar::Null).unwrap();
    assert_eq!(out.dtype(), DType::Float64);
    assert_eq!(out.kind(), IndexKind::Float64);
    assert_eq!(out.len(), 4);
    assert!(out.get(1).unwrap().is_null());
    assert_eq!(out.get(3).unwrap(), Scalar::Float(3.0));
}

#[test]
fn test_insert_widens_to_object_as_last_resort() {
    let ix = int_index(&[1]);
    let out = ix.insert(0, &Scalar::Text("a".to_string())).unwrap();
    assert_eq!(out.dtype(), DType::Object);
    assert_eq!(out.kind(), IndexKind::Base);
    assert_eq!(out.get(0).unwrap(), Scalar::Text("a".to_string()));
}

#[test]
fn test_insert_rejection_without_wider_dtype_surfaces_error() {
    // An interval index rejects an out-of-order bound pair, and widening
    // cannot help because the interval dtype already matches.
    let data = Array::Interval(IntervalArray::new(vec![0.0], vec![1.0]).unwrap());
    let ix = TypedIndex::from_array(data);
    let err = ix
        .insert(
            0,
            &Scalar::Interval {
                left: 2.0,
                right: 1.0,
            },
        )
        .unwrap_err();
    assert!(err.is_value_rejection());
}

#[test]
fn test_astype_same_dtype_shares_unless_copy() {
    let ix = int_index(&[1, 2]);
    let shared = ix.astype(&DType::Int64, false).unwrap();
    assert!(ix.shares_data(&shared));

    let copied = ix.astype(&DType::Int64, true).unwrap();
    assert!(!ix.shares_data(&copied));
    assert!(ix.equals(&copied));
}

#[test]
fn test_astype_rejects_non_nano_for_datetime_like() {
    let ix = TypedIndex::from_array(Array::Datetime(DatetimeArray::new(vec![1])));
    let err = ix.astype(&DType::Datetime(TimeUnit::Milli), false).unwrap_err();
    assert_eq!(
        err,
        IndexError::UnsupportedResolution {
            index_type: "DatetimeIndex",
            dtype: "datetime64[ms]".to_string(),
        }
    );
}

#[test]
fn test_astype_changes_kind_and_keeps_name() {
    let ix = int_index(&[1, 2]).with_name("k");
    let out = ix.astype(&DType::Float64, false).unwrap();
    assert_eq!(out.kind(), IndexKind::Float64);
    assert_eq!(out.name(), Some("k"));
}

#[test]
fn test_isna_is_cached_per_index() {
    let ix = TypedIndex::from_array(Array::Float64(Float64Array::new(vec![1.0, f64::NAN])));
    let first = ix.isna().to_vec();
    assert_eq!(first, vec![false, true]);
    // Second call observes the same cached mask.
    assert_eq!(ix.isna(), first.as_slice());
}

#[test]
fn test_equals_identity_and_kind_rules() {
    let ix = int_index(&[1, 2]);
    let renamed = ix.rename(Some("other".to_string()));
    assert!(ix.shares_data(&renamed));
    assert!(ix.equals(&renamed));

    let same_values = int_index(&[1, 2]);
    assert!(ix.equals(&same_values));

    let float = ix.astype(&DType::Float64, false).unwrap();
    assert!(!ix.equals(&float));
}

#[test]
fn test_repeat_validates_axis() {
    let ix = int_index(&[1, 2]);
    assert_eq!(ix.repeat(&Repeats::Uniform(2), None).unwrap().len(), 4);
    assert_eq!(ix.repeat(&Repeats::Uniform(2), Some(0)).unwrap().len(), 4);
    assert!(ix.repeat(&Repeats::Uniform(2), Some(1)).is_err());
}

#[test]
fn test_searchsorted_delegates() {
    let ix = int_index(&[1, 3, 5]);
    let pos = ix
        .searchsorted(&SearchProbe::One(Scalar::Int(4)), Side::Left, None)
        .unwrap();
    assert_eq!(pos, SearchPositions::One(2));
}

struct Doubler;

impl IndexMapper for Doubler {
    fn map_index(&self, index: &TypedIndex) -> Result<TypedIndex, IndexError> {
        match index.data() {
            Array::Int64(a) => Ok(TypedIndex::from_array(Array::Int64(Int64Array::new(
                a.values().iter().map(|v| v.saturating_mul(2)).collect(),
            )))),
            _ => Err(IndexError::invalid("no typed pass for this encoding")),
        }
    }

    fn map_element(&self, value: &Scalar) -> Scalar {
        match value {
            Scalar::Int(v) => Scalar::Int(v.saturating_mul(2)),
            other => other.clone(),
        }
    }
}

#[test]
fn test_map_typed_pass_keeps_name() {
    let ix = int_index(&[1, 2]).with_name("k");
    let out = ix.map(&Doubler);
    assert_eq!(out.get(1).unwrap(), Scalar::Int(4));
    assert_eq!(out.name(), Some("k"));
    assert_eq!(out.kind(), IndexKind::Int64);
}

#[test]
fn test_map_falls_back_to_object_elements() {
    let data = Array::Object(ObjectArray::new(vec![Scalar::Int(3), Scalar::Null]));
    let ix = TypedIndex::from_array(data).with_name("k");
    let out = ix.map(&Doubler);
    assert_eq!(out.kind(), IndexKind::Base);
    assert_eq!(out.get(0).unwrap(), Scalar::Int(6));
    assert_eq!(out.get(1).unwrap(), Scalar::Null);
    assert_eq!(out.name(), Some("k"));
}

#[test]
fn test_engine_round_trip_keeps_name_and_values() {
    let ix = int_index(&[4, 5, 6]).with_name("k");
    let target = ix.engine_target();
    let back = ix.from_join_target(&target);
    assert!(ix.equals(&back));
    assert_eq!(back.name(), Some("k"));
}

///
/// PROPERTIES
///

proptest! {
    #[test]
    fn prop_insert_then_delete_round_trips(
        values in proptest::collection::vec(any::<i64>(), 0..32),
        item in any::<i64>(),
        loc_seed in any::<usize>(),
    ) {
        let ix = int_index(&values);
        let loc = loc_seed % (values.len() + 1);
        let inserted = ix.insert(
            isize::try_from(loc).unwrap(),
            &Scalar::Int(item),
        ).unwrap();
        prop_assert_eq!(inserted.len(), values.len() + 1);
        prop_assert_eq!(inserted.get(loc).unwrap(), Scalar::Int(item));

        let restored = inserted.delete(&[loc]).unwrap();
        prop_assert!(restored.equals(&ix));
    }

    #[test]
    fn prop_delete_then_insert_restores_original(
        values in proptest::collection::vec(any::<i64>(), 1..32),
        loc_seed in any::<usize>(),
    ) {
        let ix = int_index(&values);
        let loc = loc_seed % values.len();
        let removed = ix.get(loc).unwrap();

        let deleted = ix.delete(&[loc]).unwrap();
        prop_assert_eq!(deleted.len(), values.len() - 1);

        let restored = deleted
            .insert(isize::try_from(loc).unwrap(), &removed)
            .unwrap();
        prop_assert!(restored.equals(&ix));
    }

    #[test]
    fn prop_astype_round_trip_through_float_is_lossless_for_small_ints(
        values in proptest::collection::vec(-1_000_000_i64..1_000_000, 0..32),
    ) {
        let ix = int_index(&values);
        let as_float = ix.astype(&DType::Float64, false).unwrap();
        let back = as_float.astype(&DType::Int64, false).unwrap();
        prop_assert!(back.equals(&ix));
    }

    #[test]
    fn prop_searchsorted_position_is_a_valid_split(
        mut values in proptest::collection::vec(any::<i64>(), 0..32),
        probe in any::<i64>(),
    ) {
        values.sort_unstable();
        let ix = int_index(&values);
        let SearchPositions::One(pos) = ix.searchsorted(
            &SearchProbe::One(Scalar::Int(probe)),
            Side::Left,
            None,
        ).unwrap() else {
            panic!("scalar probe returns one position");
        };
        prop_assert!(pos <= values.len());
        prop_assert!(values[..pos].iter().all(|&v| v < probe));
        prop_assert!(values[pos..].iter().all(|&v| v >= probe));
    }

    #[test]
    fn prop_delete_preserves_survivor_order(
        values in proptest::collection::vec(any::<i64>(), 1..32),
        mask in proptest::collection::vec(any::<bool>(), 1..32),
    ) {
        let ix = int_index(&values);
        let locs: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(i, _)| mask.get(*i).copied().unwrap_or(false))
            .map(|(i, _)| i)
            .collect();
        let out = ix.delete(&locs).unwrap();

        let expected: Vec<Scalar> = values
            .iter()
            .enumerate()
            .filter(|(i, _)| !mask.get(*i).copied().unwrap_or(false))
            .map(|(_, &v)| Scalar::Int(v))
            .collect();
        prop_assert_eq!(out.data().to_scalars(), expected);
    }
}
