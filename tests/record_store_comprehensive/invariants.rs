//! Store-wide properties

use cruddb::{intersect, Query, RecordId};
use proptest::prelude::*;
use serde_json::json;

use crate::{rec, store_with};

#[test]
fn test_count_matches_find() {
    let (_backend, mut store) = store_with(&["p"]);
    for n in 0..10 {
        store.insert(rec(json!({"p": n % 3}))).unwrap();
    }
    store.delete_by_query(&Query::new().eq("p", 1)).unwrap();
    assert_eq!(store.count(), store.find().unwrap().len());
    assert_eq!(store.count(), 7);
}

#[test]
fn test_drop_then_drop_again() {
    let (backend, mut store) = store_with(&["p"]);
    for n in 0..4 {
        store.insert(rec(json!({"p": n}))).unwrap();
    }
    assert!(store.drop().unwrap());
    assert!(store.drop().unwrap());
    assert_eq!(store.count(), 0);
    assert!(store.find().unwrap().is_empty());
    assert!(backend.is_empty());
}

proptest! {
    #[test]
    fn test_intersection_holds_exactly_common_ids(
        a in prop::collection::vec(1u64..30, 0..25),
        b in prop::collection::vec(1u64..30, 0..25),
    ) {
        let left: Vec<RecordId> = a.iter().copied().map(RecordId::new).collect();
        let right: Vec<RecordId> = b.iter().copied().map(RecordId::new).collect();
        let out = intersect(&[left.clone(), right.clone()]);

        for id in &out {
            prop_assert!(left.contains(id) && right.contains(id));
        }
        for id in &left {
            if right.contains(id) {
                prop_assert_eq!(out.iter().filter(|x| *x == id).count(), 1);
            }
        }
    }

    #[test]
    fn test_round_trip_any_flat_record(
        fields in prop::collection::btree_map("[a-z]{1,6}", any::<i32>(), 0..6),
    ) {
        let (_backend, mut store) = store_with(&[]);
        let mut original = serde_json::Map::new();
        for (k, v) in &fields {
            if k != "id" {
                original.insert(k.clone(), json!(v));
            }
        }
        let id = store.insert(rec(serde_json::Value::Object(original.clone()))).unwrap().unwrap();

        original.insert("id".to_string(), json!(id.as_u64()));
        prop_assert_eq!(
            store.find_by_id(id).unwrap(),
            Some(rec(serde_json::Value::Object(original)))
        );
    }
}
