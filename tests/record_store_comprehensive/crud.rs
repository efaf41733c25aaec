//! Insert, update, delete and find semantics

use cruddb::{Query, RecordId, Value};
use serde_json::json;

use crate::{id_of, rec, store_with};

#[test]
fn test_insert_returns_increasing_ids() {
    let (_backend, mut store) = store_with(&[]);
    let mut last = 0;
    for n in 0..20 {
        let id = store.insert(rec(json!({ "n": n }))).unwrap().unwrap();
        assert!(id.as_u64() > last);
        last = id.as_u64();
        if n % 3 == 0 {
            store.delete_by_id(id).unwrap();
        }
    }
    assert_eq!(last, 20);
}

#[test]
fn test_insert_rejects_every_non_object() {
    let (backend, mut store) = store_with(&[]);
    for bad in [
        Value::Null,
        Value::Bool(true),
        Value::Int(1),
        Value::Float(1.5),
        Value::from("text"),
        Value::Bytes(vec![1, 2]),
        Value::Array(vec![Value::object()]),
    ] {
        assert!(store.insert(bad).unwrap_err().is_invalid_input());
    }
    assert!(backend.is_empty());
    // no identifier was consumed
    assert_eq!(store.insert(rec(json!({}))).unwrap(), Some(RecordId::new(1)));
}

#[test]
fn test_insert_overwrites_caller_supplied_id() {
    let (_backend, mut store) = store_with(&[]);
    let id = store.insert(rec(json!({"id": 500, "x": 1}))).unwrap().unwrap();
    assert_eq!(id, RecordId::new(1));
    assert_eq!(id_of(&store.find_by_id(id).unwrap().unwrap()), 1);
}

#[test]
fn test_update_of_deleted_record_is_not_found() {
    let (_backend, mut store) = store_with(&["k"]);
    let id = store.insert(rec(json!({"k": 1}))).unwrap().unwrap();
    store.delete_by_id(id).unwrap();
    assert_eq!(store.update(id, rec(json!({"k": 2}))).unwrap(), None);
    assert!(store.find_by_query(&Query::new().eq("k", 2)).unwrap().is_empty());
}

#[test]
fn test_delete_twice_second_is_false() {
    let (_backend, mut store) = store_with(&[]);
    let id = store.insert(rec(json!({}))).unwrap().unwrap();
    assert!(store.delete_by_id(id).unwrap());
    assert!(!store.delete_by_id(id).unwrap());
}

#[test]
fn test_find_by_id_for_unknown_id_is_none() {
    let (_backend, store) = store_with(&[]);
    assert_eq!(store.find_by_id(RecordId::new(1)).unwrap(), None);
}
