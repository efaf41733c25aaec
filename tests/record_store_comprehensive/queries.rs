//! Equality queries over indexed and unindexed fields

use std::collections::BTreeMap;

use cruddb::{Query, Value};
use serde_json::json;

use crate::{id_of, rec, store_with};

#[test]
fn test_color_size_scenario() {
    let (_backend, mut store) = store_with(&["color"]);
    store.insert(rec(json!({"color": "red", "size": 5}))).unwrap();
    store.insert(rec(json!({"color": "blue", "size": 5}))).unwrap();

    let ids = |q: Query| -> Vec<i64> {
        store.find_by_query(&q).unwrap().iter().map(id_of).collect()
    };
    assert_eq!(ids(Query::new().eq("color", "red")), vec![1]);
    assert_eq!(ids(Query::new().eq("color", "red").eq("size", 5)), vec![1]);
    assert_eq!(ids(Query::new().eq("size", 5)), vec![1, 2]);
}

#[test]
fn test_query_values_are_type_strict() {
    let (_backend, mut store) = store_with(&["code"]);
    store.insert(rec(json!({"code": 7, "alt": 7}))).unwrap();
    store.insert(rec(json!({"code": "7", "alt": "7"}))).unwrap();

    let indexed = store.find_by_query(&Query::new().eq("code", 7)).unwrap();
    assert_eq!(indexed.iter().map(id_of).collect::<Vec<_>>(), vec![1]);

    let scanned = store.find_by_query(&Query::new().eq("alt", "7")).unwrap();
    assert_eq!(scanned.iter().map(id_of).collect::<Vec<_>>(), vec![2]);

    assert!(store
        .find_by_query(&Query::new().eq("code", 7.0))
        .unwrap()
        .is_empty());
}

#[test]
fn test_query_on_missing_field_matches_nothing() {
    let (_backend, mut store) = store_with(&["color"]);
    store.insert(rec(json!({"color": "red"}))).unwrap();
    assert!(store
        .find_by_query(&Query::new().eq("size", Value::Null))
        .unwrap()
        .is_empty());
    assert!(store
        .find_by_query(&Query::new().eq("color", "red").eq("size", Value::Null))
        .unwrap()
        .is_empty());
}

#[test]
fn test_null_is_an_indexable_value() {
    let (_backend, mut store) = store_with(&["owner"]);
    store.insert(rec(json!({"owner": null}))).unwrap();
    store.insert(rec(json!({"owner": "ann"}))).unwrap();
    store.insert(rec(json!({}))).unwrap();

    let orphans = store.find_by_query(&Query::new().eq("owner", ())).unwrap();
    assert_eq!(orphans.iter().map(id_of).collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_query_from_json_object() {
    let (_backend, mut store) = store_with(&["color"]);
    store.insert(rec(json!({"color": "red", "size": 1}))).unwrap();
    store.insert(rec(json!({"color": "red", "size": 2}))).unwrap();

    let query = Query::try_from(rec(json!({"color": "red", "size": 2}))).unwrap();
    let found = store.find_by_query(&query).unwrap();
    assert_eq!(found.iter().map(id_of).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_three_indexed_fields_intersect() {
    let (_backend, mut store) = store_with(&["a", "b", "c"]);
    for (a, b, c) in [(1, 1, 1), (1, 1, 2), (1, 2, 1), (2, 1, 1), (1, 1, 1)] {
        store.insert(rec(json!({"a": a, "b": b, "c": c}))).unwrap();
    }
    let found = store
        .find_by_query(&Query::new().eq("a", 1).eq("b", 1).eq("c", 1))
        .unwrap();
    let mut ids: Vec<i64> = found.iter().map(id_of).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 5]);
}

fn float_record(field: &str, f: f64) -> Value {
    let mut fields = BTreeMap::new();
    fields.insert(field.to_string(), Value::Float(f));
    Value::Object(fields)
}

#[test]
fn test_infinities_do_not_share_index_entries() {
    let (_backend, mut store) = store_with(&["t"]);
    store.insert(rec(json!({}))).unwrap();
    store.insert(float_record("t", f64::NEG_INFINITY)).unwrap();
    store.insert(float_record("t", f64::INFINITY)).unwrap();

    let ids = |f: f64| -> Vec<i64> {
        store
            .find_by_query(&Query::new().eq("t", f))
            .unwrap()
            .iter()
            .map(id_of)
            .collect()
    };
    assert_eq!(ids(f64::INFINITY), vec![3]);
    assert_eq!(ids(f64::NEG_INFINITY), vec![2]);
    assert!(store.find_by_query(&Query::new().eq("t", ())).unwrap().is_empty());
}

#[test]
fn test_nan_never_matches_a_query() {
    let (_backend, mut store) = store_with(&["t"]);
    let mut record = float_record("t", f64::NAN);
    record
        .as_object_mut()
        .unwrap()
        .insert("u".to_string(), Value::Float(f64::NAN));
    store.insert(record).unwrap();

    // NaN != NaN, indexed or not
    assert!(store
        .find_by_query(&Query::new().eq("t", f64::NAN))
        .unwrap()
        .is_empty());
    assert!(store
        .find_by_query(&Query::new().eq("u", f64::NAN))
        .unwrap()
        .is_empty());
    assert_eq!(store.find().unwrap().len(), 1);
}
