//! File-backed stores across reopen

use cruddb::{FileStore, KeyValueStore, Query, RecordId, RecordStore, StoreConfig, Value};
use serde_json::json;
use tempfile::TempDir;

use crate::{id_of, init_tracing, rec};

#[test]
fn test_records_and_indexes_survive_reopen() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new("notes").with_indexed_key("tag");

    {
        let mut store = RecordStore::open(dir.path(), config.clone()).unwrap();
        store.insert(rec(json!({"tag": "work", "body": "a"}))).unwrap();
        store.insert(rec(json!({"tag": "home", "body": "b"}))).unwrap();
        let id = store.insert(rec(json!({"tag": "work", "body": "c"}))).unwrap().unwrap();
        store.update(id, rec(json!({"id": 3, "tag": "home", "body": "c"}))).unwrap();
    }

    let store = RecordStore::open(dir.path(), config).unwrap();
    assert_eq!(store.count(), 3);
    let home: Vec<i64> = store
        .find_by_query(&Query::new().eq("tag", "home"))
        .unwrap()
        .iter()
        .map(id_of)
        .collect();
    assert_eq!(home, vec![2, 3]);
}

#[test]
fn test_drop_clears_file_contents() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new("tmp").with_indexed_key("k");
    {
        let mut store = RecordStore::open(dir.path(), config.clone()).unwrap();
        store.insert(rec(json!({"k": 1}))).unwrap();
        store.insert(rec(json!({"k": 2}))).unwrap();
        assert!(store.drop().unwrap());
    }
    let file = FileStore::open(dir.path().join("tmp.json")).unwrap();
    assert!(file.is_empty());
    assert_eq!(file.get("__data").unwrap(), None);
}

#[test]
fn test_two_named_stores_in_one_directory() {
    let dir = TempDir::new().unwrap();
    let mut a = RecordStore::open(dir.path(), StoreConfig::new("a")).unwrap();
    let mut b = RecordStore::open(dir.path(), StoreConfig::new("b")).unwrap();
    a.insert(rec(json!({}))).unwrap();
    b.insert(rec(json!({}))).unwrap();
    b.insert(rec(json!({}))).unwrap();
    assert_eq!(a.count(), 1);
    assert_eq!(b.count(), 2);
}

#[test]
fn test_special_floats_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new("floats").with_indexed_key("t");
    let values = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY];

    {
        let mut store = RecordStore::open(dir.path(), config.clone()).unwrap();
        for f in values {
            let mut fields = std::collections::BTreeMap::new();
            fields.insert("t".to_string(), Value::Float(f));
            store.insert(Value::Object(fields)).unwrap();
        }
    }

    let store = RecordStore::open(dir.path(), config).unwrap();
    assert_eq!(store.count(), 3);
    for (n, f) in values.iter().enumerate() {
        let record = store.find_by_id(RecordId::new(n as u64 + 1)).unwrap().unwrap();
        match record.get("t") {
            Some(Value::Float(stored)) if f.is_nan() => assert!(stored.is_nan()),
            Some(Value::Float(stored)) => assert_eq!(stored, f),
            other => panic!("unexpected {:?}", other),
        }
    }

    let pos = store
        .find_by_query(&Query::new().eq("t", f64::INFINITY))
        .unwrap();
    assert_eq!(pos.iter().map(id_of).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_into_backend_keeps_file_contents() {
    let dir = TempDir::new().unwrap();
    let mut store = RecordStore::open(dir.path(), StoreConfig::new("kept")).unwrap();
    store.insert(rec(json!({"a": 1}))).unwrap();

    let file = store.into_backend();
    assert_eq!(file.path(), dir.path().join("kept.json"));
    assert_eq!(file.get("__data").unwrap(), Some(Value::from("1")));
}
