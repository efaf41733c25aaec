//! Record Store Comprehensive Test Suite
//!
//! End-to-end coverage of the public `cruddb` API.
//!
//! ## Modules
//!
//! - `crud`: insert/update/delete/find semantics and identifier rules
//! - `queries`: indexed, unindexed and mixed equality queries
//! - `persistence`: file-backed stores across reopen
//! - `invariants`: count, drop and index consistency properties
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test record_store_comprehensive
//! cargo test --test record_store_comprehensive queries::
//! ```

use std::sync::Arc;

use cruddb::{MemoryStore, RecordStore, StoreConfig, Value};

mod crud;
mod invariants;
mod persistence;
mod queries;

/// Route store logs to the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Build a Value from JSON
pub fn rec(v: serde_json::Value) -> Value {
    Value::from(v)
}

/// In-memory store with the given indexed fields, sharing its backend
pub fn store_with(indexed: &[&str]) -> (Arc<MemoryStore>, RecordStore<Arc<MemoryStore>>) {
    init_tracing();
    let backend = Arc::new(MemoryStore::new());
    let config = indexed
        .iter()
        .fold(StoreConfig::new("suite"), |c, f| c.with_indexed_key(*f));
    let store = RecordStore::new(config, Arc::clone(&backend)).unwrap();
    (backend, store)
}

/// Identifier field of a stored record
pub fn id_of(record: &Value) -> i64 {
    record.get("id").and_then(Value::as_int).expect("record has id")
}
