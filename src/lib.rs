//! cruddb - embedded record store with secondary indexes
//!
//! Records are objects keyed by an auto-incrementing identifier. Chosen
//! fields get secondary indexes; queries intersect index hits and fall back
//! to a linear scan for unindexed fields. Persistence goes through any
//! `KeyValueStore` backend.
//!
//! # Quick Start
//!
//! ```ignore
//! use cruddb::{Query, RecordStore, StoreConfig, Value};
//!
//! let config = StoreConfig::new("inventory").with_indexed_key("color");
//! let mut store = RecordStore::in_memory(config)?;
//!
//! let id = store.insert(serde_json::json!({"color": "red", "size": 5}).into())?;
//! let red = store.find_by_query(&Query::new().eq("color", "red"))?;
//! ```
//!
//! # Architecture
//!
//! - `cruddb-core`: values, identifiers, queries, errors, backend contract
//! - `cruddb-storage`: memory, file and namespaced backends
//! - `cruddb-engine`: record store, index manager, intersection

pub use cruddb_core::key;
pub use cruddb_core::{Error, KeyValueStore, Query, Record, RecordId, Result, Value};
pub use cruddb_engine::{intersect, IndexManager, LiveIds, RecordStore, StoreConfig};
pub use cruddb_storage::{testing, FileStore, MemoryStore, NamespacedStore};
