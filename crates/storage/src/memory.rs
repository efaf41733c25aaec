//! MemoryStore: in-memory key-value backend
//!
//! This module implements the KeyValueStore trait using:
//! - `BTreeMap<String, Value>` for ordered key storage
//! - `parking_lot::RwLock` for thread-safe access
//!
//! Nothing survives the process. Used by `RecordStore::in_memory` and by
//! tests that need to inspect raw backend contents.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use cruddb_core::{KeyValueStore, Result, Value};

/// In-memory backend using BTreeMap with RwLock
///
/// Thread-safe through `parking_lot::RwLock`. Key iteration order is
/// lexicographic, which keeps `keys()` and `snapshot()` deterministic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Create a new empty MemoryStore
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store pre-populated with `entries`
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            data: RwLock::new(entries.into_iter().collect()),
        }
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// All keys in lexicographic order
    pub fn keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }

    /// Deep copy of the current contents
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.data.read().clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.data.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.data.write().remove(key);
        Ok(())
    }
}
