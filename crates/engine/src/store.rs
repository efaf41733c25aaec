//! RecordStore: records with auto-assigned ids and secondary indexes
//!
//! ## Design
//!
//! The store owns the live id set and the next-id counter; everything else
//! lives in the injected key-value backend:
//! - `__data`: comma-joined live ids
//! - `<id>`: the record
//! - `<field>:<canonical value>`: index entries (see [`IndexManager`])
//!
//! ## Write ordering
//!
//! - index destruction before a record is overwritten or removed
//! - index build after the new record is persisted
//! - live id list persisted after every structural change
//!
//! Backend failures propagate immediately and are not rolled back.
//!
//! ## Thread Safety
//!
//! Mutating operations take `&mut self`. Share a store across threads by
//! wrapping it in a mutex.
//!
//! # Example
//!
//! ```ignore
//! let config = StoreConfig::new("things").with_indexed_key("color");
//! let mut store = RecordStore::in_memory(config)?;
//!
//! let id = store.insert(json!({"color": "red", "size": 5}).into())?;
//! let red = store.find_by_query(&Query::new().eq("color", "red"))?;
//! store.delete_by_id(id.unwrap())?;
//! ```

use std::path::Path;

use tracing::{debug, info, warn};

use cruddb_core::key::{record_key, LIVE_IDS_KEY};
use cruddb_core::{Error, KeyValueStore, Query, RecordId, Result, Value};
use cruddb_storage::{FileStore, MemoryStore, NamespacedStore};

use crate::config::StoreConfig;
use crate::index::IndexManager;
use crate::intersect::intersect;
use crate::live_ids::LiveIds;

/// Record store over a key-value backend
#[derive(Debug)]
pub struct RecordStore<S: KeyValueStore> {
    config: StoreConfig,
    backend: S,
    index: IndexManager,
    live: LiveIds,
    next_id: RecordId,
}

impl RecordStore<NamespacedStore<MemoryStore>> {
    /// Store over a fresh in-memory backend scoped by the store name
    ///
    /// # Errors
    ///
    /// Returns an invalid input error for an invalid configuration.
    pub fn in_memory(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let backend = NamespacedStore::new(config.name.clone(), MemoryStore::new())?;
        Self::new(config, backend)
    }
}

impl RecordStore<FileStore> {
    /// Store persisted in `<dir>/<name>.json`
    ///
    /// # Errors
    ///
    /// Returns an invalid input error for an invalid configuration or a name
    /// that is not a plain file name, and propagates file errors.
    pub fn open(dir: impl AsRef<Path>, config: StoreConfig) -> Result<Self> {
        config.validate()?;
        if config.name.contains(['/', '\\']) || config.name == "." || config.name == ".." {
            return Err(Error::invalid_input(format!(
                "store name '{}' cannot be used as a file name",
                config.name
            )));
        }
        let path = dir.as_ref().join(format!("{}.json", config.name));
        let backend = FileStore::open(path)?;
        Self::new(config, backend)
    }
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Create a store over an explicit backend
    ///
    /// Loads the live id list (empty if absent) and sets the next id to one
    /// past the largest live id, or 1.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error for an invalid configuration, a
    /// corruption error if the persisted id list is malformed, and propagates
    /// backend failures.
    pub fn new(config: StoreConfig, backend: S) -> Result<Self> {
        config.validate()?;

        let live = match backend.get(LIVE_IDS_KEY)? {
            None => LiveIds::new(),
            Some(Value::String(encoded)) => LiveIds::decode(&encoded)?,
            Some(other) => {
                return Err(Error::corruption(format!(
                    "live id list holds {}, expected String",
                    other.type_name()
                )))
            }
        };
        let next_id = live.max().map(|id| id.next()).unwrap_or(RecordId::FIRST);

        info!(
            target: "cruddb::store",
            name = %config.name,
            records = live.len(),
            next_id = %next_id,
            indexed = config.indexed_keys.len(),
            "Opened record store"
        );

        Ok(Self {
            index: IndexManager::new(config.indexed_keys.clone()),
            config,
            backend,
            live,
            next_id,
        })
    }

    /// The configuration this store was built with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The underlying backend
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Unwrap into the underlying backend
    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Live identifiers in insertion order
    pub fn ids(&self) -> &[RecordId] {
        self.live.as_slice()
    }

    /// Number of live records
    pub fn count(&self) -> usize {
        self.live.len()
    }

    /// Insert a record and assign it the next identifier
    ///
    /// The identifier is written into the record's unique-key field. Returns
    /// `Ok(None)` without writing anything if the computed identifier is
    /// already live.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if `record` is not an object; propagates
    /// backend failures.
    pub fn insert(&mut self, record: Value) -> Result<Option<RecordId>> {
        let kind = record.type_name();
        let Value::Object(mut fields) = record else {
            return Err(Error::invalid_input(format!(
                "cannot insert {}, expected Object",
                kind
            )));
        };

        let id = self.next_id;
        self.next_id = id.next();
        if self.live.contains(id) {
            warn!(target: "cruddb::store", %id, "Next identifier already live, insert skipped");
            return Ok(None);
        }

        fields.insert(self.config.unique_key.clone(), id.to_value());
        let record = Value::Object(fields);

        self.backend.set(&record_key(id), record.clone())?;
        self.live.push(id);
        self.persist_live()?;
        self.index.build_index(&self.backend, id, &record)?;

        debug!(target: "cruddb::store", %id, "Record inserted");
        Ok(Some(id))
    }

    /// Replace the record stored under `id`
    ///
    /// Returns the stored record, or `Ok(None)` if `id` is not live. The
    /// record's own unique-key field is stored as given.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if `record` is not an object; propagates
    /// backend failures.
    pub fn update(&mut self, id: RecordId, record: Value) -> Result<Option<Value>> {
        if !record.is_object() {
            return Err(Error::invalid_input(format!(
                "cannot update {} with {}, expected Object",
                id,
                record.type_name()
            )));
        }
        if !self.live.contains(id) {
            return Ok(None);
        }

        self.index.destroy_index(&self.backend, id)?;
        self.backend.set(&record_key(id), record.clone())?;
        self.index.build_index(&self.backend, id, &record)?;

        debug!(target: "cruddb::store", %id, "Record updated");
        Ok(Some(record))
    }

    /// Delete the record stored under `id`
    ///
    /// Returns `false` if `id` is not live.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub fn delete_by_id(&mut self, id: RecordId) -> Result<bool> {
        if !self.live.remove(id) {
            return Ok(false);
        }

        self.index.destroy_index(&self.backend, id)?;
        self.backend.remove(&record_key(id))?;
        self.persist_live()?;

        debug!(target: "cruddb::store", %id, "Record deleted");
        Ok(true)
    }

    /// Delete every record matching `query`; returns how many were deleted
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub fn delete_by_query(&mut self, query: &Query) -> Result<usize> {
        let matches = self.resolve(query)?;
        let mut deleted = 0;
        for (id, _) in matches {
            if self.delete_by_id(id)? {
                deleted += 1;
            }
        }
        debug!(target: "cruddb::store", deleted, "Records deleted by query");
        Ok(deleted)
    }

    /// Every live record in insertion order
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub fn find(&self) -> Result<Vec<Value>> {
        let mut records = Vec::with_capacity(self.live.len());
        for id in self.live.iter() {
            if let Some(record) = self.load(id)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// The record stored under a live `id`
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub fn find_by_id(&self, id: RecordId) -> Result<Option<Value>> {
        if !self.live.contains(id) {
            return Ok(None);
        }
        self.load(id)
    }

    /// Records matching every condition of `query`, in candidate order
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub fn find_by_query(&self, query: &Query) -> Result<Vec<Value>> {
        Ok(self
            .resolve(query)?
            .into_iter()
            .map(|(_, record)| record)
            .collect())
    }

    /// Delete every record and the live id list
    ///
    /// Returns `true` once no identifier is live. Calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub fn drop(&mut self) -> Result<bool> {
        let ids: Vec<RecordId> = self.live.iter().collect();
        let total = ids.len();
        for id in ids {
            self.delete_by_id(id)?;
        }
        self.backend.remove(LIVE_IDS_KEY)?;
        self.live.clear();

        info!(target: "cruddb::store", name = %self.config.name, dropped = total, "Record store dropped");
        Ok(self.live.is_empty())
    }

    /// Resolve `query` to matching (id, record) pairs
    ///
    /// Indexed fields narrow the candidates through index lookups (intersected
    /// when there are several). Every loaded candidate is then checked against
    /// the whole query, so index hits that compare unequal (NaN) drop out.
    fn resolve(&self, query: &Query) -> Result<Vec<(RecordId, Value)>> {
        let mut per_field: Vec<Vec<RecordId>> = Vec::new();

        for (field, value) in query.iter() {
            if !self.index.is_indexed(field) {
                continue;
            }
            let ids = self.index.lookup(&self.backend, field, value)?;
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            per_field.push(ids);
        }

        let candidates: Vec<RecordId> = match per_field.len() {
            0 => self.live.as_slice().to_vec(),
            1 => per_field.into_iter().next().unwrap_or_default(),
            _ => intersect(&per_field),
        };

        let mut matches = Vec::new();
        for id in candidates {
            let Some(record) = self.load(id)? else {
                continue;
            };
            if query.matches(&record) {
                matches.push((id, record));
            }
        }
        Ok(matches)
    }

    fn load(&self, id: RecordId) -> Result<Option<Value>> {
        let record = self.backend.get(&record_key(id))?;
        if record.is_none() {
            warn!(target: "cruddb::store", %id, "No record stored for identifier, skipped");
        }
        Ok(record)
    }

    fn persist_live(&self) -> Result<()> {
        self.backend
            .set(LIVE_IDS_KEY, Value::String(self.live.encode()))
    }
}
