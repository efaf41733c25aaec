//! Secondary indexes over record fields
//!
//! Each declared indexed field gets one persisted entry per distinct value:
//! key `<field>:<canonical value>`, value an array of record identifiers.
//!
//! # Invariants
//!
//! - An id is in the entry for (field, value) iff the record exists and
//!   `record[field] == value`
//! - Entries are never empty; the last removal deletes the key
//! - `destroy_index` runs against the stored record before it is overwritten or
//!   removed, `build_index` after the new record is persisted
//!
//! Index maintenance is a sequence of backend calls with no rollback. A
//! backend failure part way through leaves entries that may disagree with the
//! record set.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use cruddb_core::key::{index_key, record_key};
use cruddb_core::{Error, KeyValueStore, RecordId, Result, Value};

/// Maintains and resolves secondary index entries
#[derive(Debug, Clone, Default)]
pub struct IndexManager {
    indexed: BTreeSet<String>,
}

impl IndexManager {
    /// Create a manager for the given indexed fields
    pub fn new(indexed: BTreeSet<String>) -> Self {
        Self { indexed }
    }

    /// Whether `field` carries an index
    pub fn is_indexed(&self, field: &str) -> bool {
        self.indexed.contains(field)
    }

    /// Declared indexed fields in name order
    pub fn indexed_fields(&self) -> impl Iterator<Item = &str> {
        self.indexed.iter().map(String::as_str)
    }

    /// Declared indexed fields that are present on `record`, with their values
    fn indexed_values<'a>(&'a self, record: &'a Value) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.indexed
            .iter()
            .filter_map(move |field| record.get(field).map(|v| (field.as_str(), v)))
    }

    /// Add `id` to the entry of every indexed field present on `record`
    ///
    /// # Errors
    ///
    /// Propagates backend failures and corrupt entries.
    pub fn build_index<S: KeyValueStore + ?Sized>(
        &self,
        backend: &S,
        id: RecordId,
        record: &Value,
    ) -> Result<()> {
        for (field, value) in self.indexed_values(record) {
            let key = index_key(field, value)?;
            let mut ids = load_entry(backend, &key)?.unwrap_or_default();
            if ids.contains(&id) {
                continue;
            }
            ids.push(id);
            trace!(target: "cruddb::index", %key, %id, len = ids.len(), "Index entry extended");
            backend.set(&key, encode_entry(&ids))?;
        }
        debug!(target: "cruddb::index", %id, "Index built");
        Ok(())
    }

    /// Remove `id` from the entries derived from its currently stored record
    ///
    /// No-op when nothing is stored under `id`.
    ///
    /// # Errors
    ///
    /// Propagates backend failures and corrupt entries.
    pub fn destroy_index<S: KeyValueStore + ?Sized>(&self, backend: &S, id: RecordId) -> Result<()> {
        let Some(stored) = backend.get(&record_key(id))? else {
            return Ok(());
        };

        for (field, value) in self.indexed_values(&stored) {
            let key = index_key(field, value)?;
            let Some(mut ids) = load_entry(backend, &key)? else {
                continue;
            };
            let Some(pos) = ids.iter().position(|&x| x == id) else {
                continue;
            };
            ids.remove(pos);
            if ids.is_empty() {
                trace!(target: "cruddb::index", %key, "Index entry removed");
                backend.remove(&key)?;
            } else {
                trace!(target: "cruddb::index", %key, %id, len = ids.len(), "Index entry shrunk");
                backend.set(&key, encode_entry(&ids))?;
            }
        }
        debug!(target: "cruddb::index", %id, "Index destroyed");
        Ok(())
    }

    /// Identifiers whose record holds `value` in `field`
    ///
    /// A missing entry means no record matches and yields an empty list.
    ///
    /// # Errors
    ///
    /// Propagates backend failures and corrupt entries.
    pub fn lookup<S: KeyValueStore + ?Sized>(
        &self,
        backend: &S,
        field: &str,
        value: &Value,
    ) -> Result<Vec<RecordId>> {
        let key = index_key(field, value)?;
        Ok(load_entry(backend, &key)?.unwrap_or_default())
    }
}

fn encode_entry(ids: &[RecordId]) -> Value {
    Value::Array(ids.iter().map(RecordId::to_value).collect())
}

fn load_entry<S: KeyValueStore + ?Sized>(backend: &S, key: &str) -> Result<Option<Vec<RecordId>>> {
    match backend.get(key)? {
        None => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(RecordId::from_value)
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(other) => Err(Error::corruption(format!(
            "index entry '{}' holds {}, expected Array",
            key,
            other.type_name()
        ))),
    }
}
