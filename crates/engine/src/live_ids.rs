//! Live identifier set
//!
//! Ordered set of the identifiers of existing records. Order is insertion
//! order and only matters for `find()` output. Persisted under the reserved
//! key as a comma-joined decimal string (`"1,2,5"`); an empty string or a
//! missing key is an empty set.

use std::collections::HashSet;

use cruddb_core::{Error, RecordId, Result};

/// Insertion-ordered set of live identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveIds {
    order: Vec<RecordId>,
    members: HashSet<RecordId>,
}

impl LiveIds {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the persisted comma-joined form
    ///
    /// # Errors
    ///
    /// Returns a corruption error for non-numeric, zero or repeated entries.
    pub fn decode(encoded: &str) -> Result<Self> {
        let mut ids = LiveIds::new();
        if encoded.trim().is_empty() {
            return Ok(ids);
        }
        for part in encoded.split(',') {
            let id: RecordId = part.parse()?;
            if !ids.push(id) {
                return Err(Error::corruption(format!(
                    "identifier {} listed twice in live id set",
                    id
                )));
            }
        }
        Ok(ids)
    }

    /// Encode as comma-joined decimal identifiers
    pub fn encode(&self) -> String {
        self.order
            .iter()
            .map(RecordId::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Append `id`; returns false (and changes nothing) if already present
    pub fn push(&mut self, id: RecordId) -> bool {
        if !self.members.insert(id) {
            return false;
        }
        self.order.push(id);
        true
    }

    /// Remove `id`; returns false if it was not present
    pub fn remove(&mut self, id: RecordId) -> bool {
        if !self.members.remove(&id) {
            return false;
        }
        if let Some(pos) = self.order.iter().position(|&x| x == id) {
            self.order.remove(pos);
        }
        true
    }

    /// Whether `id` is live
    pub fn contains(&self, id: RecordId) -> bool {
        self.members.contains(&id)
    }

    /// Largest live identifier
    pub fn max(&self) -> Option<RecordId> {
        self.order.iter().copied().max()
    }

    /// Number of live identifiers
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no identifiers are live
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Identifiers in insertion order
    pub fn as_slice(&self) -> &[RecordId] {
        &self.order
    }

    /// Iterate identifiers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.order.iter().copied()
    }

    /// Forget every identifier
    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}
