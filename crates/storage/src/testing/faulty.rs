//! Fault injection for backend failure testing
//!
//! `FaultyStore` wraps a real backend and starts refusing writes once a write
//! budget is spent. Reads keep working so tests can inspect the partial state
//! left behind by an interrupted store operation.
//!
//! # Example
//!
//! ```ignore
//! use cruddb_storage::{MemoryStore, testing::FaultyStore};
//!
//! let store = FaultyStore::new(MemoryStore::new()).fail_after_writes(2);
//! store.set("a", Value::Int(1))?;   // ok
//! store.set("b", Value::Int(2))?;   // ok
//! store.set("c", Value::Int(3));    // Err(Error::Backend(..))
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use cruddb_core::{Error, KeyValueStore, Result, Value};

/// Backend wrapper that fails writes after a budget
#[derive(Debug)]
pub struct FaultyStore<S> {
    inner: S,
    /// Writes (set or remove) allowed before failures start; None = unlimited
    budget: Option<usize>,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    failures: AtomicUsize,
}

impl<S: KeyValueStore> FaultyStore<S> {
    /// Wrap `inner` with no faults armed
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            budget: None,
            writes: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
            failures: AtomicUsize::new(0),
        }
    }

    /// Allow `n` successful writes, then fail every further write
    pub fn fail_after_writes(mut self, n: usize) -> Self {
        self.budget = Some(n);
        self
    }

    /// Make every read fail from now on
    pub fn fail_reads(&self, enabled: bool) {
        self.fail_reads.store(enabled, Ordering::SeqCst);
    }

    /// Number of writes that reached the inner backend
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of operations refused so far
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    /// The wrapped backend
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn admit_write(&self, op: &str, key: &str) -> Result<()> {
        if let Some(budget) = self.budget {
            if self.writes.load(Ordering::SeqCst) >= budget {
                self.failures.fetch_add(1, Ordering::SeqCst);
                return Err(Error::backend(format!(
                    "injected failure on {} '{}'",
                    op, key
                )));
            }
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl<S: KeyValueStore> KeyValueStore for FaultyStore<S> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            self.failures.fetch_add(1, Ordering::SeqCst);
            return Err(Error::backend(format!("injected failure on get '{}'", key)));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.admit_write("set", key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.admit_write("remove", key)?;
        self.inner.remove(key)
    }
}
