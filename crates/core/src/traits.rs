//! Core trait for the key-value backend
//!
//! This module defines the KeyValueStore trait that lets the record store run
//! over any persistence layer (in-memory map, file, remote store) without
//! changing the indexing and query engine.

use std::sync::Arc;

use crate::error::Result;
use crate::value::Value;

/// Key-value backend abstraction
///
/// The store treats the backend as a synchronous, reliable-per-call
/// dependency. Any error returned here propagates unchanged to the caller of
/// the store operation; nothing is retried.
///
/// Thread safety: implementations use interior mutability and must be
/// `Send + Sync`, so one backend can be shared behind an `Arc`.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`
    ///
    /// Returns None if the key doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend operation fails.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend operation fails.
    fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backend operation fails.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
