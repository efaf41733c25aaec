//! NamespacedStore: scopes a backend by store name
//!
//! Several record stores can share one backend as long as each uses a
//! different name: every key is rewritten to `<name>/<key>` before it reaches
//! the inner backend.

use cruddb_core::{Error, KeyValueStore, Result, Value};

/// Separator between namespace and key
pub const NAMESPACE_SEPARATOR: char = '/';

/// Backend wrapper that prefixes every key with a namespace
#[derive(Debug)]
pub struct NamespacedStore<S> {
    namespace: String,
    inner: S,
}

impl<S: KeyValueStore> NamespacedStore<S> {
    /// Wrap `inner`, prefixing keys with `namespace`
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if `namespace` is empty or contains the
    /// separator.
    pub fn new(namespace: impl Into<String>, inner: S) -> Result<Self> {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(Error::invalid_input("namespace must not be empty"));
        }
        if namespace.contains(NAMESPACE_SEPARATOR) {
            return Err(Error::invalid_input(format!(
                "namespace '{}' must not contain '{}'",
                namespace, NAMESPACE_SEPARATOR
            )));
        }
        Ok(Self { namespace, inner })
    }

    /// The namespace prefix
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The wrapped backend
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap into the inner backend
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}{}{}", self.namespace, NAMESPACE_SEPARATOR, key)
    }
}

impl<S: KeyValueStore> KeyValueStore for NamespacedStore<S> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        self.inner.get(&self.scoped(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.inner.set(&self.scoped(key), value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(&self.scoped(key))
    }
}
