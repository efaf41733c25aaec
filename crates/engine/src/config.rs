//! Store configuration
//!
//! A `StoreConfig` is fixed for the lifetime of a `RecordStore`: the store
//! name, the unique-key field and the set of indexed fields. It can be built
//! in code or loaded from TOML.
//!
//! ```toml
//! name = "inventory"
//! unique_key = "id"
//! indexed_keys = ["color", "owner"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use cruddb_core::{Error, Result};

/// Default store name
pub const DEFAULT_NAME: &str = "database";

/// Default unique-key field
pub const DEFAULT_UNIQUE_KEY: &str = "id";

/// Configuration for a record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Store name, used to namespace keys in shared backends and to name files
    #[serde(default = "default_name")]
    pub name: String,
    /// Fields that get a secondary index
    #[serde(default)]
    pub indexed_keys: BTreeSet<String>,
    /// Field that receives the record identifier on insert
    #[serde(default = "default_unique_key")]
    pub unique_key: String,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_unique_key() -> String {
    DEFAULT_UNIQUE_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            indexed_keys: BTreeSet::new(),
            unique_key: default_unique_key(),
        }
    }
}

impl StoreConfig {
    /// Default configuration with the given store name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an indexed field
    pub fn with_indexed_key(mut self, field: impl Into<String>) -> Self {
        self.indexed_keys.insert(field.into());
        self
    }

    /// Replace the unique-key field
    pub fn with_unique_key(mut self, field: impl Into<String>) -> Self {
        self.unique_key = field.into();
        self
    }

    /// Whether `field` carries a secondary index
    pub fn is_indexed(&self, field: &str) -> bool {
        self.indexed_keys.contains(field)
    }

    /// Check the configuration before a store is built from it
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if the name or the unique key is empty.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::invalid_input("store name must not be empty"));
        }
        if self.unique_key.is_empty() {
            return Err(Error::invalid_input("unique_key must not be empty"));
        }
        if self.indexed_keys.iter().any(String::is_empty) {
            return Err(Error::invalid_input("indexed field names must not be empty"));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if the document does not parse or fails
    /// validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StoreConfig = toml::from_str(content)
            .map_err(|e| Error::invalid_input(format!("Failed to parse store config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or an invalid input
    /// error if it cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::InvalidInput(msg) => {
                Error::invalid_input(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Serialize this config to TOML and write it to the given path.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the config cannot be encoded as TOML,
    /// or an I/O error if the file cannot be written.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
