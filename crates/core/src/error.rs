//! Error types for cruddb
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! "Not found" is never an error here: absent identifiers are reported as
//! `Ok(None)` or `Ok(false)` by the store.

use std::io;
use thiserror::Error;

/// Result type alias for cruddb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cruddb
#[derive(Debug, Error)]
pub enum Error {
    /// Caller passed something the store cannot accept (e.g. a non-object record)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Key-value backend refused or failed an operation
    #[error("Backend failure: {0}")]
    Backend(String),

    /// I/O error (file-backed backends)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Persisted state does not decode into what the store expects
    #[error("Data corruption: {0}")]
    Corruption(String),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a backend failure error
    pub fn backend(msg: impl Into<String>) -> Self {
        Error::Backend(msg.into())
    }

    /// Create a corruption error
    pub fn corruption(msg: impl Into<String>) -> Self {
        Error::Corruption(msg.into())
    }

    /// True for errors raised before any mutation because of bad arguments
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// True for errors that originate in the key-value backend
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            Error::Backend(_) | Error::Io(_) | Error::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
