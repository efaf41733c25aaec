//! Core types and traits for cruddb
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: tagged variant for record fields
//! - RecordId / Record: identifier newtype and field map
//! - Query: equality filter over record fields
//! - Error: error type hierarchy
//! - KeyValueStore: backend contract
//! - key: backend key layout (live-id key, record keys, index keys)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod query;
pub mod traits;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use query::Query;
pub use traits::KeyValueStore;
pub use types::{Record, RecordId};
pub use value::Value;
