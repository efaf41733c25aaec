//! Key-value backends for cruddb
//!
//! This crate implements the `KeyValueStore` contract with:
//! - MemoryStore: BTreeMap-based storage behind a RwLock
//! - FileStore: whole key space in one JSON file, rewritten atomically
//! - NamespacedStore: prefixes keys with a store name so stores can share a backend
//! - testing::FaultyStore: write-budget fault injection

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod file;
pub mod memory;
pub mod namespaced;
pub mod testing;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use namespaced::{NamespacedStore, NAMESPACE_SEPARATOR};
