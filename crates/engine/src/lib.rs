//! Record engine for cruddb
//!
//! This crate implements the indexing and query engine on top of any
//! `KeyValueStore` backend:
//! - RecordStore: id assignment, insert/update/delete/find/drop
//! - IndexManager: secondary index build, destroy and lookup
//! - intersect: multi-field candidate intersection
//! - LiveIds: persisted live identifier list
//! - StoreConfig: store name, unique key and indexed fields

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod index;
pub mod intersect;
pub mod live_ids;
pub mod store;

pub use config::{StoreConfig, DEFAULT_NAME, DEFAULT_UNIQUE_KEY};
pub use index::IndexManager;
pub use intersect::intersect;
pub use live_ids::LiveIds;
pub use store::RecordStore;
