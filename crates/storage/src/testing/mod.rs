//! Testing utilities for backend failure scenarios
//!
//! - **FaultyStore**: backend wrapper that refuses writes after a budget, used
//!   to check that backend failures propagate out of store operations
//!
//! # Example
//!
//! ```ignore
//! use cruddb_storage::testing::FaultyStore;
//!
//! let backend = FaultyStore::new(MemoryStore::new()).fail_after_writes(3);
//! ```

mod faulty;

pub use faulty::FaultyStore;
