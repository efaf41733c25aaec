//! Identifier and record types
//!
//! - RecordId: positive integer naming a record, assigned at insert
//! - Record: the field map carried by `Value::Object`

use crate::error::{Error, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Field map of a record, ordered by field name
pub type Record = BTreeMap<String, Value>;

/// Record identifier
///
/// IMPORTANT: RecordIds are never reused within a store instance.
/// The value is monotonically increasing and starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl RecordId {
    /// First identifier handed out by an empty store
    pub const FIRST: RecordId = RecordId(1);

    /// Create a new RecordId
    pub fn new(id: u64) -> Self {
        RecordId(id)
    }

    /// Get the underlying u64 value
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The identifier following this one
    pub fn next(&self) -> RecordId {
        RecordId(self.0 + 1)
    }

    /// Decode an identifier stored inside a record or index entry
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Int(i) if *i > 0 => Ok(RecordId(*i as u64)),
            other => Err(Error::corruption(format!(
                "expected positive Int identifier, found {}",
                other.type_name()
            ))),
        }
    }

    /// Encode for storage inside a record or index entry
    pub fn to_value(&self) -> Value {
        Value::Int(self.0 as i64)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<u64>() {
            Ok(0) => Err(Error::corruption("identifier 0 is not valid")),
            Ok(id) => Ok(RecordId(id)),
            Err(e) => Err(Error::corruption(format!(
                "invalid identifier '{}': {}",
                s, e
            ))),
        }
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId(id)
    }
}
