//! Equality queries over record fields
//!
//! Supports only top-level field equality. All conditions must match (AND
//! semantics). Range and partial matching are out of scope.

use crate::error::{Error, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Equality filter: field name -> exact expected value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Field equality conditions, iterated in field-name order
    pub equals: BTreeMap<String, Value>,
}

impl Query {
    /// Create an empty query (matches every record)
    pub fn new() -> Self {
        Query {
            equals: BTreeMap::new(),
        }
    }

    /// Add an equality condition
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.equals.insert(field.into(), value.into());
        self
    }

    /// Check if a record satisfies every condition
    ///
    /// A missing field never matches, not even `Null`.
    pub fn matches(&self, record: &Value) -> bool {
        self.equals
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    }

    /// Check if query is empty (matches all)
    pub fn is_empty(&self) -> bool {
        self.equals.is_empty()
    }

    /// Get the number of conditions in the query
    pub fn len(&self) -> usize {
        self.equals.len()
    }

    /// Iterate conditions in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.equals.iter()
    }
}

impl TryFrom<Value> for Query {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(equals) => Ok(Query { equals }),
            other => Err(Error::invalid_input(format!(
                "query must be an Object, got {}",
                other.type_name()
            ))),
        }
    }
}
