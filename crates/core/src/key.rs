//! Backend key layout for cruddb
//!
//! Every key the store writes falls into one of three shapes:
//! - the reserved live-id key `__data`
//! - a record key: the decimal identifier (`"17"`)
//! - an index key: `<field>:<canonical value>`
//!
//! ## Canonical value
//!
//! The canonical value is the compact, type-tagged JSON encoding of a
//! [`Value`] (`{"Int":5}`, `{"String":"red"}`, `"Null"`). Tagging keeps
//! `Int(5)` and `String("5")` in separate index entries. `-0.0` is
//! normalized first so equal floats share an entry. NaN and the infinities
//! get their own named forms (`{"Float":"+Inf"}`).

use crate::error::Result;
use crate::types::RecordId;
use crate::value::Value;

/// Reserved key holding the comma-joined live identifier list
pub const LIVE_IDS_KEY: &str = "__data";

/// Separator between field name and canonical value in index keys
pub const INDEX_SEPARATOR: char = ':';

/// Key under which the record with `id` is persisted
pub fn record_key(id: RecordId) -> String {
    id.to_string()
}

/// Canonical text of a value as used inside index keys
///
/// # Errors
///
/// Returns a serialization error if the value cannot be encoded.
pub fn canonical_value(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(&value.normalized())?)
}

/// Key of the index entry for (`field`, `value`)
///
/// # Errors
///
/// Returns a serialization error if the value cannot be encoded.
pub fn index_key(field: &str, value: &Value) -> Result<String> {
    Ok(format!(
        "{}{}{}",
        field,
        INDEX_SEPARATOR,
        canonical_value(value)?
    ))
}
