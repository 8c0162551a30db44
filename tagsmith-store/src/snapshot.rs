//! Versioned snapshot documents.

use crate::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tagsmith_types::FormData;

/// Snapshot document format version.
pub const SNAPSHOT_VERSION: &str = "2.0.0";

/// A versioned export of key/value data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: String,
    /// RFC 3339 creation time.
    pub timestamp: String,
    pub data: BTreeMap<String, Value>,
}

impl Snapshot {
    /// Creates a snapshot stamped with the current time.
    #[must_use]
    pub fn new(data: BTreeMap<String, Value>) -> Self {
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            data,
        }
    }
}

/// Serializes a form as a downloadable JSON document
/// (`{version, timestamp, data}`).
pub fn export_form(form: &FormData) -> StoreResult<String> {
    let document = serde_json::json!({
        "version": SNAPSHOT_VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "data": form,
    });
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parses a form document, rejecting the whole import when the top-level
/// `data` key is absent or unparsable. No partial state is produced.
pub fn import_form(json: &str) -> StoreResult<FormData> {
    let document: Value = serde_json::from_str(json)?;
    let data = document.get("data").ok_or(StoreError::MissingData)?;
    if !data.is_object() {
        return Err(StoreError::MissingData);
    }
    Ok(serde_json::from_value(data.clone())?)
}
