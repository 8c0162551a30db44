//! The field-value map owned by the orchestrator.
//!
//! A `BTreeMap` rather than a `HashMap` so iteration order is stable: tag
//! generation walks the map and must be byte-identical for identical input.

use crate::{FieldValue, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The current value of every field the user has touched.
///
/// Mutated only through the orchestrator's single field-change entry point.
/// All other components receive read-only snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    fields: BTreeMap<String, FieldValue>,
}

impl FormData {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for a field, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns the text content of a field, if set and text-shaped.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FieldValue::as_str)
    }

    /// Returns the text content of a field when it is present and non-empty.
    #[must_use]
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get_str(name)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Whether a field is present with a non-empty value.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|v| !v.is_empty())
    }

    /// Sets a field value, returning the previous value if any.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.fields.insert(name.into(), value.into())
    }

    /// Removes a field, returning its value if it was set.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Number of fields with a recorded value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field has a recorded value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in key order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Builds a map that keeps only the fields the predicate accepts.
    ///
    /// Used by the orchestrator to hand generators a visibility-filtered
    /// snapshot.
    #[must_use]
    pub fn filtered(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|(k, _)| keep(k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Parses a map from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the map to a JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromIterator<(String, FieldValue)> for FormData {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
