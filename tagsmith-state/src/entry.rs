//! Undo history entries.

use serde::{Deserialize, Serialize};
use tagsmith_types::Timestamp;

/// Maximum number of undo entries retained.
pub const UNDO_CAPACITY: usize = 50;

/// The kind of mutation a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateOp {
    /// Whole-value replacement.
    Set,
    /// Shallow merge onto the previous object value.
    Update,
    /// Key removal.
    Delete,
    /// Computed-entry refresh. Notification-only; never enters undo history.
    Computed,
}

/// One recorded state change.
///
/// `update` records the whole old and new value, not a diff, so undo is a
/// plain restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEntry {
    /// The key that changed.
    pub key: String,
    /// Value before the change; `None` when the key did not exist.
    pub old: Option<serde_json::Value>,
    /// Value after the change; `None` for deletions.
    pub new: Option<serde_json::Value>,
    /// When the change was recorded.
    pub timestamp: Timestamp,
    /// What kind of mutation this was.
    pub op: StateOp,
}
