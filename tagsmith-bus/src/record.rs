//! Published event records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tagsmith_types::Timestamp;
use uuid::Uuid;

/// Unique identifier for a published event.
/// Uses UUID v7 which embeds a timestamp for natural ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new event ID with the current timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One published event: what happened, with what payload, when.
///
/// Records are immutable once published; listeners receive references (sync)
/// or clones (async) and the history ring keeps the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique identifier for this publish.
    pub id: EventId,
    /// The event name, e.g. `field:changed`.
    pub name: String,
    /// Arbitrary JSON payload.
    pub payload: serde_json::Value,
    /// When the event was published.
    pub timestamp: Timestamp,
}

impl EventRecord {
    /// Creates a record for an event being published now.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            name: name.into(),
            payload,
            timestamp: Timestamp::now(),
        }
    }
}
