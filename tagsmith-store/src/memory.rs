//! The storage trait and its in-memory implementation.

use crate::Snapshot;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Persistence seam for the orchestrator.
///
/// `save` reports failure as `false` rather than an error: persistence is
/// best-effort and a failed save must never abort the edit that triggered
/// it.
pub trait Storage: Send {
    /// Stores a value, optionally expiring after `ttl`. Returns false when
    /// the value could not be persisted.
    fn save(&mut self, key: &str, value: Value, ttl: Option<Duration>) -> bool;

    /// Loads a value. Expired entries are dropped on access and read as
    /// `None`.
    fn load(&mut self, key: &str) -> Option<Value>;

    /// Removes a value. Returns false if it was absent.
    fn remove(&mut self, key: &str) -> bool;

    /// Removes everything.
    fn clear(&mut self);

    /// Explicit expiry sweep; returns the number of entries dropped.
    fn cleanup(&mut self) -> usize;

    /// Exports every live entry as a versioned snapshot.
    fn export_all(&mut self) -> Snapshot;

    /// Replaces the store contents with a snapshot's data.
    fn import_all(&mut self, snapshot: Snapshot);
}

struct StoredEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl StoredEntry {
    fn expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Map-backed store with lazy TTL expiry.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, StoredEntry>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, including not-yet-collected expired ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStore {
    fn save(&mut self, key: &str, value: Value, ttl: Option<Duration>) -> bool {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        self.entries
            .insert(key.to_string(), StoredEntry { value, expires_at });
        true
    }

    fn load(&mut self, key: &str) -> Option<Value> {
        let now = Instant::now();
        if self.entries.get(key).is_some_and(|e| e.expired(now)) {
            debug!("dropping expired entry `{key}`");
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|e| e.value.clone())
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn cleanup(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.expired(now));
        let dropped = before - self.entries.len();
        if dropped > 0 {
            debug!("cleanup dropped {dropped} expired entries");
        }
        dropped
    }

    fn export_all(&mut self) -> Snapshot {
        self.cleanup();
        let data = self
            .entries
            .iter()
            .map(|(k, e)| (k.clone(), e.value.clone()))
            .collect();
        Snapshot::new(data)
    }

    fn import_all(&mut self, snapshot: Snapshot) {
        self.entries = snapshot
            .data
            .into_iter()
            .map(|(k, value)| {
                (
                    k,
                    StoredEntry {
                        value,
                        expires_at: None,
                    },
                )
            })
            .collect();
    }
}
