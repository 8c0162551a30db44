//! The state manager.

use crate::{StateEntry, StateOp, UNDO_CAPACITY};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tagsmith_types::Timestamp;
use tracing::debug;

/// Path that matches every change.
pub const WILDCARD: &str = "*";

/// Handle identifying one subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Derives a computed value from the raw key/value map.
pub type ComputeFn = Arc<dyn Fn(&HashMap<String, Value>) -> Value + Send + Sync>;

type StateCallback = Arc<dyn Fn(&StateEntry) + Send + Sync>;

struct Subscriber {
    id: SubscriberId,
    path: String,
    callback: StateCallback,
}

struct ComputedEntry {
    deps: Vec<String>,
    calc: ComputeFn,
    value: Value,
}

/// Keyed mutable store with change notification and bounded undo.
///
/// Single-owner by design: the orchestrator holds the only mutable handle,
/// matching the single-threaded dispatch model. Subscriber callbacks receive
/// shared references and cannot mutate the store reentrantly.
#[derive(Default)]
pub struct StateManager {
    values: HashMap<String, Value>,
    computed: HashMap<String, ComputedEntry>,
    history: VecDeque<StateEntry>,
    subscribers: Vec<Subscriber>,
    pending: Vec<StateEntry>,
    batch_depth: u32,
    next_subscriber: u64,
    clock: Timestamp,
}

impl StateManager {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Timestamp::now(),
            ..Self::default()
        }
    }

    // ── Access ───────────────────────────────────────────────────

    /// Returns the value at a key, or the current value of a computed entry.
    ///
    /// Unknown or malformed keys return `None` rather than failing.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.values
            .get(path)
            .or_else(|| self.computed.get(path).map(|c| &c.value))
    }

    /// Whether a key holds a value (stored or computed).
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.values.contains_key(path) || self.computed.contains_key(path)
    }

    /// All stored keys, in arbitrary order. Computed keys are not included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    // ── Mutation ─────────────────────────────────────────────────

    /// Sets a key to a value, recording the change for undo.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let new = value.into();
        let old = self.values.get(path).cloned();
        let entry = self.record(path, old, Some(new.clone()), StateOp::Set);
        self.values.insert(path.to_string(), new);
        self.after_apply(entry);
    }

    /// Shallow-merges an object onto the current value at a key.
    ///
    /// The previous value seeds the merge when it is an object; otherwise the
    /// merge starts from an empty object. A non-object `partial` behaves like
    /// [`StateManager::set`]. Undo restores the whole previous value.
    pub fn update(&mut self, path: &str, partial: Value) {
        let Value::Object(partial_map) = partial else {
            self.set(path, partial);
            return;
        };

        let old = self.values.get(path).cloned();
        let mut merged = match &old {
            Some(Value::Object(map)) => map.clone(),
            _ => serde_json::Map::new(),
        };
        for (k, v) in partial_map {
            merged.insert(k, v);
        }
        let new = Value::Object(merged);

        let entry = self.record(path, old, Some(new.clone()), StateOp::Update);
        self.values.insert(path.to_string(), new);
        self.after_apply(entry);
    }

    /// Removes a key. Removing an absent key is a no-op and records nothing.
    pub fn delete(&mut self, path: &str) -> bool {
        let Some(old) = self.values.get(path).cloned() else {
            return false;
        };
        let entry = self.record(path, Some(old), None, StateOp::Delete);
        self.values.remove(path);
        self.after_apply(entry);
        true
    }

    // ── Undo ─────────────────────────────────────────────────────

    /// Reverts the most recent mutation. Returns false on empty history.
    ///
    /// The restore re-notifies subscribers but does not itself append
    /// history, so repeated undo walks strictly backwards.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.pop_back() else {
            return false;
        };
        debug!("undoing {:?} on `{}`", entry.op, entry.key);

        match &entry.old {
            Some(old) => {
                self.values.insert(entry.key.clone(), old.clone());
            }
            None => {
                self.values.remove(&entry.key);
            }
        }

        self.clock = self.clock.tick();
        let notification = StateEntry {
            key: entry.key,
            old: entry.new,
            new: entry.old,
            timestamp: self.clock,
            op: entry.op,
        };
        self.after_apply(notification);
        true
    }

    /// Number of undo steps currently available.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The recorded history, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<StateEntry> {
        self.history.iter().cloned().collect()
    }

    // ── Subscriptions ────────────────────────────────────────────

    /// Subscribes to changes of one key, or every change via [`WILDCARD`].
    pub fn subscribe(
        &mut self,
        path: &str,
        callback: impl Fn(&StateEntry) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.next_subscriber += 1;
        let id = SubscriberId(self.next_subscriber);
        self.subscribers.push(Subscriber {
            id,
            path: path.to_string(),
            callback: Arc::new(callback),
        });
        id
    }

    /// Removes a subscriber. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    // ── Batching ─────────────────────────────────────────────────

    /// Runs `f` with notifications suppressed, then flushes them in original
    /// order, one per change, never coalesced.
    ///
    /// Nested batches flush when the outermost one closes.
    pub fn batch(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth += 1;
        f(self);
        self.batch_depth -= 1;

        if self.batch_depth == 0 && !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            debug!("flushing {} batched notifications", pending.len());
            for entry in &pending {
                self.notify(entry);
            }
        }
    }

    // ── Computed entries ─────────────────────────────────────────

    /// Registers a computed entry with an explicit dependency list.
    ///
    /// The value is computed immediately and refreshed whenever one of the
    /// named dependency keys changes. Refreshes notify subscribers with
    /// [`StateOp::Computed`] and never enter undo history. Computed entries
    /// may not depend on other computed entries.
    pub fn register_computed(&mut self, key: &str, deps: Vec<String>, calc: ComputeFn) {
        let value = calc(&self.values);
        self.computed.insert(
            key.to_string(),
            ComputedEntry { deps, calc, value },
        );
    }

    /// Removes a computed entry.
    pub fn unregister_computed(&mut self, key: &str) -> bool {
        self.computed.remove(key).is_some()
    }

    // ── Internals ────────────────────────────────────────────────

    /// Builds and appends a history entry, evicting the oldest when full.
    fn record(
        &mut self,
        key: &str,
        old: Option<Value>,
        new: Option<Value>,
        op: StateOp,
    ) -> StateEntry {
        self.clock = self.clock.tick();
        let entry = StateEntry {
            key: key.to_string(),
            old,
            new,
            timestamp: self.clock,
            op,
        };
        if self.history.len() == UNDO_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(entry.clone());
        entry
    }

    /// Refreshes dependent computed entries, then queues or delivers the
    /// notification.
    fn after_apply(&mut self, entry: StateEntry) {
        let refreshed = self.refresh_computed(&entry.key);
        self.dispatch(entry);
        for notification in refreshed {
            self.dispatch(notification);
        }
    }

    /// Recomputes entries that depend on `changed_key`; returns notifications
    /// for those whose value actually changed.
    fn refresh_computed(&mut self, changed_key: &str) -> Vec<StateEntry> {
        let mut notifications = Vec::new();
        let keys: Vec<String> = self
            .computed
            .iter()
            .filter(|(_, c)| c.deps.iter().any(|d| d == changed_key))
            .map(|(k, _)| k.clone())
            .collect();

        for key in keys {
            let calc = Arc::clone(&self.computed[&key].calc);
            let new = calc(&self.values);
            let slot = self.computed.get_mut(&key).expect("computed entry exists");
            if slot.value != new {
                let old = std::mem::replace(&mut slot.value, new.clone());
                self.clock = self.clock.tick();
                notifications.push(StateEntry {
                    key,
                    old: Some(old),
                    new: Some(new),
                    timestamp: self.clock,
                    op: StateOp::Computed,
                });
            }
        }
        notifications
    }

    fn dispatch(&mut self, entry: StateEntry) {
        if self.batch_depth > 0 {
            self.pending.push(entry);
        } else {
            self.notify(&entry);
        }
    }

    fn notify(&self, entry: &StateEntry) {
        let matching: Vec<StateCallback> = self
            .subscribers
            .iter()
            .filter(|s| s.path == WILDCARD || s.path == entry.key)
            .map(|s| Arc::clone(&s.callback))
            .collect();
        for callback in matching {
            callback(entry);
        }
    }
}
