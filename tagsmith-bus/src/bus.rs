//! The event bus.

use crate::history::EventHistory;
use crate::{BusError, BusResult, EventRecord, Middleware, Verdict};
use futures::future::{join_all, BoxFuture};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tracing::{debug, warn};

/// A synchronous listener callback.
///
/// Returning an error is the listener's way of "throwing": the bus logs it
/// and keeps dispatching to siblings.
pub type Callback = Arc<dyn Fn(&EventRecord) -> anyhow::Result<()> + Send + Sync>;

/// An asynchronous listener callback, run concurrently on
/// [`EventBus::publish_async`].
pub type AsyncCallback =
    Arc<dyn Fn(EventRecord) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// What happened during one publish call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Listeners that ran and returned `Ok`.
    pub delivered: usize,
    /// Listeners that ran and returned an error.
    pub failed: usize,
    /// Async listeners not run because the publish was synchronous.
    pub skipped_async: usize,
    /// Whether a middleware vetoed dispatch.
    pub vetoed: bool,
}

enum ListenerKind {
    Sync(Callback),
    Async(AsyncCallback),
}

impl Clone for ListenerKind {
    fn clone(&self) -> Self {
        match self {
            Self::Sync(cb) => Self::Sync(Arc::clone(cb)),
            Self::Async(cb) => Self::Async(Arc::clone(cb)),
        }
    }
}

struct Registration {
    id: ListenerId,
    priority: i32,
    seq: u64,
    once: bool,
    kind: ListenerKind,
}

#[derive(Default)]
struct Inner {
    listeners: HashMap<String, Vec<Registration>>,
    middleware: Vec<Arc<dyn Middleware>>,
    history: EventHistory,
    next_id: u64,
    next_seq: u64,
}

/// Publish/subscribe hub with priority ordering, middleware, and history.
///
/// All methods take `&self`; the registry lives behind a mutex that is never
/// held while listener or middleware code runs, so listeners may freely
/// publish or (un)subscribe reentrantly.
pub struct EventBus {
    inner: Mutex<Inner>,
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                history: EventHistory::new(),
                ..Inner::default()
            }),
        }
    }

    // ── Subscription ─────────────────────────────────────────────

    /// Subscribes a listener at the default priority (0).
    pub fn subscribe(
        &self,
        event: &str,
        callback: impl Fn(&EventRecord) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> ListenerId {
        self.subscribe_with_priority(event, 0, callback)
    }

    /// Subscribes a listener with an explicit priority.
    ///
    /// Higher priorities dispatch earlier; equal priorities keep registration
    /// order.
    pub fn subscribe_with_priority(
        &self,
        event: &str,
        priority: i32,
        callback: impl Fn(&EventRecord) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> ListenerId {
        self.register(event, priority, false, ListenerKind::Sync(Arc::new(callback)))
    }

    /// Subscribes a listener that is removed after its first invocation.
    pub fn subscribe_once(
        &self,
        event: &str,
        callback: impl Fn(&EventRecord) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> ListenerId {
        self.register(event, 0, true, ListenerKind::Sync(Arc::new(callback)))
    }

    /// Subscribes an async listener, run (and awaited) only by
    /// [`EventBus::publish_async`].
    pub fn subscribe_async(
        &self,
        event: &str,
        priority: i32,
        callback: impl Fn(EventRecord) -> BoxFuture<'static, anyhow::Result<()>>
            + Send
            + Sync
            + 'static,
    ) -> ListenerId {
        self.register(event, priority, false, ListenerKind::Async(Arc::new(callback)))
    }

    /// Like [`EventBus::subscribe`], but returns a handle that can remove the
    /// listener without keeping the event name around.
    pub fn subscribe_owned(
        self: &Arc<Self>,
        event: &str,
        callback: impl Fn(&EventRecord) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.subscribe(event, callback);
        Subscription {
            bus: Arc::downgrade(self),
            event: event.to_string(),
            id,
        }
    }

    fn register(&self, event: &str, priority: i32, once: bool, kind: ListenerKind) -> ListenerId {
        let mut inner = self.inner.lock().expect("bus lock poisoned");
        inner.next_id += 1;
        inner.next_seq += 1;
        let id = ListenerId(inner.next_id);
        let seq = inner.next_seq;

        let regs = inner.listeners.entry(event.to_string()).or_default();
        regs.push(Registration {
            id,
            priority,
            seq,
            once,
            kind,
        });
        // Descending priority, then registration order.
        regs.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.seq.cmp(&b.seq)));
        id
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, event: &str, id: ListenerId) -> bool {
        let mut inner = self.inner.lock().expect("bus lock poisoned");
        let Some(regs) = inner.listeners.get_mut(event) else {
            return false;
        };
        let before = regs.len();
        regs.retain(|r| r.id != id);
        regs.len() != before
    }

    /// Number of listeners currently registered for an event.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        let inner = self.inner.lock().expect("bus lock poisoned");
        inner.listeners.get(event).map_or(0, Vec::len)
    }

    // ── Middleware ───────────────────────────────────────────────

    /// Appends a middleware to the chain. Middleware run in insertion order.
    pub fn add_middleware(&self, middleware: impl Middleware + 'static) {
        let mut inner = self.inner.lock().expect("bus lock poisoned");
        inner.middleware.push(Arc::new(middleware));
    }

    // ── Publishing ───────────────────────────────────────────────

    /// Publishes an event synchronously.
    ///
    /// Sync listeners run in priority order; async listeners are skipped with
    /// a debug note (they only run on [`EventBus::publish_async`]).
    pub fn publish(&self, event: &str, payload: serde_json::Value) -> DispatchReport {
        let record = EventRecord::new(event, payload);
        let Some(snapshot) = self.intercept_and_record(record.clone()) else {
            return DispatchReport {
                vetoed: true,
                ..DispatchReport::default()
            };
        };

        let mut report = DispatchReport::default();
        for kind in snapshot {
            match kind {
                ListenerKind::Sync(cb) => match cb(&record) {
                    Ok(()) => report.delivered += 1,
                    Err(err) => {
                        report.failed += 1;
                        warn!("listener failed for `{}`: {err:#}", record.name);
                    }
                },
                ListenerKind::Async(_) => {
                    report.skipped_async += 1;
                    debug!(
                        "async listener for `{}` skipped on sync publish",
                        record.name
                    );
                }
            }
        }
        report
    }

    /// Publishes an event and awaits every listener.
    ///
    /// Sync listeners run first, in priority order. Async listeners then run
    /// concurrently; each failure is caught and logged without aborting its
    /// siblings.
    pub async fn publish_async(&self, event: &str, payload: serde_json::Value) -> DispatchReport {
        let record = EventRecord::new(event, payload);
        let Some(snapshot) = self.intercept_and_record(record.clone()) else {
            return DispatchReport {
                vetoed: true,
                ..DispatchReport::default()
            };
        };

        let mut report = DispatchReport::default();
        let mut futures = Vec::new();
        for kind in snapshot {
            match kind {
                ListenerKind::Sync(cb) => match cb(&record) {
                    Ok(()) => report.delivered += 1,
                    Err(err) => {
                        report.failed += 1;
                        warn!("listener failed for `{}`: {err:#}", record.name);
                    }
                },
                ListenerKind::Async(cb) => futures.push(cb(record.clone())),
            }
        }

        for result in join_all(futures).await {
            match result {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    report.failed += 1;
                    warn!("async listener failed for `{}`: {err:#}", record.name);
                }
            }
        }
        report
    }

    /// Runs middleware, records history, and snapshots the dispatch list.
    ///
    /// Returns `None` when a middleware vetoed; the event is recorded either
    /// way. One-shot listeners are deregistered at snapshot time so a
    /// reentrant publish cannot fire them twice.
    fn intercept_and_record(&self, record: EventRecord) -> Option<Vec<ListenerKind>> {
        let chain: Vec<Arc<dyn Middleware>> = {
            let inner = self.inner.lock().expect("bus lock poisoned");
            inner.middleware.iter().map(Arc::clone).collect()
        };

        let mut veto = None;
        for mw in &chain {
            if let Verdict::Cancel { reason } = mw.before_dispatch(&record) {
                veto = Some(reason);
                break;
            }
        }

        let mut inner = self.inner.lock().expect("bus lock poisoned");
        let name = record.name.clone();
        inner.history.push(record);

        if let Some(reason) = veto {
            debug!("event `{name}` vetoed by middleware: {reason}");
            return None;
        }

        let Some(regs) = inner.listeners.get_mut(&name) else {
            return Some(Vec::new());
        };
        let snapshot: Vec<ListenerKind> = regs.iter().map(|r| r.kind.clone()).collect();
        regs.retain(|r| !r.once);
        Some(snapshot)
    }

    // ── Waiting ──────────────────────────────────────────────────

    /// Waits for the next publish of `event`, up to `timeout`.
    ///
    /// The internal listener is unregistered on both outcomes, so repeated
    /// timeouts cannot leak registrations.
    pub async fn wait_for(
        &self,
        event: &str,
        timeout: Duration,
    ) -> BusResult<serde_json::Value> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let tx = Mutex::new(Some(tx));
        let id = self.subscribe_once(event, move |record| {
            if let Some(tx) = tx.lock().expect("wait_for lock poisoned").take() {
                let _ = tx.send(record.payload.clone());
            }
            Ok(())
        });

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(payload)) => Ok(payload),
            Ok(Err(_)) => {
                self.unsubscribe(event, id);
                Err(BusError::ChannelClosed {
                    event: event.to_string(),
                })
            }
            Err(_) => {
                self.unsubscribe(event, id);
                Err(BusError::Timeout {
                    event: event.to_string(),
                })
            }
        }
    }

    // ── History ──────────────────────────────────────────────────

    /// All retained records, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<EventRecord> {
        self.inner
            .lock()
            .expect("bus lock poisoned")
            .history
            .snapshot()
    }

    /// The most recent `n` records, oldest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<EventRecord> {
        self.inner.lock().expect("bus lock poisoned").history.recent(n)
    }

    /// Number of retained history records.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.inner.lock().expect("bus lock poisoned").history.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Unsubscribe handle returned by [`EventBus::subscribe_owned`].
///
/// Holds a weak reference; unsubscribing after the bus is gone is a no-op.
pub struct Subscription {
    bus: Weak<EventBus>,
    event: String,
    id: ListenerId,
}

impl Subscription {
    /// Removes the listener. Returns false if it was already gone.
    pub fn unsubscribe(self) -> bool {
        match self.bus.upgrade() {
            Some(bus) => bus.unsubscribe(&self.event, self.id),
            None => false,
        }
    }

    /// The listener this handle controls.
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }
}
