use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tagsmith_bus::{EventBus, Verdict, HISTORY_CAPACITY};

fn order_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

// ── Priority ordering ────────────────────────────────────────────

#[test]
fn higher_priority_dispatches_first() {
    let bus = EventBus::new();
    let log = order_log();

    let l = Arc::clone(&log);
    bus.subscribe_with_priority("evt", 5, move |_| {
        l.lock().unwrap().push("B".into());
        Ok(())
    });
    let l = Arc::clone(&log);
    bus.subscribe_with_priority("evt", 10, move |_| {
        l.lock().unwrap().push("A".into());
        Ok(())
    });

    bus.publish("evt", json!({}));
    assert_eq!(*log.lock().unwrap(), vec!["A", "B"]);
}

#[test]
fn equal_priority_keeps_registration_order() {
    let bus = EventBus::new();
    let log = order_log();

    for name in ["first", "second", "third"] {
        let l = Arc::clone(&log);
        bus.subscribe("evt", move |_| {
            l.lock().unwrap().push(name.to_string());
            Ok(())
        });
    }

    // Order is stable across repeated publishes.
    bus.publish("evt", json!({}));
    bus.publish("evt", json!({}));
    assert_eq!(
        *log.lock().unwrap(),
        vec!["first", "second", "third", "first", "second", "third"]
    );
}

// ── Failure isolation ────────────────────────────────────────────

#[test]
fn failing_listener_does_not_stop_siblings() {
    let bus = EventBus::new();
    let hits = Arc::new(AtomicUsize::new(0));

    bus.subscribe_with_priority("evt", 10, |_| anyhow::bail!("boom"));
    let h = Arc::clone(&hits);
    bus.subscribe_with_priority("evt", 5, move |_| {
        h.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let report = bus.publish("evt", json!({}));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(report.delivered, 1);
    assert_eq!(report.failed, 1);
}

// ── One-shot subscriptions ───────────────────────────────────────

#[test]
fn once_listener_fires_exactly_once() {
    let bus = EventBus::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let h = Arc::clone(&hits);
    bus.subscribe_once("evt", move |_| {
        h.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    bus.publish("evt", json!({}));
    bus.publish("evt", json!({}));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(bus.listener_count("evt"), 0);
}

// ── Unsubscribe ──────────────────────────────────────────────────

#[test]
fn unsubscribe_removes_from_future_dispatch() {
    let bus = EventBus::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let h = Arc::clone(&hits);
    let id = bus.subscribe("evt", move |_| {
        h.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    bus.publish("evt", json!({}));
    assert!(bus.unsubscribe("evt", id));
    assert!(!bus.unsubscribe("evt", id)); // already gone
    bus.publish("evt", json!({}));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn subscription_handle_unsubscribes() {
    let bus = Arc::new(EventBus::new());
    let hits = Arc::new(AtomicUsize::new(0));

    let h = Arc::clone(&hits);
    let sub = bus.subscribe_owned("evt", move |_| {
        h.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert!(sub.unsubscribe());
    bus.publish("evt", json!({}));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn listener_can_unsubscribe_itself_during_dispatch() {
    // Removal during dispatch affects future invocations only.
    let bus = Arc::new(EventBus::new());
    let hits = Arc::new(AtomicUsize::new(0));

    let h = Arc::clone(&hits);
    let bus2 = Arc::clone(&bus);
    let id_cell: Arc<Mutex<Option<tagsmith_bus::ListenerId>>> = Arc::new(Mutex::new(None));
    let cell = Arc::clone(&id_cell);
    let id = bus.subscribe("evt", move |_| {
        h.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = cell.lock().unwrap().take() {
            bus2.unsubscribe("evt", id);
        }
        Ok(())
    });
    *id_cell.lock().unwrap() = Some(id);

    bus.publish("evt", json!({}));
    bus.publish("evt", json!({}));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

// ── Middleware ───────────────────────────────────────────────────

#[test]
fn middleware_veto_blocks_listeners_but_records_history() {
    let bus = EventBus::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let h = Arc::clone(&hits);
    bus.subscribe("evt", move |_| {
        h.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    bus.add_middleware(|record: &tagsmith_bus::EventRecord| {
        if record.name == "evt" {
            Verdict::cancel("blocked in test")
        } else {
            Verdict::Continue
        }
    });

    let report = bus.publish("evt", json!({"k": 1}));
    assert!(report.vetoed);
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    let history = bus.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].name, "evt");
}

#[test]
fn middleware_chain_stops_at_first_cancel() {
    let bus = EventBus::new();
    let second_ran = Arc::new(AtomicUsize::new(0));

    bus.add_middleware(|_: &tagsmith_bus::EventRecord| Verdict::cancel("first"));
    let s = Arc::clone(&second_ran);
    bus.add_middleware(move |_: &tagsmith_bus::EventRecord| {
        s.fetch_add(1, Ordering::SeqCst);
        Verdict::Continue
    });

    bus.publish("evt", json!({}));
    assert_eq!(second_ran.load(Ordering::SeqCst), 0);
}

// ── History ──────────────────────────────────────────────────────

#[test]
fn history_keeps_payload_and_order() {
    let bus = EventBus::new();
    bus.publish("a", json!({"n": 1}));
    bus.publish("b", json!({"n": 2}));

    let history = bus.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].name, "a");
    assert_eq!(history[1].name, "b");
    assert_eq!(history[1].payload, json!({"n": 2}));
}

#[test]
fn history_evicts_oldest_beyond_capacity() {
    let bus = EventBus::new();
    for i in 0..(HISTORY_CAPACITY + 10) {
        bus.publish("evt", json!({ "i": i }));
    }

    assert_eq!(bus.history_len(), HISTORY_CAPACITY);
    let history = bus.history();
    // The ten oldest publishes were evicted.
    assert_eq!(history[0].payload, json!({"i": 10}));
}

#[test]
fn recent_returns_newest_records() {
    let bus = EventBus::new();
    for i in 0..5 {
        bus.publish("evt", json!({ "i": i }));
    }

    let recent = bus.recent(2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].payload, json!({"i": 3}));
    assert_eq!(recent[1].payload, json!({"i": 4}));
}

// ── Async dispatch ───────────────────────────────────────────────

#[tokio::test]
async fn publish_async_awaits_async_listeners() {
    let bus = EventBus::new();
    let hits = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let h = Arc::clone(&hits);
        bus.subscribe_async("evt", 0, move |_record| {
            let h = Arc::clone(&h);
            Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                h.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        });
    }

    let report = bus.publish_async("evt", json!({})).await;
    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert_eq!(report.delivered, 3);
}

#[tokio::test]
async fn async_failure_does_not_abort_siblings() {
    let bus = EventBus::new();
    let hits = Arc::new(AtomicUsize::new(0));

    bus.subscribe_async("evt", 0, |_| Box::pin(async { anyhow::bail!("boom") }));
    let h = Arc::clone(&hits);
    bus.subscribe_async("evt", 0, move |_| {
        let h = Arc::clone(&h);
        Box::pin(async move {
            h.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    });

    let report = bus.publish_async("evt", json!({})).await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(report.delivered, 1);
    assert_eq!(report.failed, 1);
}

#[test]
fn sync_publish_skips_async_listeners() {
    let bus = EventBus::new();
    bus.subscribe_async("evt", 0, |_| Box::pin(async { Ok(()) }));

    let report = bus.publish("evt", json!({}));
    assert_eq!(report.skipped_async, 1);
    assert_eq!(report.delivered, 0);
}

// ── wait_for ─────────────────────────────────────────────────────

#[tokio::test]
async fn wait_for_resolves_with_payload() {
    let bus = Arc::new(EventBus::new());

    let waiter = {
        let bus = Arc::clone(&bus);
        tokio::spawn(async move { bus.wait_for("evt", Duration::from_secs(1)).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    bus.publish("evt", json!({"ok": true}));

    let payload = waiter.await.unwrap().unwrap();
    assert_eq!(payload, json!({"ok": true}));
    assert_eq!(bus.listener_count("evt"), 0);
}

#[tokio::test(start_paused = true)]
async fn wait_for_times_out_and_unregisters() {
    let bus = EventBus::new();

    let result = bus.wait_for("evt", Duration::from_millis(50)).await;
    assert!(matches!(result, Err(tagsmith_bus::BusError::Timeout { .. })));
    assert_eq!(bus.listener_count("evt"), 0);
}
