use serde_json::json;
use std::time::Duration;
use tagsmith_store::{MemoryStore, Storage, SNAPSHOT_VERSION};

// ── Basic operations ─────────────────────────────────────────────

#[test]
fn save_load_remove() {
    let mut store = MemoryStore::new();
    assert!(store.save("draft", json!({"title": "T"}), None));
    assert_eq!(store.load("draft"), Some(json!({"title": "T"})));

    assert!(store.remove("draft"));
    assert!(!store.remove("draft"));
    assert_eq!(store.load("draft"), None);
}

#[test]
fn save_overwrites() {
    let mut store = MemoryStore::new();
    store.save("k", json!(1), None);
    store.save("k", json!(2), None);
    assert_eq!(store.load("k"), Some(json!(2)));
    assert_eq!(store.len(), 1);
}

#[test]
fn clear_empties_the_store() {
    let mut store = MemoryStore::new();
    store.save("a", json!(1), None);
    store.save("b", json!(2), None);
    store.clear();
    assert!(store.is_empty());
}

// ── TTL ──────────────────────────────────────────────────────────

#[test]
fn expired_entries_read_as_none() {
    let mut store = MemoryStore::new();
    store.save("gone", json!(1), Some(Duration::ZERO));
    assert_eq!(store.load("gone"), None);
}

#[test]
fn lazy_expiry_removes_the_entry_on_access() {
    let mut store = MemoryStore::new();
    store.save("gone", json!(1), Some(Duration::ZERO));
    assert_eq!(store.len(), 1); // still sitting there

    store.load("gone");
    assert_eq!(store.len(), 0); // collected by the access
}

#[test]
fn unexpired_ttl_entries_survive() {
    let mut store = MemoryStore::new();
    store.save("kept", json!(1), Some(Duration::from_secs(3600)));
    assert_eq!(store.load("kept"), Some(json!(1)));
}

#[test]
fn ttl_expires_after_the_window() {
    let mut store = MemoryStore::new();
    store.save("brief", json!(1), Some(Duration::from_millis(10)));
    std::thread::sleep(Duration::from_millis(25));
    assert_eq!(store.load("brief"), None);
}

#[test]
fn cleanup_sweeps_only_expired_entries() {
    let mut store = MemoryStore::new();
    store.save("gone", json!(1), Some(Duration::ZERO));
    store.save("kept", json!(2), None);
    store.save("kept_ttl", json!(3), Some(Duration::from_secs(3600)));

    assert_eq!(store.cleanup(), 1);
    assert_eq!(store.len(), 2);
    assert_eq!(store.cleanup(), 0);
}

// ── Snapshot export/import ───────────────────────────────────────

#[test]
fn export_carries_version_and_live_data() {
    let mut store = MemoryStore::new();
    store.save("a", json!(1), None);
    store.save("gone", json!(2), Some(Duration::ZERO));

    let snapshot = store.export_all();
    assert_eq!(snapshot.version, SNAPSHOT_VERSION);
    assert!(!snapshot.timestamp.is_empty());
    assert_eq!(snapshot.data.len(), 1);
    assert_eq!(snapshot.data.get("a"), Some(&json!(1)));
}

#[test]
fn import_replaces_store_contents() {
    let mut source = MemoryStore::new();
    source.save("a", json!(1), None);
    let snapshot = source.export_all();

    let mut target = MemoryStore::new();
    target.save("stale", json!("old"), None);
    target.import_all(snapshot);

    assert_eq!(target.load("a"), Some(json!(1)));
    assert_eq!(target.load("stale"), None);
    assert_eq!(target.len(), 1);
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut store = MemoryStore::new();
    store.save("settings", json!({"theme": "dark"}), None);

    let snapshot = store.export_all();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: tagsmith_store::Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot, back);
}
