use tagsmith_types::{FieldValue, FormData};

// ── Basic access ─────────────────────────────────────────────────

#[test]
fn set_and_get() {
    let mut form = FormData::new();
    assert!(form.is_empty());

    form.set("title", "My Page");
    assert_eq!(form.get_str("title"), Some("My Page"));
    assert_eq!(form.len(), 1);
}

#[test]
fn set_returns_previous_value() {
    let mut form = FormData::new();
    assert!(form.set("title", "a").is_none());
    assert_eq!(form.set("title", "b"), Some(FieldValue::from("a")));
}

#[test]
fn remove_clears_the_field() {
    let mut form = FormData::new();
    form.set("title", "a");
    assert_eq!(form.remove("title"), Some(FieldValue::from("a")));
    assert!(form.get("title").is_none());
}

#[test]
fn get_text_rejects_blank_values() {
    let mut form = FormData::new();
    form.set("title", "   ");
    assert_eq!(form.get_str("title"), Some("   "));
    assert_eq!(form.get_text("title"), None);
    assert!(!form.has("title"));
}

#[test]
fn has_requires_non_empty() {
    let mut form = FormData::new();
    form.set("a", "");
    form.set("b", "x");
    form.set("c", false);
    assert!(!form.has("a"));
    assert!(form.has("b"));
    assert!(form.has("c"));
    assert!(!form.has("missing"));
}

// ── Ordering and filtering ───────────────────────────────────────

#[test]
fn iteration_is_key_ordered() {
    let mut form = FormData::new();
    form.set("z", "1");
    form.set("a", "2");
    form.set("m", "3");

    let names: Vec<&str> = form.names().collect();
    assert_eq!(names, vec!["a", "m", "z"]);
}

#[test]
fn filtered_keeps_only_accepted_fields() {
    let mut form = FormData::new();
    form.set("title", "t");
    form.set("og_title", "ot");

    let filtered = form.filtered(|name| !name.starts_with("og_"));
    assert!(filtered.has("title"));
    assert!(!filtered.has("og_title"));
    // Original untouched.
    assert!(form.has("og_title"));
}

// ── JSON round-trip ──────────────────────────────────────────────

#[test]
fn json_round_trip_preserves_shapes() {
    let mut form = FormData::new();
    form.set("title", "My Page");
    form.set("refresh_seconds", 30.0);
    form.set("noindex", true);

    let json = form.to_json().unwrap();
    let back = FormData::from_json(&json).unwrap();
    assert_eq!(form, back);
}

#[test]
fn from_json_rejects_non_objects() {
    assert!(FormData::from_json("[1, 2]").is_err());
    assert!(FormData::from_json("not json").is_err());
}
