use tagsmith_schema::{FieldCondition, FieldDescriptor, FieldType};
use tagsmith_types::FormData;

// ── Constructors ─────────────────────────────────────────────────

#[test]
fn text_shorthand() {
    let f = FieldDescriptor::text("title");
    assert_eq!(f.name, "title");
    assert_eq!(f.field_type, FieldType::Text);
    assert!(!f.required);
    assert!(f.condition.is_none());
}

#[test]
fn select_carries_options() {
    let f = FieldDescriptor::select(
        "og_type",
        vec!["website".to_string(), "article".to_string()],
    );
    assert_eq!(f.field_type, FieldType::Select);
    assert_eq!(f.options.as_deref(), Some(&["website".to_string(), "article".to_string()][..]));
}

#[test]
fn builder_chain() {
    let f = FieldDescriptor::text("title")
        .required()
        .with_length(Some(30), Some(60))
        .with_pattern("^[A-Z]");
    assert!(f.required);
    assert_eq!(f.min_length, Some(30));
    assert_eq!(f.max_length, Some(60));
    assert_eq!(f.pattern.as_deref(), Some("^[A-Z]"));
}

// ── Visibility conditions ────────────────────────────────────────

#[test]
fn field_without_condition_is_always_visible() {
    let f = FieldDescriptor::text("title");
    assert!(f.is_visible(&FormData::new()));
}

#[test]
fn condition_must_match_exactly() {
    let f = FieldDescriptor::text("article_author").visible_when("og_type", "article");

    let mut form = FormData::new();
    assert!(!f.is_visible(&form));

    form.set("og_type", "website");
    assert!(!f.is_visible(&form));

    form.set("og_type", "article");
    assert!(f.is_visible(&form));

    form.set("og_type", "Article"); // case-sensitive
    assert!(!f.is_visible(&form));
}

#[test]
fn condition_compares_rendered_flag_values() {
    let cond = FieldCondition {
        field: "advanced_mode".to_string(),
        value: "true".to_string(),
    };
    let mut form = FormData::new();
    form.set("advanced_mode", true);
    assert!(cond.is_met(&form));
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn descriptor_round_trips_through_json() {
    let f = FieldDescriptor::url("og_image").visible_when("og_type", "article");
    let json = serde_json::to_string(&f).unwrap();
    let back: FieldDescriptor = serde_json::from_str(&json).unwrap();

    assert_eq!(back.name, "og_image");
    assert_eq!(back.field_type, FieldType::Url);
    assert_eq!(back.condition, f.condition);
}

#[test]
fn absent_constraints_are_omitted_from_json() {
    let json = serde_json::to_string(&FieldDescriptor::text("title")).unwrap();
    assert!(!json.contains("min_length"));
    assert!(!json.contains("condition"));
}

#[test]
fn descriptor_list_deserializes_from_configuration() {
    let blob = r#"[
        {"name": "title", "field_type": "text", "required": true, "max_length": 60},
        {"name": "og_type", "field_type": "select", "options": ["website", "article"]},
        {"name": "article_author", "field_type": "text",
         "condition": {"field": "og_type", "value": "article"}}
    ]"#;

    let fields: Vec<FieldDescriptor> = serde_json::from_str(blob).unwrap();
    assert_eq!(fields.len(), 3);
    assert!(fields[0].required);
    assert_eq!(fields[1].field_type, FieldType::Select);
    assert_eq!(
        fields[2].condition,
        Some(FieldCondition {
            field: "og_type".to_string(),
            value: "article".to_string()
        })
    );
}
