//! The fixed, ordered category generators.
//!
//! Each category is a plain function; the static slice below is the emission
//! order. A category reads the keys it knows about and appends a descriptor
//! for each present, non-empty value. Unmet conditions (e.g. article tags
//! without `og_type = article`) suppress emission silently.

use crate::TagDescriptor;
use serde_json::{json, Value};
use tagsmith_types::{FieldValue, FormData};

type CategoryFn = fn(&FormData, &mut Vec<TagDescriptor>);

/// Category order is emission order.
const CATEGORIES: &[(&str, CategoryFn)] = &[
    ("basic", basic),
    ("seo", seo),
    ("open-graph", open_graph),
    ("twitter", twitter),
    ("schema", schema),
    ("advanced", advanced),
    ("mobile", mobile),
    ("social", social),
];

/// The category names, in emission order.
#[must_use]
pub fn category_names() -> Vec<&'static str> {
    CATEGORIES.iter().map(|(name, _)| *name).collect()
}

/// Runs every category generator in order.
#[must_use]
pub fn generate_tags(form: &FormData) -> Vec<TagDescriptor> {
    let mut tags = Vec::new();
    for (_, category) in CATEGORIES {
        category(form, &mut tags);
    }
    tags
}

/// Generates the serialized tag block: one rendered tag per line.
#[must_use]
pub fn generate(form: &FormData) -> String {
    generate_tags(form)
        .iter()
        .map(TagDescriptor::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The rendered string form of a present, non-empty field.
fn text(form: &FormData, key: &str) -> Option<String> {
    form.get(key)
        .filter(|v| !v.is_empty())
        .map(FieldValue::render)
}

// ── Categories ───────────────────────────────────────────────────

fn basic(form: &FormData, tags: &mut Vec<TagDescriptor>) {
    if let Some(title) = text(form, "title") {
        tags.push(TagDescriptor::title(title));
    }
    for (key, name) in [
        ("description", "description"),
        ("keywords", "keywords"),
        ("author", "author"),
    ] {
        if let Some(content) = text(form, key) {
            tags.push(TagDescriptor::meta_name(name, content));
        }
    }
}

fn seo(form: &FormData, tags: &mut Vec<TagDescriptor>) {
    if let Some(robots) = text(form, "robots") {
        tags.push(TagDescriptor::meta_name("robots", robots));
    }
    if let Some(canonical) = text(form, "canonical") {
        tags.push(TagDescriptor::link("canonical", canonical));
    }
    if let Some(language) = text(form, "language") {
        tags.push(TagDescriptor::meta_name("language", language));
    }
}

fn open_graph(form: &FormData, tags: &mut Vec<TagDescriptor>) {
    for (key, property) in [
        ("og_title", "og:title"),
        ("og_description", "og:description"),
        ("og_type", "og:type"),
        ("og_url", "og:url"),
        ("og_image", "og:image"),
        ("og_site_name", "og:site_name"),
    ] {
        if let Some(content) = text(form, key) {
            tags.push(TagDescriptor::meta_property(property, content));
        }
    }

    // Article sub-properties only apply to the article type.
    if text(form, "og_type").as_deref() == Some("article") {
        for (key, property) in [
            ("article_author", "article:author"),
            ("article_published_time", "article:published_time"),
            ("article_section", "article:section"),
        ] {
            if let Some(content) = text(form, key) {
                tags.push(TagDescriptor::meta_property(property, content));
            }
        }
    }
}

fn twitter(form: &FormData, tags: &mut Vec<TagDescriptor>) {
    for (key, name) in [
        ("twitter_card", "twitter:card"),
        ("twitter_title", "twitter:title"),
        ("twitter_description", "twitter:description"),
        ("twitter_image", "twitter:image"),
        ("twitter_site", "twitter:site"),
        ("twitter_creator", "twitter:creator"),
    ] {
        if let Some(content) = text(form, key) {
            tags.push(TagDescriptor::meta_name(name, content));
        }
    }
}

fn schema(form: &FormData, tags: &mut Vec<TagDescriptor>) {
    let Some(schema_type) = text(form, "schema_type") else {
        return;
    };
    if !matches!(schema_type.as_str(), "Organization" | "Person" | "Article") {
        return;
    }

    let mut map = serde_json::Map::new();
    map.insert("@context".to_string(), json!("https://schema.org"));
    map.insert("@type".to_string(), json!(schema_type.clone()));

    for (key, property) in [
        ("schema_name", "name"),
        ("schema_description", "description"),
        ("schema_url", "url"),
    ] {
        if let Some(value) = text(form, key) {
            map.insert(property.to_string(), Value::String(value));
        }
    }

    // Type-specific sub-properties; unmatched kinds are suppressed silently.
    let extras: &[(&str, &str)] = match schema_type.as_str() {
        "Organization" => &[("schema_logo", "logo")],
        "Person" => &[("schema_job_title", "jobTitle")],
        "Article" => &[
            ("schema_headline", "headline"),
            ("schema_date_published", "datePublished"),
        ],
        _ => &[],
    };
    for (key, property) in extras {
        if let Some(value) = text(form, key) {
            map.insert((*property).to_string(), Value::String(value));
        }
    }

    let content =
        serde_json::to_string_pretty(&Value::Object(map)).expect("schema JSON serializes");
    tags.push(TagDescriptor::json_ld(content));
}

fn advanced(form: &FormData, tags: &mut Vec<TagDescriptor>) {
    if let Some(value) = text(form, "x_ua_compatible") {
        tags.push(TagDescriptor::http_equiv("X-UA-Compatible", value));
    }
    if let Some(value) = text(form, "refresh") {
        tags.push(TagDescriptor::http_equiv("refresh", value));
    }
    if let Some(value) = text(form, "google_site_verification") {
        tags.push(TagDescriptor::meta_name("google-site-verification", value));
    }
}

fn mobile(form: &FormData, tags: &mut Vec<TagDescriptor>) {
    for (key, name) in [
        ("theme_color", "theme-color"),
        ("apple_mobile_web_app_capable", "apple-mobile-web-app-capable"),
        ("apple_mobile_web_app_title", "apple-mobile-web-app-title"),
        ("format_detection", "format-detection"),
    ] {
        if let Some(content) = text(form, key) {
            tags.push(TagDescriptor::meta_name(name, content));
        }
    }
}

fn social(form: &FormData, tags: &mut Vec<TagDescriptor>) {
    for (key, property) in [("fb_app_id", "fb:app_id"), ("fb_pages", "fb:pages")] {
        if let Some(content) = text(form, key) {
            tags.push(TagDescriptor::meta_property(property, content));
        }
    }
    if let Some(content) = text(form, "pinterest_verification") {
        tags.push(TagDescriptor::meta_name("p:domain_verify", content));
    }
}
