use tagsmith_tags::TagDescriptor;

// ── Rendering ────────────────────────────────────────────────────

#[test]
fn title_renders_on_one_line() {
    assert_eq!(
        TagDescriptor::title("My Page").render(),
        "<title>My Page</title>"
    );
}

#[test]
fn meta_name_attribute_order_is_fixed() {
    assert_eq!(
        TagDescriptor::meta_name("description", "About things").render(),
        "<meta name=\"description\" content=\"About things\">"
    );
}

#[test]
fn meta_property_renders_property_first() {
    assert_eq!(
        TagDescriptor::meta_property("og:title", "T").render(),
        "<meta property=\"og:title\" content=\"T\">"
    );
}

#[test]
fn http_equiv_and_charset() {
    assert_eq!(
        TagDescriptor::http_equiv("refresh", "30").render(),
        "<meta http-equiv=\"refresh\" content=\"30\">"
    );
    assert_eq!(
        TagDescriptor::charset("UTF-8").render(),
        "<meta charset=\"UTF-8\">"
    );
}

#[test]
fn link_renders_rel_then_href() {
    assert_eq!(
        TagDescriptor::link("canonical", "https://example.com/").render(),
        "<link rel=\"canonical\" href=\"https://example.com/\">"
    );
}

#[test]
fn script_renders_as_three_parts() {
    let rendered = TagDescriptor::json_ld("{\n  \"a\": 1\n}").render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.first(), Some(&"<script type=\"application/ld+json\">"));
    assert_eq!(lines.last(), Some(&"</script>"));
    assert!(rendered.contains("\"a\": 1"));
}

// ── Escaping ─────────────────────────────────────────────────────

#[test]
fn text_content_is_escaped() {
    assert_eq!(
        TagDescriptor::title("Cats & <Dogs>").render(),
        "<title>Cats &amp; &lt;Dogs&gt;</title>"
    );
}

#[test]
fn attribute_values_escape_quotes_too() {
    assert_eq!(
        TagDescriptor::meta_name("description", "say \"hi\" & <go>").render(),
        "<meta name=\"description\" content=\"say &quot;hi&quot; &amp; &lt;go&gt;\">"
    );
}

#[test]
fn ampersand_is_escaped_before_brackets() {
    // No double-escaping: `<` becomes `&lt;`, not `&amp;lt;`.
    assert_eq!(
        TagDescriptor::title("<").render(),
        "<title>&lt;</title>"
    );
}

#[test]
fn script_content_is_embedded_verbatim() {
    // JSON-LD content is trusted serializer output, not user text.
    let rendered = TagDescriptor::json_ld("{\"quote\": \"<b>\"}").render();
    assert!(rendered.contains("{\"quote\": \"<b>\"}"));
}
