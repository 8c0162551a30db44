//! The terminal artifact: a complete HTML document skeleton.

use crate::generate;
use tagsmith_types::FormData;

/// Builds a full HTML document: doctype, charset/viewport preamble, the
/// generated tag block, and a placeholder body.
///
/// The tag block contains the `<title>` element when the map has a title;
/// otherwise a literal `Untitled` title keeps the document well-formed.
#[must_use]
pub fn build_document(form: &FormData) -> String {
    let mut head_lines = Vec::new();
    head_lines.push("<meta charset=\"UTF-8\">".to_string());
    head_lines.push(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">".to_string(),
    );

    if !form.has("title") {
        head_lines.push("<title>Untitled</title>".to_string());
    }

    let tag_block = generate(form);
    if !tag_block.is_empty() {
        head_lines.extend(tag_block.lines().map(str::to_string));
    }

    let head: String = head_lines
        .iter()
        .map(|line| format!("    {line}\n"))
        .collect();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n{head}</head>\n<body>\n    <!-- Page content -->\n</body>\n</html>\n"
    )
}
