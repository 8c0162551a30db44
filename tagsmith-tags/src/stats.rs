//! SEO scoring and generation statistics.
//!
//! The score is a weighted point sum over present, well-sized fields,
//! capped at 100. Category budgets: basic 30, open-graph 25, seo 20,
//! twitter 15, schema 10. Each term is additive, so filling more recommended
//! fields never lowers the score.

use crate::{generate, generate_tags};
use tagsmith_types::FormData;

/// Statistics for one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagStats {
    /// Number of emitted tag descriptors.
    pub tag_count: usize,
    /// Weighted completeness score, 0–100.
    pub seo_score: u32,
    /// Character count of the serialized tag block.
    pub character_count: usize,
}

/// Computes tag count, SEO score, and markup size for the given map.
#[must_use]
pub fn compute_stats(form: &FormData) -> TagStats {
    TagStats {
        tag_count: generate_tags(form).len(),
        seo_score: seo_score(form),
        character_count: generate(form).chars().count(),
    }
}

/// Recommended title length in characters.
const TITLE_RANGE: (usize, usize) = (30, 60);
/// Recommended description length in characters.
const DESCRIPTION_RANGE: (usize, usize) = (120, 160);

/// Scores metadata completeness, capped at 100.
#[must_use]
pub fn seo_score(form: &FormData) -> u32 {
    let mut score = 0u32;

    // Basic: 30 points.
    score += sized_points(form, "title", TITLE_RANGE, 12, 6);
    score += sized_points(form, "description", DESCRIPTION_RANGE, 12, 6);
    score += present_points(form, "keywords", 6);

    // Open Graph: 25 points.
    score += present_points(form, "og_title", 7);
    score += present_points(form, "og_description", 6);
    score += present_points(form, "og_image", 6);
    score += present_points(form, "og_url", 6);

    // SEO: 20 points.
    score += present_points(form, "canonical", 10);
    score += present_points(form, "robots", 5);
    score += present_points(form, "language", 5);

    // Twitter: 15 points.
    score += present_points(form, "twitter_card", 5);
    score += present_points(form, "twitter_title", 5);
    score += present_points(form, "twitter_image", 5);

    // Schema: 10 points.
    if matches!(
        form.get_text("schema_type"),
        Some("Organization" | "Person" | "Article")
    ) {
        score += 10;
    }

    score.min(100)
}

fn present_points(form: &FormData, key: &str, points: u32) -> u32 {
    if form.has(key) {
        points
    } else {
        0
    }
}

/// Full points inside the recommended length range, half points for merely
/// being present.
fn sized_points(
    form: &FormData,
    key: &str,
    (min, max): (usize, usize),
    full: u32,
    partial: u32,
) -> u32 {
    match form.get_text(key) {
        Some(value) => {
            let len = value.chars().count();
            if (min..=max).contains(&len) {
                full
            } else {
                partial
            }
        }
        None => 0,
    }
}
