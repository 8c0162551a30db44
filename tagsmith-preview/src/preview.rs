//! Preview generation and recommended-field checks.

use crate::Platform;
use serde::{Deserialize, Serialize};
use tagsmith_types::FormData;

/// Fixed description shown when no image field is set. The image region is
/// always present in the layout; it is never omitted.
pub const PLACEHOLDER_IMAGE: &str = "No image set — neutral placeholder panel";

/// The image region of a preview card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageRegion {
    /// An image URL taken from the form.
    Url(String),
    /// The fixed placeholder description.
    Placeholder(String),
}

/// A textual layout description of one platform's link card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    /// The platform name as requested by the caller.
    pub platform: String,
    /// Card title, truncated to the platform budget.
    pub title: String,
    /// Card description, truncated to the platform budget.
    pub description: String,
    /// Display domain derived from the best available URL field.
    pub domain: String,
    /// The image region (always present).
    pub image: ImageRegion,
    /// Explanatory note for unknown platforms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Recommended-field check result. Warnings never block generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewValidation {
    pub valid: bool,
    pub warnings: Vec<String>,
}

/// Truncates to `budget` characters, replacing the final three with `...`.
///
/// The result is exactly `budget` characters long whenever truncation
/// occurs.
#[must_use]
pub fn truncate(s: &str, budget: usize) -> String {
    let count = s.chars().count();
    if count <= budget {
        return s.to_string();
    }
    let keep = budget.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Generates the preview layout for a platform named by the caller.
///
/// An unknown platform produces an explanatory placeholder card, not an
/// error.
#[must_use]
pub fn generate(form: &FormData, platform_name: &str) -> Preview {
    let Some(platform) = Platform::from_name(platform_name) else {
        return unsupported(platform_name);
    };

    let title = first_text(form, title_chain(platform)).unwrap_or("Untitled");
    let description = first_text(form, description_chain(platform)).unwrap_or("");
    let url = first_text(form, url_chain(platform)).unwrap_or("");
    let image = first_text(form, image_chain(platform))
        .map(|u| ImageRegion::Url(u.to_string()))
        .unwrap_or_else(|| ImageRegion::Placeholder(PLACEHOLDER_IMAGE.to_string()));

    Preview {
        platform: platform.name().to_string(),
        title: truncate(title, platform.title_budget()),
        description: truncate(description, platform.description_budget()),
        domain: domain_of(url),
        image,
        note: None,
    }
}

/// Flags missing recommended fields for a platform.
///
/// Unknown platforms yield a single explanatory warning.
#[must_use]
pub fn validate_preview_data(form: &FormData, platform_name: &str) -> PreviewValidation {
    let Some(platform) = Platform::from_name(platform_name) else {
        return PreviewValidation {
            valid: false,
            warnings: vec![format!("Unknown preview platform `{platform_name}`")],
        };
    };

    let recommended: &[&str] = match platform {
        Platform::Google => &["title", "description"],
        Platform::Facebook => &["og_title", "og_description", "og_image"],
        Platform::Twitter => &["twitter_card", "twitter_title", "twitter_image"],
        Platform::Linkedin => &["og_title", "og_description", "og_image"],
    };

    let warnings: Vec<String> = recommended
        .iter()
        .filter(|field| !form.has(field))
        .map(|field| format!("Missing recommended field `{field}`"))
        .collect();

    PreviewValidation {
        valid: warnings.is_empty(),
        warnings,
    }
}

// ── Fallback chains ──────────────────────────────────────────────

fn title_chain(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Google => &["title", "og_title"],
        Platform::Twitter => &["twitter_title", "title"],
        Platform::Facebook | Platform::Linkedin => &["og_title", "title"],
    }
}

fn description_chain(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Google => &["description", "og_description"],
        Platform::Twitter => &["twitter_description", "description"],
        Platform::Facebook | Platform::Linkedin => &["og_description", "description"],
    }
}

fn url_chain(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Google => &["canonical", "og_url"],
        _ => &["og_url", "canonical"],
    }
}

fn image_chain(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Twitter => &["twitter_image", "og_image"],
        _ => &["og_image", "twitter_image"],
    }
}

fn first_text<'a>(form: &'a FormData, chain: &[&str]) -> Option<&'a str> {
    chain.iter().find_map(|key| form.get_text(key))
}

/// Extracts the display domain from a URL by explicit string splitting.
fn domain_of(url: &str) -> String {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.split('/').next().unwrap_or("").to_string()
}

fn unsupported(platform_name: &str) -> Preview {
    Preview {
        platform: platform_name.to_string(),
        title: String::new(),
        description: String::new(),
        domain: String::new(),
        image: ImageRegion::Placeholder(PLACEHOLDER_IMAGE.to_string()),
        note: Some(format!(
            "No preview available for `{platform_name}`; supported platforms: google, facebook, twitter, linkedin"
        )),
    }
}
