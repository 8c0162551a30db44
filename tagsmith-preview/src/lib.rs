//! Platform previews for Tagsmith.
//!
//! A pure transform from the field-value map to a textual layout
//! description of how a link card would look on a given platform. No DOM,
//! no drawing — the rendering collaborator decides what to do with the
//! description.
//!
//! Each platform reads its preferred source fields first and falls back
//! through a fixed chain (e.g. the Twitter card prefers `twitter_title`,
//! then `title`, then a literal `Untitled`). Text is truncated to the
//! platform's character budget with a trailing `...` replacing the final
//! three characters.

mod platform;
mod preview;

pub use platform::Platform;
pub use preview::{
    generate, truncate, validate_preview_data, ImageRegion, Preview, PreviewValidation,
    PLACEHOLDER_IMAGE,
};
