//! Meta tag generation for Tagsmith.
//!
//! A pure transform: the field-value map goes in, an ordered list of
//! [`TagDescriptor`]s comes out, then serialized markup. Generation is
//! deterministic — the same map produces byte-identical output.
//!
//! Categories run in a fixed order (basic, seo, open-graph, twitter, schema,
//! advanced, mobile, social); each is a named function appending zero or more
//! descriptors for the keys it knows about. Emission order within the output
//! is exactly category order, then per-category field order.

mod categories;
mod document;
mod stats;
mod tag;

pub use categories::{category_names, generate, generate_tags};
pub use document::build_document;
pub use stats::{compute_stats, seo_score, TagStats};
pub use tag::{MetaKey, TagDescriptor};
