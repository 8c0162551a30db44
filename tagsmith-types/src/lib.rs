//! Core type definitions for Tagsmith.
//!
//! This crate defines the fundamental, component-agnostic types used
//! throughout the reactive core:
//! - Field values (the three value shapes a form input can produce)
//! - The field-value map owned by the orchestrator
//! - Monotonic timestamps for history bookkeeping
//!
//! Component-specific types (tag descriptors, field schemas, previews, state
//! entries) belong in their respective crates, not here.

mod form;
mod timestamp;
mod value;

pub use form::FormData;
pub use timestamp::Timestamp;
pub use value::FieldValue;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
