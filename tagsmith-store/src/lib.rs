//! Storage collaborator for Tagsmith.
//!
//! The core persists drafts and settings through the [`Storage`] trait; the
//! bundled [`MemoryStore`] keeps everything in a map with optional TTLs.
//! Expiry is checked lazily on access — there is no background sweep beyond
//! the explicitly invoked [`Storage::cleanup`] pass.
//!
//! Snapshots are versioned documents (`{version, timestamp, data}`) used
//! both for whole-store export/import and for form-document file
//! export/import. A malformed import is rejected wholesale; no partial
//! state is ever applied.

mod error;
mod memory;
mod snapshot;

pub use error::{StoreError, StoreResult};
pub use memory::{MemoryStore, Storage};
pub use snapshot::{export_form, import_form, Snapshot, SNAPSHOT_VERSION};
