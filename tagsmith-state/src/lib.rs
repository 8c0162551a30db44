//! Keyed state store for the Tagsmith reactive core.
//!
//! The store maps flat dotted-path string keys (e.g. `form.title`,
//! `ui.active_tab`) to JSON values. Dotted keys are a namespacing convention
//! resolved by explicit string comparison, not a nested-object traversal.
//!
//! Every mutation records a [`StateEntry`] in a bounded ring before applying,
//! so [`StateManager::undo`] can revert exactly one step. Subscribers watch a
//! single key or the `*` wildcard; [`StateManager::batch`] defers their
//! notifications until the batch closes, preserving order and never
//! coalescing.
//!
//! Computed entries declare their dependency keys up front and refresh when a
//! dependency changes; refreshes notify subscribers but never enter undo
//! history.

mod entry;
mod store;

pub use entry::{StateEntry, StateOp, UNDO_CAPACITY};
pub use store::{ComputeFn, StateManager, SubscriberId, WILDCARD};
