//! Middleware interception for the dispatch pipeline.
//!
//! Middleware runs after an event is recorded but before any listener fires.
//! The first middleware to return [`Verdict::Cancel`] vetoes dispatch; the
//! event stays in history.

use crate::EventRecord;

/// Outcome of a middleware step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Proceed to the next middleware, then to listeners.
    Continue,
    /// Stop dispatch; no listener runs.
    Cancel {
        /// Why the event was vetoed, for logging.
        reason: String,
    },
}

impl Verdict {
    /// Shorthand for a cancellation verdict.
    #[must_use]
    pub fn cancel(reason: impl Into<String>) -> Self {
        Self::Cancel {
            reason: reason.into(),
        }
    }
}

/// A dispatch interceptor.
pub trait Middleware: Send + Sync {
    /// Inspects an event about to be dispatched.
    fn before_dispatch(&self, record: &EventRecord) -> Verdict;
}

impl<F> Middleware for F
where
    F: Fn(&EventRecord) -> Verdict + Send + Sync,
{
    fn before_dispatch(&self, record: &EventRecord) -> Verdict {
        self(record)
    }
}
