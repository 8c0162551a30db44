//! Error types for the event bus.

use thiserror::Error;

/// Result type for bus operations.
pub type BusResult<T> = Result<T, BusError>;

/// Errors that can occur in bus operations.
#[derive(Debug, Error)]
pub enum BusError {
    /// An awaited event did not arrive within the window.
    #[error("timed out waiting for event `{event}`")]
    Timeout {
        /// The event that was awaited.
        event: String,
    },

    /// The waiting channel was dropped before a value arrived.
    #[error("wait channel closed for event `{event}`")]
    ChannelClosed {
        /// The event that was awaited.
        event: String,
    },
}
