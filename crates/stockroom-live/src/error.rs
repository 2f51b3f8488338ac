//! Error types for the live update subsystem.

use thiserror::Error;

/// Errors surfaced to callers that open channels.
///
/// Delivery failures on an individual channel never show up here; the
/// registry absorbs them by dropping the channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiveError {
    #[error("Subscriber limit reached: at most {limit} live channels")]
    Capacity { limit: usize },

    #[error("Registry is shut down")]
    ShutDown,
}

/// Result type for live subsystem operations.
pub type LiveResult<T> = Result<T, LiveError>;
