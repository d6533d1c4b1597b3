//! Error types for backend operations.

use std::io;
use thiserror::Error;

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors that can occur during backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// An I/O error occurred talking to the backend.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// All pooled connections are in use.
    #[error("connection pool exhausted (capacity {capacity})")]
    PoolExhausted {
        /// The configured pool capacity.
        capacity: usize,
    },

    /// The backend sent a reply this client cannot interpret.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The backend replied with an error status.
    #[error("backend error reply: {0}")]
    Server(String),

    /// The backend address could not be resolved.
    #[error("invalid backend address: {0}")]
    InvalidAddress(String),
}

impl BackendError {
    /// Returns true if retrying the operation may succeed.
    ///
    /// Pool exhaustion and I/O failures are transient; protocol and
    /// server errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BackendError::Io(_) | BackendError::PoolExhausted { .. }
        )
    }
}
