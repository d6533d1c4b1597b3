//! Error types for store operations.

use stripstore_backend::BackendError;
use stripstore_codec::CodecError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
///
/// The classification helpers give a facade everything it needs to map
/// outcomes to transport responses: client error, not found, or
/// internal error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The caller passed an empty key or payload. Detected before any
    /// backend or codec call; never worth retrying.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No physical keys exist for the requested logical key.
    #[error("no data found under key {0:?}")]
    NotFound(String),

    /// The backend failed: pool exhausted, connection or protocol
    /// error, timeout.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// The encoding pipeline failed: transport error, service
    /// rejection, or malformed strip set.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// A backend key matched the strip pattern but carries no
    /// parseable trailing index. Only the store writes these keys, so
    /// this is a contract violation, not a transient fault.
    #[error("malformed strip key {0:?}")]
    MalformedStripKey(String),

    /// A strip key vanished between enumeration and the multi-key
    /// read; the stored object is in a detectably inconsistent state.
    #[error("strip {0:?} vanished between enumeration and read")]
    StripVanished(String),

    /// Configuration could not be resolved.
    #[error("configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true if the fault lies with the caller's arguments.
    pub fn is_client_error(&self) -> bool {
        matches!(self, StoreError::InvalidArgument(_))
    }

    /// Returns true if the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// Returns true for faults in the storage or encoding pipeline.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            StoreError::Backend(_)
                | StoreError::Codec(_)
                | StoreError::MalformedStripKey(_)
                | StoreError::StripVanished(_)
        )
    }

    /// Returns true if retrying the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Backend(err) => err.is_retryable(),
            StoreError::Codec(err) => err.is_retryable(),
            _ => false,
        }
    }
}
