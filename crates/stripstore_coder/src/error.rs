//! Error types for the coder service.

use thiserror::Error;

/// Result type for coder service operations.
pub type CoderResult<T> = Result<T, CoderError>;

/// Errors that can occur in the coder service.
#[derive(Debug, Error)]
pub enum CoderError {
    /// The request was malformed or carried invalid fields.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The hosted codec failed.
    #[error("codec error: {0}")]
    Codec(String),

    /// Configuration could not be resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error on the listener or a connection.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoderError {
    /// Returns true if the fault lies with the requester.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CoderError::InvalidRequest(_))
    }

    /// Returns true if the fault lies with the service.
    pub fn is_server_error(&self) -> bool {
        matches!(self, CoderError::Codec(_) | CoderError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classification() {
        assert!(CoderError::InvalidRequest("empty payload".into()).is_client_error());
        assert!(CoderError::Codec("boom".into()).is_server_error());
        assert!(!CoderError::InvalidRequest("bad".into()).is_server_error());
    }
}
