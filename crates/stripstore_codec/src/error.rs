//! Error types for codec operations.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding.
///
/// Local codecs only produce the input-shape variants. Remote codecs
/// additionally translate transport and service failures into this
/// taxonomy so the store sees one failure surface regardless of which
/// codec is active.
#[derive(Debug, Error)]
pub enum CodecError {
    /// An empty payload was given to `encode`.
    #[error("cannot encode an empty payload")]
    EmptyPayload,

    /// An empty strip sequence was given to `decode`.
    #[error("cannot decode an empty strip sequence")]
    EmptyStripSet,

    /// The transport to the coder service failed.
    #[error("coder transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// Whether the operation can be retried.
        retryable: bool,
    },

    /// The coder service replied with something other than the
    /// expected response message.
    #[error("coder protocol error: {0}")]
    Protocol(String),

    /// The coder service rejected the request.
    #[error("coder rejected request: {0}")]
    Rejected(String),
}

impl CodecError {
    /// Creates a retryable transport error.
    pub fn transport_retryable(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable transport error.
    pub fn transport_fatal(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if retrying the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CodecError::Transport { retryable: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(CodecError::transport_retryable("connection reset").is_retryable());
        assert!(!CodecError::transport_fatal("bad address").is_retryable());
        assert!(!CodecError::EmptyPayload.is_retryable());
        assert!(!CodecError::Rejected("empty payload".into()).is_retryable());
    }

    #[test]
    fn error_display() {
        let err = CodecError::Rejected("empty payload".into());
        assert_eq!(err.to_string(), "coder rejected request: empty payload");
    }
}
