//! Error types for protocol encoding and framing.

use std::io;
use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while framing or encoding messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// An I/O error occurred reading or writing a frame.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A message failed to encode to CBOR.
    #[error("encode error: {0}")]
    Encode(String),

    /// A frame body failed to decode as a message.
    #[error("decode error: {0}")]
    Decode(String),

    /// A frame exceeded the size limit.
    #[error("frame of {len} bytes exceeds limit of {max}")]
    FrameTooLarge {
        /// The announced or actual frame length.
        len: usize,
        /// The enforced maximum.
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProtocolError::FrameTooLarge { len: 10, max: 4 };
        assert_eq!(err.to_string(), "frame of 10 bytes exceeds limit of 4");
    }
}
