//! Protocol messages for the encoder/decoder service.

use crate::error::{ProtocolError, ProtocolResult};
use serde::{Deserialize, Serialize};
use stripstore_codec::Strip;

/// Request to encode a payload into ordered strips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeRequest {
    /// The raw payload to encode.
    pub payload: Vec<u8>,
}

impl EncodeRequest {
    /// Creates a new encode request.
    pub fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }
}

/// Response carrying the ordered strip sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeResponse {
    /// The strips, in concatenation order.
    pub strips: Vec<Strip>,
}

impl EncodeResponse {
    /// Creates a new encode response.
    pub fn new(strips: Vec<Strip>) -> Self {
        Self { strips }
    }
}

/// Request to decode an ordered strip sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeRequest {
    /// The strips, in the exact order they must be concatenated.
    pub strips: Vec<Strip>,
}

impl DecodeRequest {
    /// Creates a new decode request.
    pub fn new(strips: Vec<Strip>) -> Self {
        Self { strips }
    }
}

/// Response carrying the reconstructed payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeResponse {
    /// The reconstructed payload.
    pub payload: Vec<u8>,
}

impl DecodeResponse {
    /// Creates a new decode response.
    pub fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }
}

/// Error reply for a request the service rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable rejection reason.
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Envelope for every message on the coder wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoderMessage {
    /// Encode request.
    EncodeRequest(EncodeRequest),
    /// Encode response.
    EncodeResponse(EncodeResponse),
    /// Decode request.
    DecodeRequest(DecodeRequest),
    /// Decode response.
    DecodeResponse(DecodeResponse),
    /// Error reply.
    Error(ErrorResponse),
}

impl CoderMessage {
    /// Returns the message type code, for logging.
    pub fn type_code(&self) -> u8 {
        match self {
            CoderMessage::EncodeRequest(_) => 1,
            CoderMessage::EncodeResponse(_) => 2,
            CoderMessage::DecodeRequest(_) => 3,
            CoderMessage::DecodeResponse(_) => 4,
            CoderMessage::Error(_) => 5,
        }
    }

    /// Encodes the message to CBOR bytes.
    pub fn encode(&self) -> ProtocolResult<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::ser::into_writer(self, &mut buf)
            .map_err(|e| ProtocolError::Encode(e.to_string()))?;
        Ok(buf)
    }

    /// Decodes a message from CBOR bytes.
    pub fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        ciborium::de::from_reader(bytes).map_err(|e| ProtocolError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_request_roundtrip() {
        let message = CoderMessage::EncodeRequest(EncodeRequest::new(vec![1, 2, 3]));
        let bytes = message.encode().unwrap();
        assert_eq!(CoderMessage::decode(&bytes).unwrap(), message);
    }

    #[test]
    fn decode_request_roundtrip_preserves_strip_order() {
        let strips = vec![
            Strip::new(vec![9]),
            Strip::new(vec![1, 1]),
            Strip::new(vec![4]),
        ];
        let message = CoderMessage::DecodeRequest(DecodeRequest::new(strips.clone()));
        let bytes = message.encode().unwrap();

        match CoderMessage::decode(&bytes).unwrap() {
            CoderMessage::DecodeRequest(req) => assert_eq!(req.strips, strips),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn error_response_roundtrip() {
        let message = CoderMessage::Error(ErrorResponse::new("empty payload"));
        let bytes = message.encode().unwrap();
        assert_eq!(CoderMessage::decode(&bytes).unwrap(), message);
    }

    #[test]
    fn decode_garbage_fails() {
        assert!(matches!(
            CoderMessage::decode(b"not cbor at all"),
            Err(ProtocolError::Decode(_))
        ));
    }

    #[test]
    fn type_codes_are_distinct() {
        let messages = [
            CoderMessage::EncodeRequest(EncodeRequest::new(vec![])),
            CoderMessage::EncodeResponse(EncodeResponse::new(vec![])),
            CoderMessage::DecodeRequest(DecodeRequest::new(vec![])),
            CoderMessage::DecodeResponse(DecodeResponse::new(vec![])),
            CoderMessage::Error(ErrorResponse::new("x")),
        ];
        let mut codes: Vec<u8> = messages.iter().map(CoderMessage::type_code).collect();
        codes.dedup();
        assert_eq!(codes.len(), messages.len());
    }
}
