//! Request handlers for the coder service.

use crate::error::{CoderError, CoderResult};
use std::sync::Arc;
use stripstore_codec::Codec;
use stripstore_protocol::{
    CoderMessage, DecodeRequest, DecodeResponse, EncodeRequest, EncodeResponse, ErrorResponse,
};

/// The encoder/decoder service.
///
/// Hosts one [`Codec`] and answers the two unary operations. Every
/// request is handled independently; there is no session, no ordering
/// assumption between requests, and no retry inside the service.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use stripstore_codec::BypassCodec;
/// use stripstore_coder::CoderServer;
/// use stripstore_protocol::EncodeRequest;
///
/// let server = CoderServer::new(Arc::new(BypassCodec::new()));
/// let response = server.handle_encode(EncodeRequest::new(vec![1, 2, 3])).unwrap();
/// assert!(!response.strips.is_empty());
/// ```
pub struct CoderServer {
    codec: Arc<dyn Codec>,
}

impl CoderServer {
    /// Creates a server hosting the given codec.
    pub fn new(codec: Arc<dyn Codec>) -> Self {
        Self { codec }
    }

    /// Returns the hosted codec's name, for logging.
    pub fn codec_name(&self) -> &'static str {
        self.codec.name()
    }

    /// Handles an encode request.
    ///
    /// # Errors
    ///
    /// Rejects an empty payload as a client error; codec failures are
    /// server errors.
    pub fn handle_encode(&self, request: EncodeRequest) -> CoderResult<EncodeResponse> {
        if request.payload.is_empty() {
            return Err(CoderError::InvalidRequest(
                "encode request carries an empty payload".into(),
            ));
        }
        let strips = self
            .codec
            .encode(&request.payload)
            .map_err(|e| CoderError::Codec(e.to_string()))?;
        Ok(EncodeResponse::new(strips))
    }

    /// Handles a decode request.
    ///
    /// # Errors
    ///
    /// Rejects an empty strip sequence as a client error; codec
    /// failures are server errors.
    pub fn handle_decode(&self, request: DecodeRequest) -> CoderResult<DecodeResponse> {
        if request.strips.is_empty() {
            return Err(CoderError::InvalidRequest(
                "decode request carries no strips".into(),
            ));
        }
        let payload = self
            .codec
            .decode(&request.strips)
            .map_err(|e| CoderError::Codec(e.to_string()))?;
        Ok(DecodeResponse::new(payload))
    }

    /// Dispatches one request message, always producing a reply
    /// message (failures become error replies).
    pub fn handle_message(&self, message: CoderMessage) -> CoderMessage {
        match message {
            CoderMessage::EncodeRequest(request) => match self.handle_encode(request) {
                Ok(response) => CoderMessage::EncodeResponse(response),
                Err(err) => CoderMessage::Error(ErrorResponse::new(err.to_string())),
            },
            CoderMessage::DecodeRequest(request) => match self.handle_decode(request) {
                Ok(response) => CoderMessage::DecodeResponse(response),
                Err(err) => CoderMessage::Error(ErrorResponse::new(err.to_string())),
            },
            other => CoderMessage::Error(ErrorResponse::new(format!(
                "unexpected message type (code {})",
                other.type_code()
            ))),
        }
    }
}
