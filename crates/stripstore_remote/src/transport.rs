//! Transport abstraction for coder requests.

use stripstore_codec::{CodecError, CodecResult};
use stripstore_protocol::{
    CoderMessage, DecodeRequest, DecodeResponse, EncodeRequest, EncodeResponse,
};

/// A transport that carries the two coder operations.
///
/// Implementations translate their own failure modes (connection
/// errors, timeouts, malformed replies) into the codec error taxonomy,
/// so the store sees one failure surface for local and remote codecs
/// alike. Transports must be safe to share across concurrent callers.
pub trait CoderTransport: Send + Sync {
    /// Sends an encode request and awaits its response.
    fn encode(&self, request: &EncodeRequest) -> CodecResult<EncodeResponse>;

    /// Sends a decode request and awaits its response.
    fn decode(&self, request: &DecodeRequest) -> CodecResult<DecodeResponse>;
}

/// Maps a reply envelope to the expected encode response.
pub(crate) fn expect_encode_response(reply: CoderMessage) -> CodecResult<EncodeResponse> {
    match reply {
        CoderMessage::EncodeResponse(response) => Ok(response),
        CoderMessage::Error(error) => Err(CodecError::Rejected(error.message)),
        other => Err(CodecError::Protocol(format!(
            "unexpected reply to encode request (type code {})",
            other.type_code()
        ))),
    }
}

/// Maps a reply envelope to the expected decode response.
pub(crate) fn expect_decode_response(reply: CoderMessage) -> CodecResult<DecodeResponse> {
    match reply {
        CoderMessage::DecodeResponse(response) => Ok(response),
        CoderMessage::Error(error) => Err(CodecError::Rejected(error.message)),
        other => Err(CodecError::Protocol(format!(
            "unexpected reply to decode request (type code {})",
            other.type_code()
        ))),
    }
}

/// A scripted transport for testing.
#[derive(Debug, Default)]
pub struct MockTransport {
    encode_response: parking_lot::Mutex<Option<CodecResult<EncodeResponse>>>,
    decode_response: parking_lot::Mutex<Option<CodecResult<DecodeResponse>>>,
    encode_calls: std::sync::atomic::AtomicUsize,
    decode_calls: std::sync::atomic::AtomicUsize,
}

impl MockTransport {
    /// Creates a new mock transport with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next encode result.
    pub fn set_encode_response(&self, response: CodecResult<EncodeResponse>) {
        *self.encode_response.lock() = Some(response);
    }

    /// Scripts the next decode result.
    pub fn set_decode_response(&self, response: CodecResult<DecodeResponse>) {
        *self.decode_response.lock() = Some(response);
    }

    /// Number of encode calls made.
    pub fn encode_calls(&self) -> usize {
        self.encode_calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Number of decode calls made.
    pub fn decode_calls(&self) -> usize {
        self.decode_calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl CoderTransport for MockTransport {
    fn encode(&self, _request: &EncodeRequest) -> CodecResult<EncodeResponse> {
        self.encode_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.encode_response
            .lock()
            .take()
            .unwrap_or_else(|| Err(CodecError::Protocol("no mock encode response set".into())))
    }

    fn decode(&self, _request: &DecodeRequest) -> CodecResult<DecodeResponse> {
        self.decode_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.decode_response
            .lock()
            .take()
            .unwrap_or_else(|| Err(CodecError::Protocol("no mock decode response set".into())))
    }
}
