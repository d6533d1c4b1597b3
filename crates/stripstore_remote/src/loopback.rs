//! In-process loopback transport for tests.

use crate::transport::{expect_decode_response, expect_encode_response, CoderTransport};
use stripstore_codec::CodecResult;
use stripstore_protocol::{
    CoderMessage, DecodeRequest, DecodeResponse, EncodeRequest, EncodeResponse,
};

/// A handler that can answer coder requests in process.
///
/// The coder service implements this so tests can wire a store to a
/// real service without sockets or frames.
pub trait LoopbackCoder: Send + Sync {
    /// Handles one request message, returning the reply message.
    fn handle(&self, request: CoderMessage) -> CoderMessage;
}

/// A transport that routes requests directly to a [`LoopbackCoder`].
pub struct LoopbackTransport<S: LoopbackCoder> {
    coder: S,
}

impl<S: LoopbackCoder> LoopbackTransport<S> {
    /// Creates a loopback transport over the given handler.
    pub fn new(coder: S) -> Self {
        Self { coder }
    }
}

impl<S: LoopbackCoder> CoderTransport for LoopbackTransport<S> {
    fn encode(&self, request: &EncodeRequest) -> CodecResult<EncodeResponse> {
        let reply = self
            .coder
            .handle(CoderMessage::EncodeRequest(request.clone()));
        expect_encode_response(reply)
    }

    fn decode(&self, request: &DecodeRequest) -> CodecResult<DecodeResponse> {
        let reply = self
            .coder
            .handle(CoderMessage::DecodeRequest(request.clone()));
        expect_decode_response(reply)
    }
}
