//! Remote codec over a coder transport.

use crate::transport::CoderTransport;
use stripstore_codec::{Codec, CodecError, CodecResult, Strip};
use stripstore_protocol::{DecodeRequest, EncodeRequest};

/// A codec that delegates both operations to the encoder/decoder
/// service behind a [`CoderTransport`].
///
/// The two operations are independent request/response calls; the
/// transport owns the connection lifecycle. Input-shape preconditions
/// are enforced locally so an invalid call never spends a round trip.
pub struct RemoteCodec<T: CoderTransport> {
    transport: T,
}

impl<T: CoderTransport> RemoteCodec<T> {
    /// Creates a remote codec over the given transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T: CoderTransport> Codec for RemoteCodec<T> {
    fn encode(&self, payload: &[u8]) -> CodecResult<Vec<Strip>> {
        if payload.is_empty() {
            return Err(CodecError::EmptyPayload);
        }
        let response = self.transport.encode(&EncodeRequest::new(payload.to_vec()))?;
        Ok(response.strips)
    }

    fn decode(&self, strips: &[Strip]) -> CodecResult<Vec<u8>> {
        if strips.is_empty() {
            return Err(CodecError::EmptyStripSet);
        }
        let response = self.transport.decode(&DecodeRequest::new(strips.to_vec()))?;
        Ok(response.payload)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use stripstore_protocol::{DecodeResponse, EncodeResponse};

    #[test]
    fn encode_forwards_to_transport() {
        let transport = MockTransport::new();
        transport.set_encode_response(Ok(EncodeResponse::new(vec![
            Strip::new(vec![1]),
            Strip::new(vec![2]),
        ])));

        let codec = RemoteCodec::new(transport);
        let strips = codec.encode(&[1, 2]).unwrap();
        assert_eq!(strips.len(), 2);
    }

    #[test]
    fn decode_forwards_to_transport() {
        let transport = MockTransport::new();
        transport.set_decode_response(Ok(DecodeResponse::new(vec![1, 2, 3])));

        let codec = RemoteCodec::new(transport);
        let payload = codec.decode(&[Strip::new(vec![1, 2, 3])]).unwrap();
        assert_eq!(payload, vec![1, 2, 3]);
    }

    #[test]
    fn empty_payload_never_reaches_transport() {
        let codec = RemoteCodec::new(MockTransport::new());
        assert!(matches!(codec.encode(&[]), Err(CodecError::EmptyPayload)));

        let transport = &codec.transport;
        assert_eq!(transport.encode_calls(), 0);
    }

    #[test]
    fn empty_strip_set_never_reaches_transport() {
        let codec = RemoteCodec::new(MockTransport::new());
        assert!(matches!(codec.decode(&[]), Err(CodecError::EmptyStripSet)));
        assert_eq!(codec.transport.decode_calls(), 0);
    }

    #[test]
    fn transport_failure_surfaces_as_codec_error() {
        let transport = MockTransport::new();
        transport.set_encode_response(Err(CodecError::transport_retryable("connection reset")));

        let codec = RemoteCodec::new(transport);
        let err = codec.encode(&[1]).unwrap_err();
        assert!(err.is_retryable());
    }
}
