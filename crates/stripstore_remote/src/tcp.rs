//! Framed-TCP transport to the coder service.

use crate::transport::{expect_decode_response, expect_encode_response, CoderTransport};
use parking_lot::Mutex;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use stripstore_codec::{CodecError, CodecResult};
use stripstore_protocol::{
    read_message, write_message, CoderMessage, DecodeRequest, DecodeResponse, EncodeRequest,
    EncodeResponse, ProtocolError,
};

/// A transport over one shared TCP connection.
///
/// The service address is resolved once when the transport is built.
/// The connection is established lazily on the first request and
/// reused for the life of the transport; concurrent callers serialize
/// on it. Connect, read, and write all respect the configured timeout.
/// After a connection-level failure the stream is dropped and the next
/// request reconnects.
#[derive(Debug)]
pub struct TcpTransport {
    addr: SocketAddr,
    timeout: Duration,
    conn: Mutex<Option<TcpStream>>,
}

impl TcpTransport {
    /// Creates a transport for `addr` (`host:port`).
    ///
    /// Resolves the address immediately but does not connect.
    ///
    /// # Errors
    ///
    /// Fails with a non-retryable transport error when the address
    /// cannot be resolved.
    pub fn new(addr: &str, timeout: Duration) -> CodecResult<Self> {
        let resolved = addr
            .to_socket_addrs()
            .map_err(|e| CodecError::transport_fatal(format!("cannot resolve {addr}: {e}")))?
            .next()
            .ok_or_else(|| {
                CodecError::transport_fatal(format!("{addr} resolved to no addresses"))
            })?;

        Ok(Self {
            addr: resolved,
            timeout,
            conn: Mutex::new(None),
        })
    }

    /// Returns the resolved service address.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn establish(&self) -> CodecResult<TcpStream> {
        let stream = TcpStream::connect_timeout(&self.addr, self.timeout)
            .map_err(|e| CodecError::transport_retryable(format!("connect {}: {e}", self.addr)))?;
        stream
            .set_read_timeout(Some(self.timeout))
            .and_then(|()| stream.set_write_timeout(Some(self.timeout)))
            .and_then(|()| stream.set_nodelay(true))
            .map_err(|e| CodecError::transport_fatal(format!("socket setup: {e}")))?;
        Ok(stream)
    }

    fn round_trip(&self, request: &CoderMessage) -> CodecResult<CoderMessage> {
        let mut guard = self.conn.lock();
        if guard.is_none() {
            *guard = Some(self.establish()?);
        }
        let stream = guard.as_mut().expect("connection just established");

        let outcome = match write_message(stream, request) {
            Ok(()) => read_message(stream),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(reply) => Ok(reply),
            Err(err) => {
                // The stream may hold half a frame; reconnect next call.
                *guard = None;
                Err(translate(err))
            }
        }
    }
}

fn translate(err: ProtocolError) -> CodecError {
    match err {
        ProtocolError::Io(e) => CodecError::transport_retryable(e.to_string()),
        ProtocolError::Encode(msg) => CodecError::Protocol(format!("encode: {msg}")),
        ProtocolError::Decode(msg) => CodecError::Protocol(format!("decode: {msg}")),
        ProtocolError::FrameTooLarge { len, max } => {
            CodecError::Protocol(format!("frame of {len} bytes exceeds limit of {max}"))
        }
    }
}

impl CoderTransport for TcpTransport {
    fn encode(&self, request: &EncodeRequest) -> CodecResult<EncodeResponse> {
        let reply = self.round_trip(&CoderMessage::EncodeRequest(request.clone()))?;
        expect_encode_response(reply)
    }

    fn decode(&self, request: &DecodeRequest) -> CodecResult<DecodeResponse> {
        let reply = self.round_trip(&CoderMessage::DecodeRequest(request.clone()))?;
        expect_decode_response(reply)
    }
}
