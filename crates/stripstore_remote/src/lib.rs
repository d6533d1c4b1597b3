//! # Stripstore Remote
//!
//! Remote codec client for the encoder/decoder service.
//!
//! [`RemoteCodec`] implements the [`stripstore_codec::Codec`] contract
//! by forwarding `encode` and `decode` as two independent
//! request/response calls over a [`CoderTransport`]. The store stays
//! agnostic to whether a codec runs in process or behind the wire.
//!
//! Transports:
//! - [`TcpTransport`] - framed TCP; resolves the service address once,
//!   connects lazily, and reuses a single connection
//! - [`LoopbackTransport`] - routes requests to an in-process handler,
//!   for tests without network overhead
//! - [`MockTransport`] - scripted responses and call counting

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod loopback;
mod remote;
mod tcp;
mod transport;

pub use loopback::{LoopbackCoder, LoopbackTransport};
pub use remote::RemoteCodec;
pub use tcp::TcpTransport;
pub use transport::{CoderTransport, MockTransport};
