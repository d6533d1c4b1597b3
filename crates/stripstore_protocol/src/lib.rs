//! # Stripstore Protocol
//!
//! The wire contract between the storage proxy and the encoder/decoder
//! service.
//!
//! This crate provides:
//! - request/response messages for the two unary operations
//!   (`Encode`, `Decode`) plus an error reply
//! - the [`CoderMessage`] envelope with CBOR bodies
//! - length-prefixed frame helpers over any `Read`/`Write`
//!
//! Every exchange is one request frame answered by one response frame;
//! there is no streaming and no session state. The same framing is
//! used by the blocking client transport and the async service loop.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod frame;
mod messages;

pub use error::{ProtocolError, ProtocolResult};
pub use frame::{read_message, write_message, MAX_FRAME_LEN};
pub use messages::{
    CoderMessage, DecodeRequest, DecodeResponse, EncodeRequest, EncodeResponse, ErrorResponse,
};
