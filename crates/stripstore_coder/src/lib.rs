//! # Stripstore Coder
//!
//! The encoder/decoder service.
//!
//! A stateless request/response service hosting a
//! [`stripstore_codec::Codec`]: each inbound `Encode` request is
//! answered with the ordered strip sequence, each `Decode` request
//! with the reconstructed payload, and every malformed or invalid
//! request with a synchronous error reply. Requests are independent;
//! the service keeps no session state and never retries.
//!
//! The reference hosted codec is the bypass passthrough; a real
//! erasure codec can be hosted unchanged because the service only
//! speaks the [`stripstore_protocol`] contract.
//!
//! [`serve`] runs the framed-TCP accept loop; the `stripstore-coder`
//! binary wires it to configuration and logging.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod serve;
mod server;

pub use config::{CoderConfig, ENV_CODEC, ENV_LISTEN};
pub use error::{CoderError, CoderResult};
pub use serve::serve;
pub use server::CoderServer;
