//! # Stripstore Codec
//!
//! The codec boundary for stripstore.
//!
//! A codec transforms a payload into an ordered sequence of [`Strip`]s
//! and back. Strips carry no embedded index; their position in the
//! sequence is the only ordering information, and the store persists it
//! externally through the physical key of each strip.
//!
//! This crate provides:
//! - [`Strip`] - one fragment of an encoded payload
//! - [`Codec`] - the encode/decode contract
//! - [`BypassCodec`] - the passthrough implementation with no redundancy
//!
//! Remote codecs that forward the contract to an encoder/decoder service
//! live in `stripstore_remote` and implement the same trait.
//!
//! ## Example
//!
//! ```rust
//! use stripstore_codec::{BypassCodec, Codec};
//!
//! let codec = BypassCodec::new();
//! let strips = codec.encode(b"hello world").unwrap();
//! let payload = codec.decode(&strips).unwrap();
//! assert_eq!(&payload, b"hello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod bypass;
mod error;
mod strip;

pub use bypass::{BypassCodec, DEFAULT_STRIP_COUNT};
pub use error::{CodecError, CodecResult};
pub use strip::Strip;

/// The encode/decode contract between a payload and its ordered strips.
///
/// # Invariants
///
/// - `decode` applied to the output of `encode`, in order and in full,
///   reproduces the original payload bit for bit
/// - implementations are stateless per call and safe to share across
///   concurrent callers (`Send + Sync`)
///
/// Whether `decode` tolerates missing strips depends on the
/// implementation: only redundancy-capable codecs may reconstruct from
/// a partial set. [`BypassCodec`] requires the full, gapless sequence.
pub trait Codec: Send + Sync {
    /// Encodes a payload into an ordered sequence of strips.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyPayload`] for an empty payload, or a
    /// transport/service error for remote implementations.
    fn encode(&self, payload: &[u8]) -> CodecResult<Vec<Strip>>;

    /// Decodes an ordered sequence of strips back into the payload.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyStripSet`] when no strips are given,
    /// or a transport/service error for remote implementations.
    fn decode(&self, strips: &[Strip]) -> CodecResult<Vec<u8>>;

    /// A short name identifying this codec, for logging.
    fn name(&self) -> &'static str;
}
