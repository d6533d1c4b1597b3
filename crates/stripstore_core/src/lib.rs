//! # Stripstore Core
//!
//! The strip store: a storage proxy that splits payloads into ordered
//! strips through a pluggable codec and persists each strip under a
//! derived physical key in a key-value backend.
//!
//! A write encodes the payload, derives `<key>-0 .. <key>-(N-1)`, and
//! issues one multi-key write. A read enumerates `<key>-*`, orders the
//! matches numerically by their trailing index, fetches all values in
//! one round trip, and decodes. The physical key format is a de facto
//! wire format shared by writer and reader and must not change.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use stripstore_backend::InMemoryBackend;
//! use stripstore_codec::BypassCodec;
//! use stripstore_core::StripStore;
//!
//! let store = StripStore::new(
//!     Arc::new(InMemoryBackend::new()),
//!     Arc::new(BypassCodec::new()),
//! );
//! store.put("greeting", b"hello world").unwrap();
//! assert_eq!(store.get("greeting").unwrap(), b"hello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod store;
pub mod strip_key;

pub use config::{
    CodecKind, StoreConfig, ENV_BACKEND_ADDR, ENV_CODEC, ENV_CODER_ADDR, ENV_POOL_SIZE,
    ENV_TIMEOUT_MS,
};
pub use error::{StoreError, StoreResult};
pub use store::StripStore;
