//! # Stripstore Backend
//!
//! Key-value backend trait and implementations for stripstore.
//!
//! Backends are **opaque byte stores** addressed by string keys. The
//! store above them derives one physical key per strip and only ever
//! needs three operations: an ordered multi-key read, a multi-key
//! write, and key enumeration by pattern. Backends do not understand
//! strips, payloads, or key derivation.
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - for tests and ephemeral use
//! - [`RedisBackend`] - Redis protocol over TCP with a bounded,
//!   fail-fast connection pool
//!
//! ## Example
//!
//! ```rust
//! use stripstore_backend::{InMemoryBackend, KvBackend};
//!
//! let backend = InMemoryBackend::new();
//! backend.multi_set(&[("k-0".into(), b"ab".to_vec())]).unwrap();
//! let values = backend.multi_get(&["k-0".into()]).unwrap();
//! assert_eq!(values, vec![Some(b"ab".to_vec())]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod memory;
mod pool;
mod redis;
mod resp;

pub use backend::KvBackend;
pub use error::{BackendError, BackendResult};
pub use memory::InMemoryBackend;
pub use redis::RedisBackend;
