//! Key-value backend trait definition.

use crate::error::BackendResult;

/// A key-value backend for stripstore.
///
/// Backends store opaque byte values under string keys. The store
/// depends on exactly these three operations; connection management
/// (pooling, timeouts) is internal to each implementation.
///
/// # Invariants
///
/// - `multi_get` returns one entry per requested key, **in request
///   order**, with `None` for keys that do not exist
/// - `multi_set` makes every written key visible to a subsequent
///   `multi_get` once it returns successfully
/// - `keys_matching` supports at least a glob pattern with a single
///   trailing `*`
/// - Backends must be `Send + Sync` for concurrent access
///
/// # Atomicity
///
/// `multi_set` is issued as one round trip, but whether all keys land
/// atomically depends on the implementation. [`crate::RedisBackend`]
/// maps it to `MSET`, which is atomic; implementations without an
/// atomic multi-key write may fail partially, leaving only some keys
/// written. Callers must treat a failed `multi_set` as having an
/// unknown subset of keys applied.
pub trait KvBackend: Send + Sync {
    /// Reads the values for `keys`, preserving request order.
    ///
    /// Missing keys yield `None` at their position.
    ///
    /// # Errors
    ///
    /// Returns an error on connection, pool, or protocol failure.
    fn multi_get(&self, keys: &[String]) -> BackendResult<Vec<Option<Vec<u8>>>>;

    /// Writes all key-value pairs in one round trip.
    ///
    /// # Errors
    ///
    /// Returns an error on connection, pool, or protocol failure. See
    /// the trait-level atomicity note for partial-failure behavior.
    fn multi_set(&self, pairs: &[(String, Vec<u8>)]) -> BackendResult<()>;

    /// Returns every key matching `pattern`.
    ///
    /// The only pattern the store relies on is `<prefix>*` (a literal
    /// prefix followed by a single trailing `*`). No ordering is
    /// guaranteed.
    ///
    /// # Errors
    ///
    /// Returns an error on connection, pool, or protocol failure.
    fn keys_matching(&self, pattern: &str) -> BackendResult<Vec<String>>;
}
