//! The strip store.

use crate::config::{CodecKind, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::strip_key;
use std::sync::Arc;
use stripstore_backend::{BackendError, KvBackend, RedisBackend};
use stripstore_codec::{BypassCodec, Codec, Strip};
use stripstore_remote::{RemoteCodec, TcpTransport};
use uuid::Uuid;

/// A storage proxy that persists payloads as ordered strips.
///
/// The backend and codec are injected at construction and fixed for
/// the store's lifetime. Both stages of an operation (the codec call
/// and the single backend round trip) run sequentially on the calling
/// thread; no resource is held across them.
///
/// # Consistency
///
/// Once `put` returns, all strip writes are visible to a subsequent
/// `get` at the backend's native consistency level. Concurrent `put`s
/// to the **same** key have no ordering guarantee: the last multi-key
/// write wins per physical key, with no atomicity across the N keys,
/// so racing writers can interleave fragments. Callers needing
/// stronger guarantees must layer locking or versioning above the
/// store.
pub struct StripStore {
    backend: Arc<dyn KvBackend>,
    codec: Arc<dyn Codec>,
}

impl StripStore {
    /// Creates a store over the given backend and codec.
    pub fn new(backend: Arc<dyn KvBackend>, codec: Arc<dyn Codec>) -> Self {
        Self { backend, codec }
    }

    /// Builds a store from configuration: a pooled Redis backend plus
    /// the configured codec.
    ///
    /// # Errors
    ///
    /// Fails when the coder service address cannot be resolved.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let backend = Arc::new(RedisBackend::new(
            config.backend_addr.clone(),
            config.pool_size,
            config.timeout,
        ));

        let codec: Arc<dyn Codec> = match config.codec {
            CodecKind::Bypass => Arc::new(BypassCodec::new()),
            CodecKind::Remote => {
                let transport = TcpTransport::new(&config.coder_addr, config.timeout)?;
                Arc::new(RemoteCodec::new(transport))
            }
        };

        tracing::info!(
            codec = %config.codec,
            backend = %config.backend_addr,
            "strip store ready"
        );
        Ok(Self::new(backend, codec))
    }

    /// Stores `payload` under `key`, echoing the key back.
    ///
    /// The payload is encoded into N strips which are written under
    /// `<key>-0 .. <key>-(N-1)` in one multi-key round trip.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidArgument`] for an empty key or payload,
    ///   before any backend or codec call
    /// - [`StoreError::Codec`] when encoding fails
    /// - [`StoreError::Backend`] when the write fails; the backend may
    ///   then hold an unknown subset of the strips
    pub fn put(&self, key: &str, payload: &[u8]) -> StoreResult<String> {
        validate_key(key)?;
        if payload.is_empty() {
            return Err(StoreError::InvalidArgument(
                "payload cannot be empty".into(),
            ));
        }

        let strips = self.codec.encode(payload)?;
        let pairs: Vec<(String, Vec<u8>)> = strips
            .into_iter()
            .enumerate()
            .map(|(index, strip)| (strip_key::strip_key(key, index), strip.into_bytes()))
            .collect();

        self.backend.multi_set(&pairs)?;
        tracing::debug!(
            key,
            strips = pairs.len(),
            codec = self.codec.name(),
            "payload stored"
        );
        Ok(key.to_string())
    }

    /// Stores `payload` under a fresh server-chosen key, returning it.
    ///
    /// # Errors
    ///
    /// As [`StripStore::put`], minus the key validation (the generated
    /// key is always valid).
    pub fn put_with_generated_key(&self, payload: &[u8]) -> StoreResult<String> {
        let key = Uuid::new_v4().to_string();
        self.put(&key, payload)
    }

    /// Retrieves the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidArgument`] for an empty key, before any
    ///   backend or codec call
    /// - [`StoreError::NotFound`] when no strip keys exist
    /// - [`StoreError::MalformedStripKey`] when a matching key has no
    ///   parseable trailing index
    /// - [`StoreError::StripVanished`] when a value disappeared
    ///   between enumeration and the read
    /// - [`StoreError::Backend`] / [`StoreError::Codec`] for pipeline
    ///   failures
    pub fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        validate_key(key)?;

        let matched = self.backend.keys_matching(&strip_key::pattern(key))?;
        if matched.is_empty() {
            return Err(StoreError::NotFound(key.to_string()));
        }

        let ordered = strip_key::sort_numeric(matched).map_err(StoreError::MalformedStripKey)?;
        let values = self.backend.multi_get(&ordered)?;
        if values.len() != ordered.len() {
            return Err(StoreError::Backend(BackendError::Protocol(format!(
                "multi-key read returned {} values for {} keys",
                values.len(),
                ordered.len()
            ))));
        }

        let mut strips = Vec::with_capacity(ordered.len());
        for (strip_key, value) in ordered.iter().zip(values) {
            match value {
                Some(bytes) => strips.push(Strip::new(bytes)),
                None => return Err(StoreError::StripVanished(strip_key.clone())),
            }
        }

        let payload = self.codec.decode(&strips)?;
        tracing::debug!(
            key,
            strips = strips.len(),
            bytes = payload.len(),
            "payload loaded"
        );
        Ok(payload)
    }
}

fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidArgument("key cannot be empty".into()));
    }
    Ok(())
}
