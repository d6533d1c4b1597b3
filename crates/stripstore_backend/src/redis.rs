//! Redis-protocol backend over pooled TCP connections.

use crate::backend::KvBackend;
use crate::error::{BackendError, BackendResult};
use crate::pool::ConnectionPool;
use crate::resp::{Reply, RespConnection};
use std::time::Duration;

/// A key-value backend speaking the Redis protocol.
///
/// `multi_get` maps to `MGET`, `multi_set` to `MSET` (atomic in
/// Redis), and `keys_matching` to `KEYS`. Connections are created
/// lazily and shared through a bounded pool that fails fast when
/// exhausted; a connection is checked out only for the duration of a
/// single round trip, and one that hits a connection-level error is
/// discarded rather than returned.
pub struct RedisBackend {
    pool: ConnectionPool<RespConnection>,
}

impl RedisBackend {
    /// Creates a backend for `addr` (`host:port`) with the given pool
    /// capacity and per-operation timeout.
    ///
    /// No connection is established until the first operation.
    #[must_use]
    pub fn new(addr: impl Into<String>, pool_size: usize, timeout: Duration) -> Self {
        let addr = addr.into();
        let pool = ConnectionPool::new(pool_size, move || RespConnection::connect(&addr, timeout));
        Self { pool }
    }

    fn request(&self, args: &[&[u8]]) -> BackendResult<Reply> {
        let mut conn = self.pool.acquire()?;
        match conn.get_mut().request(args) {
            Ok(Reply::Error(message)) => Err(BackendError::Server(message)),
            Ok(reply) => Ok(reply),
            Err(err) => {
                // The stream may hold half a reply; never reuse it.
                conn.poison();
                Err(err)
            }
        }
    }
}

impl KvBackend for RedisBackend {
    fn multi_get(&self, keys: &[String]) -> BackendResult<Vec<Option<Vec<u8>>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut args: Vec<&[u8]> = Vec::with_capacity(keys.len() + 1);
        args.push(b"MGET");
        args.extend(keys.iter().map(|k| k.as_bytes()));

        match self.request(&args)? {
            Reply::Array(Some(items)) => items
                .into_iter()
                .map(|item| match item {
                    Reply::Bulk(value) => Ok(value),
                    other => Err(BackendError::Protocol(format!(
                        "MGET returned a non-bulk element: {other:?}"
                    ))),
                })
                .collect(),
            other => Err(BackendError::Protocol(format!(
                "MGET returned {other:?}, expected an array"
            ))),
        }
    }

    fn multi_set(&self, pairs: &[(String, Vec<u8>)]) -> BackendResult<()> {
        if pairs.is_empty() {
            return Ok(());
        }

        let mut args: Vec<&[u8]> = Vec::with_capacity(pairs.len() * 2 + 1);
        args.push(b"MSET");
        for (key, value) in pairs {
            args.push(key.as_bytes());
            args.push(value.as_slice());
        }

        match self.request(&args)? {
            Reply::Simple(_) => Ok(()),
            other => Err(BackendError::Protocol(format!(
                "MSET returned {other:?}, expected a status reply"
            ))),
        }
    }

    fn keys_matching(&self, pattern: &str) -> BackendResult<Vec<String>> {
        match self.request(&[b"KEYS", pattern.as_bytes()])? {
            Reply::Array(Some(items)) => items
                .into_iter()
                .map(|item| match item {
                    Reply::Bulk(Some(bytes)) => String::from_utf8(bytes).map_err(|_| {
                        BackendError::Protocol("KEYS returned a non-UTF-8 key".into())
                    }),
                    other => Err(BackendError::Protocol(format!(
                        "KEYS returned a non-bulk element: {other:?}"
                    ))),
                })
                .collect(),
            other => Err(BackendError::Protocol(format!(
                "KEYS returned {other:?}, expected an array"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_round_trip_for_empty_batches() {
        // Pool capacity 1 with a connector that always fails: the
        // empty-batch paths must not touch it.
        let backend = RedisBackend::new("127.0.0.1:1", 1, Duration::from_millis(10));
        assert!(backend.multi_get(&[]).unwrap().is_empty());
        backend.multi_set(&[]).unwrap();
    }

    #[test]
    fn connect_failure_surfaces_as_error() {
        // Reserved port on loopback; connection is refused or times out.
        let backend = RedisBackend::new("127.0.0.1:1", 1, Duration::from_millis(50));
        let err = backend.keys_matching("k-*").unwrap_err();
        assert!(err.is_retryable(), "connect failure should be retryable: {err}");
    }
}
