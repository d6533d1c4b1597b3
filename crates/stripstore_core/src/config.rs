//! Store configuration.

use crate::error::{StoreError, StoreResult};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable selecting the codec (`bypass` or `remote`).
pub const ENV_CODEC: &str = "STRIPSTORE_CODEC";

/// Environment variable naming the coder service address.
pub const ENV_CODER_ADDR: &str = "STRIPSTORE_CODER_ADDR";

/// Environment variable naming the backend address.
pub const ENV_BACKEND_ADDR: &str = "STRIPSTORE_BACKEND_ADDR";

/// Environment variable sizing the backend connection pool.
pub const ENV_POOL_SIZE: &str = "STRIPSTORE_POOL_SIZE";

/// Environment variable for the per-operation timeout, in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "STRIPSTORE_TIMEOUT_MS";

const DEFAULT_CODER_ADDR: &str = "127.0.0.1:1234";
const DEFAULT_BACKEND_ADDR: &str = "127.0.0.1:6379";
const DEFAULT_POOL_SIZE: usize = 8;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which codec implementation the store uses.
///
/// Chosen once when the store is built and fixed for its lifetime;
/// switching codecs means building a new store. There is no per-call
/// re-inspection and no hot reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    /// Local passthrough chunking with no redundancy.
    Bypass,
    /// Delegate to the encoder/decoder service over the wire.
    Remote,
}

impl FromStr for CodecKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bypass" => Ok(CodecKind::Bypass),
            "remote" => Ok(CodecKind::Remote),
            other => Err(format!(
                "unknown codec {other:?} (expected \"bypass\" or \"remote\")"
            )),
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecKind::Bypass => f.write_str("bypass"),
            CodecKind::Remote => f.write_str("remote"),
        }
    }
}

/// Configuration for building a [`crate::StripStore`].
///
/// All values are resolved once at construction time.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Which codec to use.
    pub codec: CodecKind,
    /// Coder service address (`host:port`), for the remote codec.
    pub coder_addr: String,
    /// Backend address (`host:port`).
    pub backend_addr: String,
    /// Backend connection pool capacity.
    pub pool_size: usize,
    /// Timeout applied to backend and coder round trips.
    pub timeout: Duration,
}

impl StoreConfig {
    /// Creates a configuration with the loopback defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the codec.
    #[must_use]
    pub fn with_codec(mut self, codec: CodecKind) -> Self {
        self.codec = codec;
        self
    }

    /// Sets the coder service address.
    #[must_use]
    pub fn with_coder_addr(mut self, addr: impl Into<String>) -> Self {
        self.coder_addr = addr.into();
        self
    }

    /// Sets the backend address.
    #[must_use]
    pub fn with_backend_addr(mut self, addr: impl Into<String>) -> Self {
        self.backend_addr = addr.into();
        self
    }

    /// Sets the connection pool capacity.
    #[must_use]
    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.pool_size = size;
        self
    }

    /// Sets the round-trip timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves configuration from the environment.
    ///
    /// Unset variables fall back to the loopback defaults documented
    /// on the `ENV_*` constants.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::Config`] when a set variable does not
    /// parse.
    pub fn from_env() -> StoreResult<Self> {
        let mut config = Self::default();

        if let Ok(codec) = std::env::var(ENV_CODEC) {
            config.codec = codec
                .parse()
                .map_err(|e| StoreError::Config(format!("{ENV_CODEC}: {e}")))?;
        }
        if let Ok(addr) = std::env::var(ENV_CODER_ADDR) {
            config.coder_addr = addr;
        }
        if let Ok(addr) = std::env::var(ENV_BACKEND_ADDR) {
            config.backend_addr = addr;
        }
        if let Ok(size) = std::env::var(ENV_POOL_SIZE) {
            config.pool_size = size
                .parse()
                .map_err(|e| StoreError::Config(format!("{ENV_POOL_SIZE}={size}: {e}")))?;
        }
        if let Ok(ms) = std::env::var(ENV_TIMEOUT_MS) {
            let ms: u64 = ms
                .parse()
                .map_err(|e| StoreError::Config(format!("{ENV_TIMEOUT_MS}={ms}: {e}")))?;
            config.timeout = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            codec: CodecKind::Remote,
            coder_addr: DEFAULT_CODER_ADDR.to_string(),
            backend_addr: DEFAULT_BACKEND_ADDR.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_loopback() {
        let config = StoreConfig::default();
        assert_eq!(config.codec, CodecKind::Remote);
        assert_eq!(config.coder_addr, "127.0.0.1:1234");
        assert_eq!(config.backend_addr, "127.0.0.1:6379");
        assert_eq!(config.pool_size, 8);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn codec_kind_parses_case_insensitively() {
        assert_eq!("bypass".parse::<CodecKind>().unwrap(), CodecKind::Bypass);
        assert_eq!("Remote".parse::<CodecKind>().unwrap(), CodecKind::Remote);
        assert_eq!(" BYPASS ".parse::<CodecKind>().unwrap(), CodecKind::Bypass);
        assert!("erasure".parse::<CodecKind>().is_err());
    }

    #[test]
    fn builder_overrides() {
        let config = StoreConfig::new()
            .with_codec(CodecKind::Bypass)
            .with_backend_addr("10.0.0.5:6379")
            .with_pool_size(2)
            .with_timeout(Duration::from_millis(250));

        assert_eq!(config.codec, CodecKind::Bypass);
        assert_eq!(config.backend_addr, "10.0.0.5:6379");
        assert_eq!(config.pool_size, 2);
        assert_eq!(config.timeout, Duration::from_millis(250));
    }
}
