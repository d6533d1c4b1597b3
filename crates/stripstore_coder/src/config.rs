//! Coder service configuration.

use crate::error::{CoderError, CoderResult};
use std::net::SocketAddr;

/// Environment variable naming the listen address (`host:port`).
pub const ENV_LISTEN: &str = "STRIPSTORE_CODER_LISTEN";

/// Environment variable naming the hosted codec.
pub const ENV_CODEC: &str = "STRIPSTORE_CODER_CODEC";

/// Default listen address when nothing is configured.
const DEFAULT_LISTEN: &str = "127.0.0.1:1234";

/// Configuration for the coder service.
#[derive(Debug, Clone)]
pub struct CoderConfig {
    /// Address to bind the framed-TCP listener to.
    pub listen_addr: SocketAddr,
}

impl CoderConfig {
    /// Creates a configuration listening on the given address.
    #[must_use]
    pub fn new(listen_addr: SocketAddr) -> Self {
        Self { listen_addr }
    }

    /// Resolves configuration from the environment, falling back to
    /// the loopback default.
    ///
    /// # Errors
    ///
    /// Fails when [`ENV_LISTEN`] is set but not a valid `host:port`.
    pub fn from_env() -> CoderResult<Self> {
        let listen = std::env::var(ENV_LISTEN).unwrap_or_else(|_| DEFAULT_LISTEN.to_string());
        let listen_addr = listen
            .parse()
            .map_err(|e| CoderError::Config(format!("{ENV_LISTEN}={listen}: {e}")))?;
        Ok(Self { listen_addr })
    }
}

impl Default for CoderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LISTEN.parse().expect("default listen address parses"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_loopback() {
        let config = CoderConfig::default();
        assert!(config.listen_addr.ip().is_loopback());
        assert_eq!(config.listen_addr.port(), 1234);
    }
}
