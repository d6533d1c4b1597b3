//! One fragment of an encoded payload.

use serde::{Deserialize, Serialize};

/// A strip is an opaque byte sequence produced by encoding a payload.
///
/// Strips have no embedded index. Their ordering is carried externally:
/// by list position on the coder wire, and by the physical key suffix
/// in the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strip(Vec<u8>);

impl Strip {
    /// Creates a strip from raw bytes.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    /// Returns the strip's bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the strip, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the strip length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the strip holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Strip {
    fn from(data: Vec<u8>) -> Self {
        Self(data)
    }
}

impl From<&[u8]> for Strip {
    fn from(data: &[u8]) -> Self {
        Self(data.to_vec())
    }
}

impl AsRef<[u8]> for Strip {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_holds_bytes() {
        let strip = Strip::new(vec![1, 2, 3]);
        assert_eq!(strip.as_bytes(), &[1, 2, 3]);
        assert_eq!(strip.len(), 3);
        assert!(!strip.is_empty());
    }

    #[test]
    fn strip_from_slice() {
        let strip = Strip::from(&b"abc"[..]);
        assert_eq!(strip.into_bytes(), b"abc".to_vec());
    }
}
