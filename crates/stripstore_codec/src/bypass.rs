//! Passthrough codec with no redundancy.

use crate::error::{CodecError, CodecResult};
use crate::strip::Strip;
use crate::Codec;

/// Number of strips the bypass codec aims for per payload.
pub const DEFAULT_STRIP_COUNT: usize = 10;

/// A codec that splits the payload into contiguous chunks and
/// concatenates them back, adding no redundancy.
///
/// Encoding partitions the payload into at most `strip_count` chunks of
/// `ceil(len / strip_count)` bytes each; the final chunk is shorter when
/// the length is not evenly divisible. Every input byte lands in exactly
/// one strip, so decoding the full ordered sequence reproduces the
/// payload for any length. Payloads shorter than `strip_count` bytes
/// produce fewer, single-byte strips.
///
/// Decoding requires the full, gapless strip sequence in encode order.
/// With strips missing the output is silently wrong; that is the
/// documented limitation of a codec without redundancy.
#[derive(Debug, Clone)]
pub struct BypassCodec {
    strip_count: usize,
}

impl BypassCodec {
    /// Creates a bypass codec targeting [`DEFAULT_STRIP_COUNT`] strips.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strip_count: DEFAULT_STRIP_COUNT,
        }
    }

    /// Creates a bypass codec targeting a custom strip count.
    ///
    /// # Panics
    ///
    /// Panics if `strip_count` is zero.
    #[must_use]
    pub fn with_strip_count(strip_count: usize) -> Self {
        assert!(strip_count > 0, "strip count must be non-zero");
        Self { strip_count }
    }

    /// Returns the target strip count.
    #[must_use]
    pub fn strip_count(&self) -> usize {
        self.strip_count
    }
}

impl Default for BypassCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for BypassCodec {
    fn encode(&self, payload: &[u8]) -> CodecResult<Vec<Strip>> {
        if payload.is_empty() {
            return Err(CodecError::EmptyPayload);
        }

        let chunk_len = payload.len().div_ceil(self.strip_count);
        Ok(payload.chunks(chunk_len).map(Strip::from).collect())
    }

    fn decode(&self, strips: &[Strip]) -> CodecResult<Vec<u8>> {
        if strips.is_empty() {
            return Err(CodecError::EmptyStripSet);
        }

        let total: usize = strips.iter().map(Strip::len).sum();
        let mut payload = Vec::with_capacity(total);
        for strip in strips {
            payload.extend_from_slice(strip.as_bytes());
        }
        Ok(payload)
    }

    fn name(&self) -> &'static str {
        "bypass"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encode_empty_payload_fails() {
        let codec = BypassCodec::new();
        assert!(matches!(codec.encode(&[]), Err(CodecError::EmptyPayload)));
    }

    #[test]
    fn decode_empty_strip_set_fails() {
        let codec = BypassCodec::new();
        assert!(matches!(codec.decode(&[]), Err(CodecError::EmptyStripSet)));
    }

    #[test]
    fn roundtrip_evenly_divisible() {
        let codec = BypassCodec::new();
        let payload: Vec<u8> = (0..100u8).collect();

        let strips = codec.encode(&payload).unwrap();
        assert_eq!(strips.len(), 10);
        assert!(strips.iter().all(|s| s.len() == 10));
        assert_eq!(codec.decode(&strips).unwrap(), payload);
    }

    #[test]
    fn roundtrip_with_remainder() {
        let codec = BypassCodec::new();
        let payload: Vec<u8> = (0..103).map(|i| i as u8).collect();

        let strips = codec.encode(&payload).unwrap();
        // ceil(103 / 10) = 11 bytes per strip, 10 strips, last one short
        assert_eq!(strips.len(), 10);
        assert_eq!(strips.last().unwrap().len(), 4);
        assert_eq!(codec.decode(&strips).unwrap(), payload);
    }

    #[test]
    fn short_payload_yields_fewer_strips() {
        let codec = BypassCodec::new();
        let strips = codec.encode(&[1, 2, 3]).unwrap();
        assert_eq!(strips.len(), 3);
        assert_eq!(codec.decode(&strips).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn single_byte_payload() {
        let codec = BypassCodec::new();
        let strips = codec.encode(&[42]).unwrap();
        assert_eq!(strips.len(), 1);
        assert_eq!(codec.decode(&strips).unwrap(), vec![42]);
    }

    #[test]
    fn no_bytes_lost_for_any_small_length() {
        let codec = BypassCodec::new();
        for len in 1..=41usize {
            let payload: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let strips = codec.encode(&payload).unwrap();
            assert!(strips.len() <= DEFAULT_STRIP_COUNT);
            assert!(strips.iter().all(|s| !s.is_empty()), "len {len}");
            assert_eq!(codec.decode(&strips).unwrap(), payload, "len {len}");
        }
    }

    #[test]
    fn custom_strip_count() {
        let codec = BypassCodec::with_strip_count(4);
        let payload: Vec<u8> = (0..9u8).collect();
        let strips = codec.encode(&payload).unwrap();
        // ceil(9 / 4) = 3 bytes per strip
        assert_eq!(strips.len(), 3);
        assert_eq!(codec.decode(&strips).unwrap(), payload);
    }

    proptest! {
        #[test]
        fn roundtrip_arbitrary_payloads(payload in prop::collection::vec(any::<u8>(), 1..4096)) {
            let codec = BypassCodec::new();
            let strips = codec.encode(&payload).unwrap();
            prop_assert!(strips.len() <= DEFAULT_STRIP_COUNT);
            prop_assert_eq!(codec.decode(&strips).unwrap(), payload);
        }
    }
}
