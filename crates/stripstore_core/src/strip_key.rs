//! Physical strip key derivation and ordering.
//!
//! A payload's N strips are stored under `<logical>-0 .. <logical>-(N-1)`.
//! This format is a de facto wire format between writer and reader:
//! the separator and the 0-based contiguous indexing must be preserved
//! for compatibility with already-stored data.
//!
//! Reads order candidate keys **numerically** by the integer after the
//! final separator; lexicographic ordering would place `k-10` before
//! `k-2` and corrupt reassembly.

/// Separator between the logical key and the strip index.
pub const SEPARATOR: char = '-';

/// Derives the physical key for one strip.
#[must_use]
pub fn strip_key(logical: &str, index: usize) -> String {
    format!("{logical}{SEPARATOR}{index}")
}

/// The enumeration pattern matching all strips of a logical key.
#[must_use]
pub fn pattern(logical: &str) -> String {
    format!("{logical}{SEPARATOR}*")
}

/// Extracts the strip index from a physical key.
///
/// Returns `None` when the key has no separator or the suffix after
/// the final separator is not a plain decimal integer.
#[must_use]
pub fn strip_index(key: &str) -> Option<u64> {
    let (_, suffix) = key.rsplit_once(SEPARATOR)?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// Sorts physical keys numerically by strip index.
///
/// # Errors
///
/// Returns the offending key when one lacks a parseable trailing
/// index. Since the store is the only writer of strip keys, such a key
/// is a contract violation and the read cannot proceed.
pub fn sort_numeric(keys: Vec<String>) -> Result<Vec<String>, String> {
    let mut indexed = Vec::with_capacity(keys.len());
    for key in keys {
        match strip_index(&key) {
            Some(index) => indexed.push((index, key)),
            None => return Err(key),
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, key)| key).collect())
}
