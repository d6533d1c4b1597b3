//! In-memory backend for testing.

use crate::backend::KvBackend;
use crate::error::BackendResult;
use parking_lot::RwLock;
use std::collections::HashMap;

/// An in-memory key-value backend.
///
/// Suitable for unit tests, integration tests, and ephemeral stores
/// that do not need persistence. `multi_set` applies all pairs under
/// one write lock, so within this process it is atomic.
///
/// # Example
///
/// ```rust
/// use stripstore_backend::{InMemoryBackend, KvBackend};
///
/// let backend = InMemoryBackend::new();
/// backend.multi_set(&[("a-0".into(), vec![1])]).unwrap();
/// assert_eq!(backend.keys_matching("a-*").unwrap(), vec!["a-0".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns true if no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Returns all stored keys, sorted lexicographically.
    ///
    /// Useful for asserting on exact backend contents in tests.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.data.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Removes all keys.
    pub fn clear(&self) {
        self.data.write().clear();
    }

    /// Removes a single key, returning its value if present.
    ///
    /// Useful for simulating a partially-vanished write in tests.
    pub fn remove(&self, key: &str) -> Option<Vec<u8>> {
        self.data.write().remove(key)
    }

    fn matches(pattern: &str, key: &str) -> bool {
        match pattern.strip_suffix('*') {
            Some(prefix) => key.starts_with(prefix),
            None => key == pattern,
        }
    }
}

impl KvBackend for InMemoryBackend {
    fn multi_get(&self, keys: &[String]) -> BackendResult<Vec<Option<Vec<u8>>>> {
        let data = self.data.read();
        Ok(keys.iter().map(|k| data.get(k).cloned()).collect())
    }

    fn multi_set(&self, pairs: &[(String, Vec<u8>)]) -> BackendResult<()> {
        let mut data = self.data.write();
        for (key, value) in pairs {
            data.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn keys_matching(&self, pattern: &str) -> BackendResult<Vec<String>> {
        let data = self.data.read();
        Ok(data
            .keys()
            .filter(|k| Self::matches(pattern, k))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_new_is_empty() {
        let backend = InMemoryBackend::new();
        assert!(backend.is_empty());
        assert_eq!(backend.len(), 0);
    }

    #[test]
    fn memory_multi_set_then_multi_get() {
        let backend = InMemoryBackend::new();
        backend
            .multi_set(&[
                ("k-0".into(), vec![1]),
                ("k-1".into(), vec![2]),
            ])
            .unwrap();

        let values = backend
            .multi_get(&["k-0".into(), "k-1".into(), "k-2".into()])
            .unwrap();
        assert_eq!(values, vec![Some(vec![1]), Some(vec![2]), None]);
    }

    #[test]
    fn memory_multi_get_preserves_request_order() {
        let backend = InMemoryBackend::new();
        backend
            .multi_set(&[("a".into(), vec![1]), ("b".into(), vec![2])])
            .unwrap();

        let values = backend.multi_get(&["b".into(), "a".into()]).unwrap();
        assert_eq!(values, vec![Some(vec![2]), Some(vec![1])]);
    }

    #[test]
    fn memory_keys_matching_prefix() {
        let backend = InMemoryBackend::new();
        backend
            .multi_set(&[
                ("key-0".into(), vec![0]),
                ("key-1".into(), vec![1]),
                ("other-0".into(), vec![2]),
            ])
            .unwrap();

        let mut keys = backend.keys_matching("key-*").unwrap();
        keys.sort();
        assert_eq!(keys, vec!["key-0".to_string(), "key-1".to_string()]);
    }

    #[test]
    fn memory_keys_matching_exact_without_star() {
        let backend = InMemoryBackend::new();
        backend.multi_set(&[("key".into(), vec![0])]).unwrap();

        assert_eq!(backend.keys_matching("key").unwrap(), vec!["key".to_string()]);
        assert!(backend.keys_matching("ke").unwrap().is_empty());
    }

    #[test]
    fn memory_keys_matching_empty_backend() {
        let backend = InMemoryBackend::new();
        assert!(backend.keys_matching("anything-*").unwrap().is_empty());
    }

    #[test]
    fn memory_overwrite_keeps_last_value() {
        let backend = InMemoryBackend::new();
        backend.multi_set(&[("k".into(), vec![1])]).unwrap();
        backend.multi_set(&[("k".into(), vec![2])]).unwrap();

        let values = backend.multi_get(&["k".into()]).unwrap();
        assert_eq!(values, vec![Some(vec![2])]);
    }

    #[test]
    fn memory_remove() {
        let backend = InMemoryBackend::new();
        backend.multi_set(&[("k".into(), vec![1])]).unwrap();
        assert_eq!(backend.remove("k"), Some(vec![1]));
        assert!(backend.is_empty());
    }
}
