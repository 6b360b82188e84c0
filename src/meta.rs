//! Packet metadata.
//!
//! [`MetaSink`] is the minimal contract the Rerror machinery writes into,
//! [`MetaSource`] the one it reads back from.
//! [`Metadata`] is a small ordered key/value container implementing it,
//! one per packet.
//!
//! # Example
//!
//! ```
//! use tpwire::meta::{MetaSink, Metadata};
//!
//! let mut meta = Metadata::new();
//! meta.set("X-Trace", "abc".to_string());
//! meta.set("X-Trace", "def".to_string());
//!
//! assert_eq!(meta.get("X-Trace"), Some("def"));
//! assert_eq!(meta.len(), 1);
//! ```

use std::collections::HashMap;

/// Metadata key under which the encoded Rerror is stored.
pub const META_RERROR_KEY: &str = "X-Reply-Error";

/// Write side of a per-packet metadata store.
pub trait MetaSink {
    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);
}

/// Read side of a per-packet metadata store.
pub trait MetaSource {
    /// Value stored under `key`.
    fn get(&self, key: &str) -> Option<&str>;
}

impl MetaSink for HashMap<String, String> {
    fn set(&mut self, key: &str, value: String) {
        self.insert(key.to_string(), value);
    }
}

impl MetaSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

/// Ordered key/value metadata for a single packet.
///
/// Lookups are linear; packets carry a handful of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove and return the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl MetaSource for Metadata {
    fn get(&self, key: &str) -> Option<&str> {
        Metadata::get(self, key)
    }
}

impl MetaSink for Metadata {
    fn set(&mut self, key: &str, value: String) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut meta = Metadata::new();
        assert!(meta.is_empty());

        meta.set("a", "1".to_string());
        meta.set("b", "2".to_string());

        assert_eq!(meta.get("a"), Some("1"));
        assert_eq!(meta.get("b"), Some("2"));
        assert_eq!(meta.get("c"), None);
        assert_eq!(meta.len(), 2);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut meta = Metadata::new();
        meta.set("a", "1".to_string());
        meta.set("b", "2".to_string());
        meta.set("a", "3".to_string());

        let entries: Vec<_> = meta.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_remove() {
        let mut meta = Metadata::new();
        meta.set("a", "1".to_string());

        assert_eq!(meta.remove("a"), Some("1".to_string()));
        assert_eq!(meta.remove("a"), None);
        assert!(meta.is_empty());
    }

    #[test]
    fn test_hashmap_sink() {
        let mut map: HashMap<String, String> = HashMap::new();
        map.set(META_RERROR_KEY, "x".to_string());
        map.set(META_RERROR_KEY, "y".to_string());

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(META_RERROR_KEY).map(String::as_str), Some("y"));
    }

    #[test]
    fn test_meta_source_impls() {
        let mut meta = Metadata::new();
        meta.set("k", "v".to_string());
        let mut map: HashMap<String, String> = HashMap::new();
        map.set("k", "v".to_string());

        assert_eq!(MetaSource::get(&meta, "k"), Some("v"));
        assert_eq!(MetaSource::get(&map, "k"), Some("v"));
        assert_eq!(MetaSource::get(&map, "missing"), None);
    }
}
