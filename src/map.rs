//! Ordered key/value snapshot of a document.
//!
//! [`EntryMap`] wraps an [`IndexMap`] so entries iterate in document order.
//! When a key appears more than once the first occurrence wins, matching
//! [`Document::get`](crate::Document::get).
//!
//! ## Examples
//!
//! ```rust
//! use kvedit::parse_str;
//!
//! let doc = parse_str("b=2\na=1\nb=3").unwrap();
//! let map = doc.to_map();
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["b", "a"]);
//! assert_eq!(map.get("b"), Some("2"));
//! ```

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// An insertion-ordered map of keys to raw value text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryMap(IndexMap<String, String>);

impl EntryMap {
    #[must_use]
    pub fn new() -> Self {
        EntryMap(IndexMap::new())
    }

    /// Inserts `key` unless it is already present. Returns `true` if inserted.
    pub fn insert_first(&mut self, key: String, value: String) -> bool {
        if self.0.contains_key(&key) {
            return false;
        }
        self.0.insert(key, value);
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, String> {
        self.0.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }
}

impl IntoIterator for EntryMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EntryMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<EntryMap> for HashMap<String, String> {
    fn from(map: EntryMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl Serialize for EntryMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_insert_wins() {
        let mut map = EntryMap::new();
        assert!(map.insert_first("a".to_string(), "1".to_string()));
        assert!(!map.insert_first("a".to_string(), "2".to_string()));
        assert_eq!(map.get("a"), Some("1"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_into_hash_map() {
        let mut map = EntryMap::new();
        map.insert_first("x".to_string(), "9".to_string());
        let hash: HashMap<String, String> = map.into();
        assert_eq!(hash.get("x").map(String::as_str), Some("9"));
    }
}
