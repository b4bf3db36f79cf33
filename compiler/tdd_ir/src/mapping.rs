//! Ordered, key-unique mappings.

use indexmap::map::{IntoIter, Iter, Keys, Values};
use indexmap::IndexMap;

use crate::Value;

/// A TDD hash: insertion-ordered, with unique string keys.
///
/// Re-inserting an existing key replaces its value and keeps the key at the
/// position of its first insertion, so the result of a literal with
/// duplicate keys is deterministic (last value wins).
///
/// Equality is map equality: two mappings with the same entries in a
/// different order compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: IndexMap<String, Value>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove an entry, preserving the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Copy every entry of `other` into `self`; entries of `other` win.
    pub fn merge(&mut self, other: Mapping) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Keys<'_, String, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> Values<'_, String, Value> {
        self.entries.values()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}
