//! Overlay state.

use std::collections::HashMap;

/// An entry recorded in an overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<V> {
    /// The key is set to this value in the overlay's scope.
    Value(V),
    /// The key is deleted in the overlay's scope, whatever lower layers say.
    Tombstone,
}

impl<V> Entry<V> {
    /// Returns the value, or `None` for a tombstone.
    #[must_use]
    pub fn as_value(&self) -> Option<&V> {
        match self {
            Entry::Value(value) => Some(value),
            Entry::Tombstone => None,
        }
    }

    /// Checks if this entry is a tombstone.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Entry::Tombstone)
    }
}

/// The delta introduced by one transaction scope.
///
/// Each key holds at most one entry; a later write to the same key
/// replaces the earlier one, tombstones included.
#[derive(Debug, Clone)]
pub struct Overlay<V> {
    entries: HashMap<String, Entry<V>>,
}

impl<V> Default for Overlay<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> Overlay<V> {
    /// Creates an empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value for `key`.
    pub fn put(&mut self, key: String, value: V) {
        self.entries.insert(key, Entry::Value(value));
    }

    /// Records a tombstone for `key`.
    pub fn delete(&mut self, key: String) {
        self.entries.insert(key, Entry::Tombstone);
    }

    /// Gets the entry recorded for `key`, if this overlay mentions it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry<V>> {
        self.entries.get(key)
    }

    /// Returns all recorded entries.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Entry<V>)> {
        self.entries.iter()
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the overlay records nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges `newer` into this overlay.
    ///
    /// Entries from `newer` overwrite same-key entries here. Tombstones are
    /// copied as tombstones.
    pub fn absorb(&mut self, newer: Overlay<V>) {
        self.entries.extend(newer.entries);
    }

    pub(crate) fn into_entries(self) -> impl Iterator<Item = (String, Entry<V>)> {
        self.entries.into_iter()
    }
}
