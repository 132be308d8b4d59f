//! Transaction stack.

use crate::transaction::overlay::{Entry, Overlay};

/// Ordered overlays, outermost first and innermost last.
///
/// Depth is the number of overlays; depth 0 means no transaction is active.
#[derive(Debug, Clone)]
pub struct TransactionStack<V> {
    overlays: Vec<Overlay<V>>,
}

impl<V> Default for TransactionStack<V> {
    fn default() -> Self {
        Self {
            overlays: Vec::new(),
        }
    }
}

impl<V> TransactionStack<V> {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.overlays.len()
    }

    /// Checks if any transaction is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.overlays.is_empty()
    }

    /// Pushes a new empty overlay and returns the new depth.
    pub fn push(&mut self) -> usize {
        self.overlays.push(Overlay::new());
        self.overlays.len()
    }

    /// Pops the innermost overlay.
    pub fn pop(&mut self) -> Option<Overlay<V>> {
        self.overlays.pop()
    }

    /// Returns the innermost overlay for writing.
    pub fn top_mut(&mut self) -> Option<&mut Overlay<V>> {
        self.overlays.last_mut()
    }

    /// Finds the nearest entry for `key`, scanning innermost to outermost.
    ///
    /// `None` means no overlay mentions the key and the caller should fall
    /// back to the base map.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&Entry<V>> {
        self.overlays.iter().rev().find_map(|overlay| overlay.get(key))
    }

    /// Iterates overlays from outermost to innermost.
    pub fn iter(&self) -> impl Iterator<Item = &Overlay<V>> {
        self.overlays.iter()
    }

    /// Drops every overlay.
    pub fn clear(&mut self) {
        self.overlays.clear();
    }
}
