//! Transactional map.

use crate::error::{CoreError, CoreResult, TxnOperation};
use crate::stats::MapStats;
use crate::transaction::{Entry, TransactionStack};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// An in-memory key-value map with nested transactions.
///
/// State is a base map of committed values plus a stack of overlays, one
/// per open transaction. Reads resolve through the overlays innermost
/// first and fall back to the base; writes land in the innermost overlay,
/// or directly in the base when no transaction is active.
///
/// The base never holds tombstones: deleting against the base removes the
/// key.
///
/// # Example
///
/// ```rust
/// use layerkv_core::{CoreError, TransactionalMap};
///
/// let mut map = TransactionalMap::new();
/// map.set("a", 1);
///
/// map.begin();
/// map.set("a", 2);
/// assert_eq!(map.get("a"), Ok(&2));
/// map.rollback()?;
///
/// assert_eq!(map.get("a"), Ok(&1));
/// # Ok::<(), CoreError>(())
/// ```
#[derive(Debug)]
pub struct TransactionalMap<V> {
    /// Committed state.
    base: BTreeMap<String, V>,
    /// Open transactions, innermost last.
    stack: TransactionStack<V>,
    /// Operation counters.
    stats: MapStats,
}

impl<V> Default for TransactionalMap<V> {
    fn default() -> Self {
        Self {
            base: BTreeMap::new(),
            stack: TransactionStack::new(),
            stats: MapStats::new(),
        }
    }
}

impl<V> TransactionalMap<V> {
    /// Creates an empty map with no active transaction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `key` at the current transaction depth.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no layer mentions the key, or if the nearest
    /// layer that does holds a tombstone.
    pub fn get(&self, key: &str) -> CoreResult<&V> {
        let resolved = match self.stack.resolve(key) {
            Some(entry) => entry.as_value(),
            None => self.base.get(key),
        };
        self.stats.record_read(resolved.is_some());
        trace!(key, found = resolved.is_some(), depth = self.depth(), "get");
        resolved.ok_or_else(|| CoreError::not_found(key))
    }

    /// Sets `key` to `value` in the innermost scope.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        trace!(key = %key, depth = self.depth(), "set");
        self.stats.record_write();
        match self.stack.top_mut() {
            Some(overlay) => overlay.put(key, value),
            None => {
                self.base.insert(key, value);
            }
        }
    }

    /// Deletes `key` in the innermost scope.
    ///
    /// Inside a transaction this always records a tombstone, even for a key
    /// that exists nowhere. Outside one it removes the key from the base if
    /// present. Either way it never fails.
    pub fn delete(&mut self, key: impl Into<String>) {
        let key = key.into();
        trace!(key = %key, depth = self.depth(), "delete");
        self.stats.record_delete();
        match self.stack.top_mut() {
            Some(overlay) => overlay.delete(key),
            None => {
                self.base.remove(&key);
            }
        }
    }

    /// Checks if `key` resolves to a value at the current depth.
    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    /// Opens a nested transaction.
    pub fn begin(&mut self) {
        let depth = self.stack.push();
        self.stats.record_begin();
        debug!(depth, "transaction started");
    }

    /// Commits the innermost transaction into its parent scope.
    ///
    /// The committed entries overwrite same-key entries in the parent
    /// overlay, or are applied to the base if this was the outermost
    /// transaction (tombstones become removals).
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTransaction` at depth 0, with no change.
    pub fn commit(&mut self) -> CoreResult<()> {
        let overlay = self
            .stack
            .pop()
            .ok_or_else(|| CoreError::no_active_transaction(TxnOperation::Commit))?;
        let merged = overlay.len();

        match self.stack.top_mut() {
            Some(parent) => parent.absorb(overlay),
            None => {
                for (key, entry) in overlay.into_entries() {
                    match entry {
                        Entry::Value(value) => {
                            self.base.insert(key, value);
                        }
                        Entry::Tombstone => {
                            self.base.remove(&key);
                        }
                    }
                }
            }
        }

        self.stats.record_commit();
        debug!(depth = self.depth(), merged, "transaction committed");
        Ok(())
    }

    /// Discards the innermost transaction.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTransaction` at depth 0, with no change.
    pub fn rollback(&mut self) -> CoreResult<()> {
        let overlay = self
            .stack
            .pop()
            .ok_or_else(|| CoreError::no_active_transaction(TxnOperation::Rollback))?;

        self.stats.record_rollback();
        debug!(
            depth = self.depth(),
            discarded = overlay.len(),
            "transaction rolled back"
        );
        Ok(())
    }

    /// Returns the effective keys at the current depth, sorted.
    ///
    /// Uncommitted changes of every open transaction are included.
    #[must_use]
    pub fn list_keys(&self) -> Vec<String> {
        self.effective_keys().into_iter().map(str::to_owned).collect()
    }

    /// Returns the number of effective keys at the current depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effective_keys().len()
    }

    /// Checks if no key resolves at the current depth.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the transaction nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Checks if a transaction is active.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.stack.is_active()
    }

    /// Returns the operation counters.
    #[must_use]
    pub fn stats(&self) -> &MapStats {
        &self.stats
    }

    /// Drops all data and every open transaction.
    ///
    /// Counters are left untouched; use [`MapStats::reset`] for those.
    pub fn clear(&mut self) {
        debug!(
            keys = self.base.len(),
            depth = self.depth(),
            "clearing map"
        );
        self.base.clear();
        self.stack.clear();
    }

    fn effective_keys(&self) -> BTreeSet<&str> {
        let mut keys: BTreeSet<&str> = self.base.keys().map(String::as_str).collect();
        for overlay in self.stack.iter() {
            for (key, entry) in overlay.entries() {
                if entry.is_tombstone() {
                    keys.remove(key.as_str());
                } else {
                    keys.insert(key.as_str());
                }
            }
        }
        keys
    }
}
