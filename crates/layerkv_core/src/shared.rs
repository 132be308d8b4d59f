//! Shared, lock-protected map handle.

use crate::error::CoreResult;
use crate::map::TransactionalMap;
use crate::stats::StatsSnapshot;
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable handle to one [`TransactionalMap`] behind a single lock.
///
/// Every method holds the lock for the whole operation, so no caller can
/// observe a half-applied commit or a half-pushed overlay. All handles share
/// one transaction stack: transactions are a session nesting mechanism, not
/// per-caller isolation.
///
/// Use [`SharedMap::with`] to run several operations atomically.
#[derive(Debug)]
pub struct SharedMap<V> {
    inner: Arc<Mutex<TransactionalMap<V>>>,
}

impl<V> Clone for SharedMap<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for SharedMap<V> {
    fn default() -> Self {
        Self::new(TransactionalMap::new())
    }
}

impl<V> SharedMap<V> {
    /// Wraps an existing map.
    pub fn new(map: TransactionalMap<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(map)),
        }
    }

    /// Runs `f` with exclusive access to the map.
    pub fn with<R>(&self, f: impl FnOnce(&mut TransactionalMap<V>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Sets `key` to `value` in the innermost scope.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.inner.lock().set(key, value);
    }

    /// Deletes `key` in the innermost scope.
    pub fn delete(&self, key: impl Into<String>) {
        self.inner.lock().delete(key);
    }

    /// Checks if `key` resolves at the current depth.
    pub fn exists(&self, key: &str) -> bool {
        self.inner.lock().exists(key)
    }

    /// Opens a nested transaction and returns the new depth.
    pub fn begin(&self) -> usize {
        let mut map = self.inner.lock();
        map.begin();
        map.depth()
    }

    /// Commits the innermost transaction and returns the new depth.
    pub fn commit(&self) -> CoreResult<usize> {
        let mut map = self.inner.lock();
        map.commit()?;
        Ok(map.depth())
    }

    /// Rolls back the innermost transaction and returns the new depth.
    pub fn rollback(&self) -> CoreResult<usize> {
        let mut map = self.inner.lock();
        map.rollback()?;
        Ok(map.depth())
    }

    /// Returns the effective keys at the current depth, sorted.
    pub fn list_keys(&self) -> Vec<String> {
        self.inner.lock().list_keys()
    }

    /// Returns the transaction nesting depth.
    pub fn depth(&self) -> usize {
        self.inner.lock().depth()
    }

    /// Returns a snapshot of the operation counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats().snapshot()
    }

    /// Drops all data and every open transaction.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl<V: Clone> SharedMap<V> {
    /// Resolves `key` and returns a copy of its value.
    pub fn get(&self, key: &str) -> CoreResult<V> {
        self.inner.lock().get(key).cloned()
    }
}
