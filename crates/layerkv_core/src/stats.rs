//! Map statistics.
//!
//! Counters are relaxed atomics so that reads, which only borrow the map
//! immutably, can still be counted.
//!
//! # Usage
//!
//! ```rust
//! use layerkv_core::TransactionalMap;
//!
//! let mut map = TransactionalMap::new();
//! map.set("a", 1);
//! let _ = map.get("a");
//!
//! let stats = map.stats().snapshot();
//! assert_eq!(stats.writes, 1);
//! assert_eq!(stats.reads, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for a [`TransactionalMap`](crate::TransactionalMap).
///
/// Values are monotonically increasing until [`MapStats::reset`].
#[derive(Debug, Default)]
pub struct MapStats {
    /// Total number of `get`/`exists` lookups.
    reads: AtomicU64,
    /// Lookups that resolved to absence.
    misses: AtomicU64,
    /// Total number of `set` calls.
    writes: AtomicU64,
    /// Total number of `delete` calls.
    deletes: AtomicU64,
    /// Total number of `begin` calls.
    transactions_started: AtomicU64,
    /// Total number of successful commits.
    transactions_committed: AtomicU64,
    /// Total number of successful rollbacks.
    transactions_rolled_back: AtomicU64,
}

impl MapStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&self, hit: bool) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_begin(&self) {
        self.transactions_started.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rollback(&self) {
        self.transactions_rolled_back.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total number of lookups.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the number of lookups that found nothing.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Returns the total number of writes.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Returns the total number of deletes.
    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions started.
    pub fn transactions_started(&self) -> u64 {
        self.transactions_started.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions committed.
    pub fn transactions_committed(&self) -> u64 {
        self.transactions_committed.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions rolled back.
    pub fn transactions_rolled_back(&self) -> u64 {
        self.transactions_rolled_back.load(Ordering::Relaxed)
    }

    /// Zeroes every counter.
    pub fn reset(&self) {
        for counter in [
            &self.reads,
            &self.misses,
            &self.writes,
            &self.deletes,
            &self.transactions_started,
            &self.transactions_committed,
            &self.transactions_rolled_back,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Returns a snapshot of all stats.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads(),
            misses: self.misses(),
            writes: self.writes(),
            deletes: self.deletes(),
            transactions_started: self.transactions_started(),
            transactions_committed: self.transactions_committed(),
            transactions_rolled_back: self.transactions_rolled_back(),
        }
    }
}

/// A point-in-time copy of [`MapStats`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Total number of lookups.
    pub reads: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Total number of writes.
    pub writes: u64,
    /// Total number of deletes.
    pub deletes: u64,
    /// Total number of transactions started.
    pub transactions_started: u64,
    /// Total number of transactions committed.
    pub transactions_committed: u64,
    /// Total number of transactions rolled back.
    pub transactions_rolled_back: u64,
}
