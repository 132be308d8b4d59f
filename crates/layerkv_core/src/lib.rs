//! # LayerKV Core
//!
//! In-memory key-value engine with nested transactions.
//!
//! This crate provides:
//! - A transactional map resolving reads through a stack of overlays
//! - Tombstone-based deletion inside transactions
//! - Commit (merge one level outward) and rollback (discard)
//! - A lock-protected shared handle for multi-threaded callers
//! - Operation counters
//!
//! The engine has no I/O and no global state. Observability is through
//! `tracing` events only.
//!
//! ```rust
//! use layerkv_core::TransactionalMap;
//!
//! let mut map = TransactionalMap::new();
//! map.set("a", 1);
//! map.set("b", 2);
//!
//! map.begin();
//! map.delete("a");
//! map.set("c", 3);
//! assert_eq!(map.list_keys(), vec!["b", "c"]);
//!
//! map.rollback().unwrap();
//! assert_eq!(map.list_keys(), vec!["a", "b"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod error;
mod map;
mod shared;
mod stats;
pub mod transaction;

pub use error::{CoreError, CoreResult, TxnOperation};
pub use map::TransactionalMap;
pub use shared::SharedMap;
pub use stats::{MapStats, StatsSnapshot};
pub use transaction::{Entry, Overlay, TransactionStack};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
