//! Nested transaction scopes.
//!
//! A transaction is a delta layered over everything below it:
//! - **Overlay**: the writes and tombstones of one scope
//! - **Stack**: ordered overlays, innermost on top
//!
//! Transactions are a nesting mechanism, not a concurrency control one.
//! Commit merges the top overlay one level outward; rollback drops it.

mod overlay;
mod stack;

pub use overlay::{Entry, Overlay};
pub use stack::TransactionStack;
