//! Reference model for nested transactions.
//!
//! The model keeps a full copy of the visible state per transaction level:
//! `begin` clones the current state, `commit` replaces the parent with the
//! child copy and `rollback` drops it. It is slow but obviously correct,
//! which makes it a good oracle for the overlay engine.

use layerkv_core::{CoreError, TransactionalMap, TxnOperation};
use std::collections::BTreeMap;

/// An operation against a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// `get(key)`
    Get(String),
    /// `set(key, value)`
    Set(String, i64),
    /// `delete(key)`
    Delete(String),
    /// `exists(key)`
    Exists(String),
    /// `begin()`
    Begin,
    /// `commit()`
    Commit,
    /// `rollback()`
    Rollback,
    /// `list_keys()`
    ListKeys,
    /// `clear()`
    Clear,
}

/// Observable result of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Operation with no return value succeeded.
    Done,
    /// Value returned by `get`.
    Value(i64),
    /// Result of `exists`.
    Exists(bool),
    /// Result of `list_keys`.
    Keys(Vec<String>),
    /// Operation failed.
    Failed(CoreError),
}

/// Snapshot-copy model of a transactional map.
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    /// Visible state per level; index 0 is the base.
    levels: Vec<BTreeMap<String, i64>>,
}

impl Default for ReferenceModel {
    fn default() -> Self {
        Self {
            levels: vec![BTreeMap::new()],
        }
    }
}

impl ReferenceModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the transaction depth.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Returns the visible state.
    pub fn visible(&self) -> &BTreeMap<String, i64> {
        &self.levels[self.levels.len() - 1]
    }

    fn visible_mut(&mut self) -> &mut BTreeMap<String, i64> {
        let top = self.levels.len() - 1;
        &mut self.levels[top]
    }

    /// Applies an operation and returns its outcome.
    pub fn apply(&mut self, op: &Op) -> Outcome {
        match op {
            Op::Get(key) => match self.visible().get(key) {
                Some(value) => Outcome::Value(*value),
                None => Outcome::Failed(CoreError::not_found(key.as_str())),
            },
            Op::Set(key, value) => {
                self.visible_mut().insert(key.clone(), *value);
                Outcome::Done
            }
            Op::Delete(key) => {
                self.visible_mut().remove(key);
                Outcome::Done
            }
            Op::Exists(key) => Outcome::Exists(self.visible().contains_key(key)),
            Op::Begin => {
                let snapshot = self.visible().clone();
                self.levels.push(snapshot);
                Outcome::Done
            }
            Op::Commit => {
                if self.depth() == 0 {
                    return Outcome::Failed(CoreError::no_active_transaction(
                        TxnOperation::Commit,
                    ));
                }
                if let Some(child) = self.levels.pop() {
                    *self.visible_mut() = child;
                }
                Outcome::Done
            }
            Op::Rollback => {
                if self.depth() == 0 {
                    return Outcome::Failed(CoreError::no_active_transaction(
                        TxnOperation::Rollback,
                    ));
                }
                self.levels.pop();
                Outcome::Done
            }
            Op::ListKeys => Outcome::Keys(self.visible().keys().cloned().collect()),
            Op::Clear => {
                self.levels = vec![BTreeMap::new()];
                Outcome::Done
            }
        }
    }
}

/// Applies an operation to a real map and returns its outcome.
pub fn apply(map: &mut TransactionalMap<i64>, op: &Op) -> Outcome {
    let done = |result: Result<(), CoreError>| match result {
        Ok(()) => Outcome::Done,
        Err(err) => Outcome::Failed(err),
    };

    match op {
        Op::Get(key) => match map.get(key) {
            Ok(value) => Outcome::Value(*value),
            Err(err) => Outcome::Failed(err),
        },
        Op::Set(key, value) => {
            map.set(key.as_str(), *value);
            Outcome::Done
        }
        Op::Delete(key) => {
            map.delete(key.as_str());
            Outcome::Done
        }
        Op::Exists(key) => Outcome::Exists(map.exists(key)),
        Op::Begin => {
            map.begin();
            Outcome::Done
        }
        Op::Commit => done(map.commit()),
        Op::Rollback => done(map.rollback()),
        Op::ListKeys => Outcome::Keys(map.list_keys()),
        Op::Clear => {
            map.clear();
            Outcome::Done
        }
    }
}
