//! Error types for LayerKV core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in LayerKV core operations.
///
/// The taxonomy is deliberately small: only reads and transaction
/// boundaries can fail. Writes, deletes and `begin` are infallible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Key resolves to absence at the current transaction depth.
    #[error("key not found: {key}")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },

    /// `commit` or `rollback` was called with no active transaction.
    #[error("no transaction to {operation}")]
    NoActiveTransaction {
        /// The transaction operation that was attempted.
        operation: TxnOperation,
    },
}

/// Transaction boundary operation, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnOperation {
    /// Merge the innermost overlay outward.
    Commit,
    /// Discard the innermost overlay.
    Rollback,
}

impl std::fmt::Display for TxnOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Commit => f.write_str("commit"),
            Self::Rollback => f.write_str("rollback"),
        }
    }
}

impl CoreError {
    /// Creates a not found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates a no active transaction error.
    pub fn no_active_transaction(operation: TxnOperation) -> Self {
        Self::NoActiveTransaction { operation }
    }

    /// Returns true if this is a `NotFound` error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(CoreError::not_found("a").to_string(), "key not found: a");
        assert_eq!(
            CoreError::no_active_transaction(TxnOperation::Commit).to_string(),
            "no transaction to commit"
        );
        assert_eq!(
            CoreError::no_active_transaction(TxnOperation::Rollback).to_string(),
            "no transaction to rollback"
        );
    }

    #[test]
    fn error_classification() {
        assert!(CoreError::not_found("x").is_not_found());
        assert!(!CoreError::no_active_transaction(TxnOperation::Commit).is_not_found());
    }
}
