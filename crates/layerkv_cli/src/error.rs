//! CLI error types.

use thiserror::Error;

/// Errors raised by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A script line could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// One or more commands in a script failed.
    #[error("{failed} of {total} commands failed")]
    Failed {
        /// Number of failed commands.
        failed: usize,
        /// Number of executed commands.
        total: usize,
    },
}
