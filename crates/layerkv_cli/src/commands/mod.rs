//! CLI command implementations.

pub mod exec;
pub mod shell;
