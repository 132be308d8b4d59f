//! Error types for the request handler.

use layerkv_core::CoreError;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while handling a request.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Malformed request or payload.
    #[error("{0}")]
    InvalidRequest(String),

    /// Key does not resolve at the current depth.
    #[error("key not found: {0}")]
    NotFound(String),

    /// Transaction protocol misuse.
    #[error("{0}")]
    BadState(String),

    /// `begin` would exceed the configured nesting limit.
    #[error("transaction depth limit reached: {max}")]
    DepthLimitExceeded {
        /// Configured limit.
        max: usize,
    },

    /// Key is longer than allowed.
    #[error("key too long: {len} bytes, limit is {max}")]
    KeyTooLong {
        /// Actual key length.
        len: usize,
        /// Configured limit.
        max: usize,
    },

    /// Request is disabled by configuration.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// No route matches the method and path.
    #[error("no route for {method} {path}")]
    UnknownRoute {
        /// Request method.
        method: String,
        /// Request path.
        path: String,
    },

    /// Body is not valid JSON.
    #[error("invalid request")]
    Json(#[from] serde_json::Error),
}

impl ServerError {
    /// Returns the HTTP-style status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound(_) | ServerError::UnknownRoute { .. } => 404,
            ServerError::Forbidden(_) => 403,
            ServerError::InvalidRequest(_)
            | ServerError::BadState(_)
            | ServerError::DepthLimitExceeded { .. }
            | ServerError::KeyTooLong { .. }
            | ServerError::Json(_) => 400,
        }
    }

    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status())
    }
}

impl From<CoreError> for ServerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { key } => ServerError::NotFound(key),
            err @ CoreError::NoActiveTransaction { .. } => ServerError::BadState(err.to_string()),
        }
    }
}
