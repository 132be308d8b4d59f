//! Request and response types.

use crate::error::ServerError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A request against the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Resolve a key.
    Get {
        /// Key to look up.
        key: String,
    },
    /// Set a key in the innermost scope.
    Set {
        /// Key to write.
        key: String,
        /// Value to store.
        value: Value,
    },
    /// Delete a key in the innermost scope.
    Delete {
        /// Key to delete.
        key: String,
    },
    /// Open a nested transaction.
    Begin,
    /// Commit the innermost transaction.
    Commit,
    /// Roll back the innermost transaction.
    Rollback,
    /// List effective keys.
    Keys,
    /// Check whether a key resolves.
    Exists {
        /// Key to check.
        key: String,
    },
    /// Report operation counters.
    Stats,
    /// Drop all data and transactions.
    Clear,
}

impl Request {
    /// Returns the key this request targets, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Request::Get { key }
            | Request::Set { key, .. }
            | Request::Delete { key }
            | Request::Exists { key } => Some(key.as_str()),
            _ => None,
        }
    }

    /// Returns the request name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Request::Get { .. } => "get",
            Request::Set { .. } => "set",
            Request::Delete { .. } => "delete",
            Request::Begin => "begin",
            Request::Commit => "commit",
            Request::Rollback => "rollback",
            Request::Keys => "keys",
            Request::Exists { .. } => "exists",
            Request::Stats => "stats",
            Request::Clear => "clear",
        }
    }
}

/// Body of a `set` request as sent over the wire.
///
/// Both fields are optional so that a missing field and an explicit `null`
/// are reported the same way.
#[derive(Debug, Deserialize)]
pub(crate) struct SetBody {
    pub key: Option<Value>,
    pub value: Option<Value>,
}

/// A response with an HTTP-style status and a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Status code.
    pub status: u16,
    /// JSON body.
    pub body: Value,
}

impl Response {
    /// `{"status": "ok"}`.
    pub fn ok() -> Self {
        Self::with_body(json!({ "status": "ok" }))
    }

    /// `{"value": value}`.
    pub fn value(value: Value) -> Self {
        Self::with_body(json!({ "value": value }))
    }

    /// `{"keys": [...]}`.
    pub fn keys(keys: Vec<String>) -> Self {
        Self::with_body(json!({ "keys": keys }))
    }

    /// `{"exists": bool}`.
    pub fn exists(exists: bool) -> Self {
        Self::with_body(json!({ "exists": exists }))
    }

    /// `{"status": "ok", "depth": n}`.
    pub fn depth(depth: usize) -> Self {
        Self::with_body(json!({ "status": "ok", "depth": depth }))
    }

    /// A 200 response with an arbitrary body.
    pub fn with_body(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// Checks if the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the error message of a failed response.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

impl From<ServerError> for Response {
    fn from(err: ServerError) -> Self {
        Self {
            status: err.status(),
            body: json!({ "error": err.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_bodies() {
        assert_eq!(Response::ok().body, json!({"status": "ok"}));
        assert_eq!(Response::value(json!(1)).body, json!({"value": 1}));
        assert_eq!(
            Response::keys(vec!["a".into(), "b".into()]).body,
            json!({"keys": ["a", "b"]})
        );
        assert_eq!(Response::exists(false).body, json!({"exists": false}));
    }

    #[test]
    fn error_response() {
        let response = Response::from(ServerError::NotFound("a".into()));
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
        assert_eq!(response.error_message(), Some("key not found: a"));
    }

    #[test]
    fn request_json_shape() {
        let request: Request =
            serde_json::from_value(json!({"op": "set", "key": "a", "value": [1, 2]})).unwrap();
        assert_eq!(
            request,
            Request::Set {
                key: "a".into(),
                value: json!([1, 2])
            }
        );
        assert_eq!(request.key(), Some("a"));

        let request: Request = serde_json::from_value(json!({"op": "begin"})).unwrap();
        assert_eq!(request, Request::Begin);
        assert_eq!(request.key(), None);
    }
}
