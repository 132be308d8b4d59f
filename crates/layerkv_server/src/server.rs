//! Store server facade.

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::RequestHandler;
use crate::request::{Request, Response, SetBody};
use layerkv_core::SharedMap;
use percent_encoding::percent_decode_str;
use serde_json::Value;
use tracing::warn;

/// The store server.
///
/// Owns one shared map for its whole lifetime and answers requests against
/// it. It is transport-agnostic: a transport decodes whatever it receives
/// into a method, a path and an optional body, and hands them to
/// [`KvServer::handle_route`].
///
/// # Routes
///
/// | method   | path             | body                   |
/// |----------|------------------|------------------------|
/// | `GET`    | `/get/<key>`     |                        |
/// | `POST`   | `/set`           | `{"key": .., "value": ..}` |
/// | `DELETE` | `/delete/<key>`  |                        |
/// | `POST`   | `/begin`         |                        |
/// | `POST`   | `/commit`        |                        |
/// | `POST`   | `/rollback`      |                        |
/// | `GET`    | `/keys`          |                        |
/// | `GET`    | `/exists/<key>`  |                        |
/// | `GET`    | `/stats`         |                        |
/// | `POST`   | `/clear`         |                        |
///
/// # Example
///
/// ```
/// use layerkv_server::{KvServer, ServerConfig};
///
/// let server = KvServer::new(ServerConfig::default());
/// let response = server.handle_route("POST", "/set", Some(br#"{"key": "a", "value": 1}"#));
/// assert_eq!(response.status, 200);
///
/// let response = server.handle_route("GET", "/get/a", None);
/// assert_eq!(response.body["value"], 1);
/// ```
pub struct KvServer {
    handler: RequestHandler,
}

impl KvServer {
    /// Creates a server with a fresh, empty map.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_map(config, SharedMap::default())
    }

    /// Creates a server over an existing map handle.
    pub fn with_map(config: ServerConfig, map: SharedMap<Value>) -> Self {
        Self {
            handler: RequestHandler::new(map, config),
        }
    }

    /// Handles a decoded request, turning errors into error responses.
    pub fn handle(&self, request: Request) -> Response {
        let name = request.name();
        self.handler.handle(request).unwrap_or_else(|err| {
            warn!(request = name, status = err.status(), error = %err, "request rejected");
            Response::from(err)
        })
    }

    /// Decodes and handles a routed request.
    pub fn handle_route(&self, method: &str, path: &str, body: Option<&[u8]>) -> Response {
        match decode_route(method, path, body) {
            Ok(request) => self.handle(request),
            Err(err) => {
                warn!(method, path, error = %err, "undecodable request");
                Response::from(err)
            }
        }
    }

    /// Returns the current transaction depth.
    pub fn depth(&self) -> usize {
        self.handler.map().depth()
    }

    /// Returns the underlying map handle.
    pub fn map(&self) -> &SharedMap<Value> {
        self.handler.map()
    }
}

/// Decodes a method, path and optional body into a [`Request`].
///
/// # Errors
///
/// Returns `UnknownRoute` when nothing matches, `InvalidRequest` when a key
/// segment is not valid percent-encoded UTF-8, and `InvalidRequest` or
/// `Json` when a `set` body is malformed.
pub fn decode_route(method: &str, path: &str, body: Option<&[u8]>) -> ServerResult<Request> {
    let verb = method.to_ascii_uppercase();
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

    let request = match (verb.as_str(), segments.as_slice()) {
        ("GET", ["get", key]) if !key.is_empty() => Request::Get {
            key: decode_key(key)?,
        },
        ("POST", ["set"]) => decode_set(body)?,
        ("DELETE", ["delete", key]) if !key.is_empty() => Request::Delete {
            key: decode_key(key)?,
        },
        ("POST", ["begin"]) => Request::Begin,
        ("POST", ["commit"]) => Request::Commit,
        ("POST", ["rollback"]) => Request::Rollback,
        ("GET", ["keys"]) => Request::Keys,
        ("GET", ["exists", key]) if !key.is_empty() => Request::Exists {
            key: decode_key(key)?,
        },
        ("GET", ["stats"]) => Request::Stats,
        ("POST", ["clear"]) => Request::Clear,
        _ => {
            return Err(ServerError::UnknownRoute {
                method: method.to_string(),
                path: path.to_string(),
            })
        }
    };
    Ok(request)
}

/// Percent-decodes a key taken from a path segment.
fn decode_key(segment: &str) -> ServerResult<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|key| key.into_owned())
        .map_err(|_| ServerError::InvalidRequest("key is not valid UTF-8".into()))
}

fn decode_set(body: Option<&[u8]>) -> ServerResult<Request> {
    let body = body.ok_or_else(|| ServerError::InvalidRequest("invalid request".into()))?;
    let value: Value = serde_json::from_slice(body)?;

    let required = || ServerError::InvalidRequest("key and value required".into());
    let SetBody { key, value } = match value {
        Value::Object(_) => serde_json::from_value(value)?,
        _ => return Err(required()),
    };

    match (key, value) {
        (Some(Value::String(key)), Some(value)) => Ok(Request::Set { key, value }),
        (Some(_), Some(_)) => Err(ServerError::InvalidRequest("key must be a string".into())),
        _ => Err(required()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_point_routes() {
        assert_eq!(
            decode_route("GET", "/get/a", None).unwrap(),
            Request::Get { key: "a".into() }
        );
        assert_eq!(
            decode_route("delete", "/delete/a", None).unwrap(),
            Request::Delete { key: "a".into() }
        );
        assert_eq!(
            decode_route("GET", "/exists/a", None).unwrap(),
            Request::Exists { key: "a".into() }
        );
        assert_eq!(decode_route("GET", "/keys", None).unwrap(), Request::Keys);
    }

    #[test]
    fn decode_percent_encoded_keys() {
        assert_eq!(
            decode_route("GET", "/get/a%20b", None).unwrap(),
            Request::Get { key: "a b".into() }
        );
        assert_eq!(
            decode_route("DELETE", "/delete/x%2Fy", None).unwrap(),
            Request::Delete { key: "x/y".into() }
        );
        assert_eq!(
            decode_route("GET", "/exists/caf%C3%A9", None).unwrap(),
            Request::Exists { key: "café".into() }
        );

        let err = decode_route("GET", "/get/%FF", None).unwrap_err();
        assert!(matches!(err, ServerError::InvalidRequest(_)));
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn decode_transaction_routes() {
        assert_eq!(decode_route("POST", "/begin", None).unwrap(), Request::Begin);
        assert_eq!(decode_route("POST", "/commit", None).unwrap(), Request::Commit);
        assert_eq!(
            decode_route("POST", "/rollback", None).unwrap(),
            Request::Rollback
        );
    }

    #[test]
    fn unknown_routes() {
        for (method, path) in [
            ("GET", "/get/"),
            ("GET", "/get/a/b"),
            ("POST", "/get/a"),
            ("GET", "/begin"),
            ("GET", "/nothing"),
        ] {
            let err = decode_route(method, path, None).unwrap_err();
            assert_eq!(err.status(), 404, "{method} {path}");
        }
    }

    #[test]
    fn decode_set_body() {
        let request = decode_route("POST", "/set", Some(br#"{"key":"a","value":{"n":1}}"#)).unwrap();
        assert_eq!(
            request,
            Request::Set {
                key: "a".into(),
                value: json!({"n": 1})
            }
        );
    }

    #[test]
    fn set_body_errors() {
        let cases: [(Option<&[u8]>, &str); 6] = [
            (None, "invalid request"),
            (Some(b"not json"), "invalid request"),
            (Some(br#"[1, 2]"#), "key and value required"),
            (Some(br#"{"key": "a"}"#), "key and value required"),
            (Some(br#"{"key": "a", "value": null}"#), "key and value required"),
            (Some(br#"{"key": 5, "value": 1}"#), "key must be a string"),
        ];
        for (body, message) in cases {
            let err = decode_route("POST", "/set", body).unwrap_err();
            assert_eq!(err.status(), 400);
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn server_maps_errors_to_responses() {
        let server = KvServer::new(ServerConfig::default());

        let response = server.handle_route("GET", "/get/missing", None);
        assert_eq!(response.status, 404);
        assert_eq!(response.error_message(), Some("key not found: missing"));

        let response = server.handle_route("POST", "/rollback", None);
        assert_eq!(response.status, 400);
        assert_eq!(response.error_message(), Some("no transaction to rollback"));
    }
}
