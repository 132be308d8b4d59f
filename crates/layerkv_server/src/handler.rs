//! Request handlers.

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::request::{Request, Response};
use layerkv_core::SharedMap;
use serde_json::{json, Value};
use tracing::debug;

/// Executes requests against a shared map.
///
/// Validation that belongs to the calling layer (key limits, nesting limit,
/// strict delete, admin gating) happens here; the map itself never rejects
/// a write.
pub struct RequestHandler {
    map: SharedMap<Value>,
    config: ServerConfig,
}

impl RequestHandler {
    /// Creates a new request handler.
    pub fn new(map: SharedMap<Value>, config: ServerConfig) -> Self {
        Self { map, config }
    }

    /// Returns the handler configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the underlying map handle.
    pub fn map(&self) -> &SharedMap<Value> {
        &self.map
    }

    /// Handles a single request.
    pub fn handle(&self, request: Request) -> ServerResult<Response> {
        if let Some(key) = request.key() {
            self.validate_key(key)?;
        }
        debug!(request = request.name(), key = request.key(), "handling request");

        match request {
            Request::Get { key } => Ok(Response::value(self.map.get(&key)?)),
            Request::Set { key, value } => {
                self.map.set(key, value);
                Ok(Response::ok())
            }
            Request::Delete { key } => self.handle_delete(key),
            Request::Begin => self.handle_begin(),
            Request::Commit => Ok(Response::depth(self.map.commit()?)),
            Request::Rollback => Ok(Response::depth(self.map.rollback()?)),
            Request::Keys => Ok(Response::keys(self.map.list_keys())),
            Request::Exists { key } => Ok(Response::exists(self.map.exists(&key))),
            Request::Stats => Ok(self.handle_stats()),
            Request::Clear => self.handle_clear(),
        }
    }

    fn handle_delete(&self, key: String) -> ServerResult<Response> {
        if !self.config.strict_delete {
            self.map.delete(key);
            return Ok(Response::ok());
        }

        self.map.with(|map| {
            if !map.exists(&key) {
                return Err(ServerError::NotFound(key));
            }
            map.delete(key);
            Ok(Response::ok())
        })
    }

    fn handle_begin(&self) -> ServerResult<Response> {
        let max_depth = self.config.max_depth;
        self.map.with(|map| {
            if let Some(max) = max_depth {
                if map.depth() >= max {
                    return Err(ServerError::DepthLimitExceeded { max });
                }
            }
            map.begin();
            Ok(Response::depth(map.depth()))
        })
    }

    fn handle_stats(&self) -> Response {
        let (depth, stats) = self.map.with(|map| (map.depth(), map.stats().snapshot()));
        Response::with_body(json!({
            "depth": depth,
            "reads": stats.reads,
            "misses": stats.misses,
            "writes": stats.writes,
            "deletes": stats.deletes,
            "transactions_started": stats.transactions_started,
            "transactions_committed": stats.transactions_committed,
            "transactions_rolled_back": stats.transactions_rolled_back,
        }))
    }

    fn handle_clear(&self) -> ServerResult<Response> {
        if !self.config.allow_clear {
            return Err(ServerError::Forbidden("clear is disabled".into()));
        }
        self.map.clear();
        Ok(Response::ok())
    }

    fn validate_key(&self, key: &str) -> ServerResult<()> {
        if key.is_empty() {
            return Err(ServerError::InvalidRequest("key must not be empty".into()));
        }
        if key.len() > self.config.max_key_len {
            return Err(ServerError::KeyTooLong {
                len: key.len(),
                max: self.config.max_key_len,
            });
        }
        Ok(())
    }
}
