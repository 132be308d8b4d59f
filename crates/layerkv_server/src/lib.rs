//! # LayerKV Server
//!
//! Transport-agnostic request handling for LayerKV.
//!
//! This crate provides:
//! - Request and response types mirroring the store's REST routes
//! - Route decoding from method, path and JSON body
//! - Status mapping for core errors (not found, bad state, bad request)
//! - Caller-side policy: nesting limit, key limits, strict delete
//!
//! No transport is bundled. Any HTTP, IPC or CLI front end can decode its
//! input into a [`Request`] (or a method/path/body triple) and render the
//! returned [`Response`].

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod config;
mod error;
mod handler;
mod request;
mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::RequestHandler;
pub use request::{Request, Response};
pub use server::{decode_route, KvServer};
