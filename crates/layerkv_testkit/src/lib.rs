//! # LayerKV Testkit
//!
//! Test utilities for LayerKV.
//!
//! This crate provides:
//! - A reference model of nested-transaction semantics
//! - Property-based test generators using proptest
//! - Fixtures for common map states
//!
//! ## Usage
//!
//! ```rust
//! use layerkv_testkit::prelude::*;
//!
//! let mut map = layerkv_core::TransactionalMap::new();
//! let mut model = ReferenceModel::new();
//! for op in [Op::Set("a".into(), 1), Op::Begin, Op::Delete("a".into())] {
//!     assert_eq!(apply(&mut map, &op), model.apply(&op));
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
