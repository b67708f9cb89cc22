//! Foundation types for hashes-equal.
//!
//! This crate provides the value tree compared by the assertion helpers and
//! the data contract between a structural diff service and the renderer.
//! Every other crate in the workspace depends on `heq-types`.
//!
//! # Key Types
//!
//! - [`Value`] — Closed set of value kinds: scalars, timestamps, sequences, maps
//! - [`DiffEntry`] — Untyped `(op, path, values...)` tuple emitted by a diff service
//! - [`DiffRecord`] — Tagged Missing / Spurious / Changed record
//! - [`DiffOp`] — The three record operators (`-`, `+`, `~`)

pub mod error;
pub mod record;
pub mod value;

pub use error::TypeError;
pub use record::{DiffEntry, DiffOp, DiffRecord};
pub use value::Value;
