//! Diff rendering for hashes-equal.
//!
//! Turns the disagreement between an expected and an actual [`Value`] tree
//! into a deterministic, human-readable failure message, and optionally
//! coarsens embedded timestamps before the comparison is made.
//!
//! # Key Types
//!
//! - [`DiffSource`] / [`StructuralDiff`] -- Produces ordered diff entries for two values
//! - [`DiffRenderer`] / [`Shape`] -- Validates inputs and renders the entries as text
//! - [`Palette`] -- Explicit styling configuration (plain or ANSI)
//! - [`TimeCoarsener`] / [`Granularity`] -- Rounds timestamps down before comparison
//!
//! [`Value`]: heq_types::Value

pub mod coarsen;
pub mod error;
pub mod render;
pub mod structural;
pub mod style;

pub use coarsen::{Granularity, TimeCoarsener};
pub use error::{DiffError, DiffResult};
pub use render::{
    missing_value_message, spurious_value_message, value_disagreement_message, DiffRenderer,
    Shape,
};
pub use structural::{DiffSource, StructuralDiff};
pub use style::Palette;
