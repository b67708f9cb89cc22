//! Error types for the diff crate.

use heq_types::TypeError;

/// Errors that can occur while validating, rendering or coarsening.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// `expected` or `actual` was not provided.
    #[error("{name} must be provided")]
    RequiredValueMissing { name: &'static str },

    /// The map-only renderer was given a non-map expected value.
    #[error("expected value must be a map, got {kind}")]
    ExpectedMustBeMap { kind: &'static str },

    /// The map-only renderer was given a non-map actual value.
    #[error("actual value must be a map, got {kind}")]
    ActualMustBeMap { kind: &'static str },

    /// The enumerable renderer was given a non-enumerable expected value.
    #[error("expected value must be enumerable, got {kind}")]
    ExpectedMustBeEnumerable { kind: &'static str },

    /// The enumerable renderer was given a non-enumerable actual value.
    #[error("actual value must be enumerable, got {kind}")]
    ActualMustBeEnumerable { kind: &'static str },

    /// The diff service emitted a record the renderer cannot format.
    #[error(transparent)]
    Record(#[from] TypeError),

    /// A time granularity name outside the supported set.
    #[error("{given:?} is not a valid time granularity. Valid values are: {valid}")]
    InvalidTimeGranularity { given: String, valid: &'static str },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
