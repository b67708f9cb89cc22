use heq_diff::DiffError;

use crate::assertions::AssertionFailure;

/// Errors surfaced by the comparison helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    /// The comparison request was invalid or the diff could not be rendered.
    #[error(transparent)]
    Diff(#[from] DiffError),

    /// The values differ.
    #[error(transparent)]
    Mismatch(#[from] AssertionFailure),

    /// A configuration document could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CompareError {
    /// The failure message if this is a mismatch.
    pub fn mismatch_message(&self) -> Option<&str> {
        match self {
            CompareError::Mismatch(failure) => Some(&failure.message),
            _ => None,
        }
    }
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, CompareError>;
