use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// A diff entry carried an unknown operator or the wrong number of values.
    #[error("unprocessable diff record: {0}")]
    UnprocessableDiffRecord(String),
}
