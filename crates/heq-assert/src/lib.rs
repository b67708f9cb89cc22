//! Assertion helpers for hashes-equal.
//!
//! Compares an expected and an actual value tree and, on mismatch, fails
//! with a readable list of the differences instead of two opaque dumps.
//! Timestamps can be coarsened first so that precision lost in a round trip
//! (a database column, a serialization format) does not fail the test.
//!
//! # Quick Start
//!
//! ```rust
//! use heq_assert::{assert_equal, assert_time_aware_equal};
//! use heq_types::Value;
//!
//! let expected = Value::map().with("a", 1);
//! let actual = Value::map();
//! let err = assert_equal(&expected, &actual, false).unwrap_err();
//! assert_eq!(
//!     err.mismatch_message(),
//!     Some("\nactual value for a is missing, expected was\n\t1")
//! );
//!
//! assert!(assert_time_aware_equal(&expected, &expected, "sec", true).is_ok());
//! ```

pub mod assertions;
pub mod compare;
pub mod config;
pub mod error;

// Re-exports for convenience.
pub use assertions::{
    AssertionFailure, Assertions, Outcome, RecordingAssertions, StandardAssertions,
};
pub use compare::{assert_equal, assert_time_aware_equal, Comparator};
pub use config::CompareConfig;
pub use error::{CompareError, CompareResult};
pub use heq_diff::Granularity;
