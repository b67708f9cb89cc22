use std::sync::{Arc, Mutex, PoisonError};

use heq_types::Value;

// ---------------------------------------------------------------------------
// AssertionFailure
// ---------------------------------------------------------------------------

/// A failed assertion and the message a test harness should show.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AssertionFailure {
    /// The full failure message.
    pub message: String,
}

impl AssertionFailure {
    /// Create a failure carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

/// The assertion service the comparison helpers report through.
///
/// Each call either succeeds silently or returns a failure carrying the
/// detail message.
pub trait Assertions {
    /// Succeeds when `expected == actual`.
    fn assert_equal(
        &self,
        expected: &Value,
        actual: &Value,
        detail: &str,
    ) -> Result<(), AssertionFailure>;

    /// Succeeds when `condition` holds.
    fn assert_true(&self, condition: bool, detail: &str) -> Result<(), AssertionFailure>;
}

impl<T: Assertions + ?Sized> Assertions for Arc<T> {
    fn assert_equal(
        &self,
        expected: &Value,
        actual: &Value,
        detail: &str,
    ) -> Result<(), AssertionFailure> {
        (**self).assert_equal(expected, actual, detail)
    }

    fn assert_true(&self, condition: bool, detail: &str) -> Result<(), AssertionFailure> {
        (**self).assert_true(condition, detail)
    }
}

/// The default assertion service.
///
/// An equality failure reads `"{detail}.\nExpected: {expected}\n  Actual: {actual}"`;
/// a condition failure reads exactly `detail`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardAssertions;

impl Assertions for StandardAssertions {
    fn assert_equal(
        &self,
        expected: &Value,
        actual: &Value,
        detail: &str,
    ) -> Result<(), AssertionFailure> {
        if expected == actual {
            return Ok(());
        }
        Err(AssertionFailure::new(format!(
            "{detail}.\nExpected: {expected}\n  Actual: {actual}"
        )))
    }

    fn assert_true(&self, condition: bool, detail: &str) -> Result<(), AssertionFailure> {
        if condition {
            Ok(())
        } else {
            Err(AssertionFailure::new(detail))
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingAssertions
// ---------------------------------------------------------------------------

/// The outcome of one recorded assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The assertion held.
    Passed,
    /// The assertion failed with this message.
    Failed(String),
}

/// Wraps another service and keeps a log of every outcome.
///
/// Share it with a comparator through an [`Arc`] and inspect the log after.
#[derive(Debug, Default)]
pub struct RecordingAssertions<A = StandardAssertions> {
    inner: A,
    outcomes: Mutex<Vec<Outcome>>,
}

impl RecordingAssertions {
    /// Record the outcomes of [`StandardAssertions`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: Assertions> RecordingAssertions<A> {
    /// Record the outcomes of `inner`.
    pub fn wrapping(inner: A) -> Self {
        Self {
            inner,
            outcomes: Mutex::new(Vec::new()),
        }
    }

    /// Every outcome so far, oldest first.
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of assertions that held.
    pub fn passed(&self) -> usize {
        self.outcomes()
            .iter()
            .filter(|o| matches!(o, Outcome::Passed))
            .count()
    }

    /// Messages of the assertions that failed.
    pub fn failures(&self) -> Vec<String> {
        self.outcomes()
            .into_iter()
            .filter_map(|o| match o {
                Outcome::Failed(message) => Some(message),
                Outcome::Passed => None,
            })
            .collect()
    }

    fn record(&self, result: Result<(), AssertionFailure>) -> Result<(), AssertionFailure> {
        let outcome = match &result {
            Ok(()) => Outcome::Passed,
            Err(failure) => Outcome::Failed(failure.message.clone()),
        };
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(outcome);
        result
    }
}

impl<A: Assertions> Assertions for RecordingAssertions<A> {
    fn assert_equal(
        &self,
        expected: &Value,
        actual: &Value,
        detail: &str,
    ) -> Result<(), AssertionFailure> {
        self.record(self.inner.assert_equal(expected, actual, detail))
    }

    fn assert_true(&self, condition: bool, detail: &str) -> Result<(), AssertionFailure> {
        self.record(self.inner.assert_true(condition, detail))
    }
}
