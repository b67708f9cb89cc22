use heq_diff::{DiffRenderer, DiffSource, Granularity, Shape, StructuralDiff, TimeCoarsener};
use heq_types::Value;
use tracing::debug;

use crate::assertions::{Assertions, StandardAssertions};
use crate::config::CompareConfig;
use crate::error::CompareResult;

// ---------------------------------------------------------------------------
// Comparator
// ---------------------------------------------------------------------------

/// Compares expected and actual values and reports mismatches with a
/// rendered diff.
///
/// The renderer is built (and so the inputs validated) before equality is
/// checked, even when the values turn out equal. Verbose and terse modes
/// carry byte-identical diff text; only the assertion used differs.
pub struct Comparator {
    config: CompareConfig,
    assertions: Box<dyn Assertions>,
    source: Box<dyn DiffSource>,
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new(CompareConfig::default())
    }
}

impl Comparator {
    /// A comparator reporting through [`StandardAssertions`] and diffing
    /// with [`StructuralDiff`].
    pub fn new(config: CompareConfig) -> Self {
        let source = StructuralDiff::with_similarity(config.similarity);
        Self {
            config,
            assertions: Box::new(StandardAssertions),
            source: Box::new(source),
        }
    }

    /// Report through `assertions` instead.
    pub fn with_assertions(mut self, assertions: Box<dyn Assertions>) -> Self {
        self.assertions = assertions;
        self
    }

    /// Obtain diff entries from `source` instead.
    pub fn with_source(mut self, source: Box<dyn DiffSource>) -> Self {
        self.source = source;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare using the configured granularity, if any.
    pub fn check(&self, expected: &Value, actual: &Value) -> CompareResult<()> {
        match self.config.granularity {
            Some(granularity) => self.assert_time_aware_equal(expected, actual, granularity),
            None => self.assert_equal(expected, actual),
        }
    }

    /// Assert two sequences or maps are equal.
    pub fn assert_equal(&self, expected: &Value, actual: &Value) -> CompareResult<()> {
        self.compare(expected, actual, Shape::Enumerable)
    }

    /// Assert two maps are equal.
    pub fn assert_hashes_equal(&self, expected: &Value, actual: &Value) -> CompareResult<()> {
        self.compare(expected, actual, Shape::Map)
    }

    /// Assert two sequences or maps are equal. Alias of [`Self::assert_equal`].
    pub fn assert_enumerable_equal(&self, expected: &Value, actual: &Value) -> CompareResult<()> {
        self.compare(expected, actual, Shape::Enumerable)
    }

    /// Assert two values are equal once every timestamp in both has been
    /// rounded down to `granularity`.
    ///
    /// Only the coarsened copies are compared and rendered.
    pub fn assert_time_aware_equal(
        &self,
        expected: &Value,
        actual: &Value,
        granularity: Granularity,
    ) -> CompareResult<()> {
        let coarsener = TimeCoarsener::new(granularity);
        let expected = coarsener.coarsen(expected);
        let actual = coarsener.coarsen(actual);
        self.assert_equal(&expected, &actual)
    }

    fn compare(&self, expected: &Value, actual: &Value, shape: Shape) -> CompareResult<()> {
        let detail = DiffRenderer::with_shape(expected, actual, shape)?
            .with_palette(self.config.palette())
            .with_source(self.source.as_ref())
            .render()?;

        let equal = expected == actual;
        if !equal {
            debug!(shape = ?shape, verbose = self.config.verbose, "values differ");
        }

        if self.config.verbose {
            self.assertions.assert_equal(expected, actual, &detail)?;
        } else {
            self.assertions.assert_true(equal, &detail)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Assert two sequences or maps are equal with the default comparator.
pub fn assert_equal(expected: &Value, actual: &Value, verbose: bool) -> CompareResult<()> {
    Comparator::new(CompareConfig {
        verbose,
        ..Default::default()
    })
    .assert_equal(expected, actual)
}

/// Assert two values are equal after coarsening timestamps to the
/// granularity named `granularity` (`sec` or `usec`).
///
/// An unknown name fails before anything is compared.
pub fn assert_time_aware_equal(
    expected: &Value,
    actual: &Value,
    granularity: &str,
    verbose: bool,
) -> CompareResult<()> {
    let granularity: Granularity = granularity.parse()?;
    Comparator::new(CompareConfig {
        verbose,
        ..Default::default()
    })
    .assert_time_aware_equal(expected, actual, granularity)
}
