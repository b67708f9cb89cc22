use heq_diff::structural::DEFAULT_SIMILARITY;
use heq_diff::{Granularity, Palette};
use serde::{Deserialize, Serialize};

use crate::error::{CompareError, CompareResult};

/// Configuration for a [`Comparator`](crate::Comparator).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// When `true`, mismatches are reported through an equality assertion
    /// (diff plus expected/actual dump); otherwise through a plain condition
    /// assertion carrying only the diff.
    pub verbose: bool,
    /// Whether rendered diffs carry ANSI styling.
    pub color: bool,
    /// When set, [`Comparator::check`](crate::Comparator::check) coarsens
    /// timestamps to this precision before comparing.
    pub granularity: Option<Granularity>,
    /// Similarity threshold for pairing containers inside sequences.
    pub similarity: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            verbose: true,
            color: false,
            granularity: None,
            similarity: DEFAULT_SIMILARITY,
        }
    }
}

impl CompareConfig {
    /// A terse configuration: mismatches carry only the rendered diff.
    pub fn terse() -> Self {
        Self {
            verbose: false,
            ..Default::default()
        }
    }

    /// Parse a TOML document. Missing fields take their defaults.
    ///
    /// An unknown `granularity` name fails with
    /// [`DiffError::InvalidTimeGranularity`], as it does everywhere else.
    pub fn from_toml_str(s: &str) -> CompareResult<Self> {
        let table: toml::Table = toml::from_str(s).map_err(config_error)?;
        if let Some(name) = table.get("granularity").and_then(toml::Value::as_str) {
            name.parse::<Granularity>()?;
        }
        toml::Value::Table(table).try_into().map_err(config_error)
    }

    /// The palette implied by [`Self::color`].
    pub fn palette(&self) -> Palette {
        if self.color {
            Palette::ansi()
        } else {
            Palette::plain()
        }
    }
}

fn config_error(e: toml::de::Error) -> CompareError {
    CompareError::Config(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use heq_diff::DiffError;

    #[test]
    fn default_config() {
        let c = CompareConfig::default();
        assert!(c.verbose);
        assert!(!c.color);
        assert!(c.granularity.is_none());
        assert_eq!(c.similarity, 0.8);
        assert_eq!(c.palette(), Palette::plain());
    }

    #[test]
    fn terse_config() {
        assert!(!CompareConfig::terse().verbose);
    }

    #[test]
    fn parses_partial_toml() {
        let c = CompareConfig::from_toml_str("granularity = \"usec\"\ncolor = true\n").unwrap();
        assert_eq!(c.granularity, Some(Granularity::Microsecond));
        assert!(c.color);
        assert!(c.verbose);
        assert_eq!(c.palette(), Palette::ansi());
    }

    #[test]
    fn rejects_unknown_granularity() {
        let err = CompareConfig::from_toml_str("granularity = \"min\"").unwrap_err();
        assert_eq!(
            err,
            CompareError::Diff(DiffError::InvalidTimeGranularity {
                given: "min".into(),
                valid: "[sec, usec]",
            })
        );
    }

    #[test]
    fn accepts_granularity_aliases() {
        let c = CompareConfig::from_toml_str("granularity = \"second\"").unwrap();
        assert_eq!(c.granularity, Some(Granularity::Second));
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        let err = CompareConfig::from_toml_str("verbose = ").unwrap_err();
        assert!(matches!(err, CompareError::Config(_)));

        let err = CompareConfig::from_toml_str("similarity = \"high\"").unwrap_err();
        assert!(matches!(err, CompareError::Config(_)));
    }
}
