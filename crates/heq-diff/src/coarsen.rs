//! Timestamp coarsening.
//!
//! Rewrites every timestamp inside a value tree to a coarser precision so
//! that two structures differing only below that precision compare equal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use heq_types::Value;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DiffError;

/// The precision timestamps are rounded down to.
///
/// Deserializes through [`FromStr`], so serde formats accept the same names
/// and reject the same way as [`TimeCoarsener::from_name`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Granularity {
    /// Whole seconds.
    #[serde(rename = "sec")]
    Second,
    /// Whole microseconds.
    #[serde(rename = "usec")]
    Microsecond,
}

impl Granularity {
    /// Canonical names of every supported granularity.
    pub const VALID: [&'static str; 2] = ["sec", "usec"];

    /// The canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Granularity::Second => "sec",
            Granularity::Microsecond => "usec",
        }
    }

    /// Number of fractional-second digits kept.
    pub fn digits(self) -> u16 {
        match self {
            Granularity::Second => 0,
            Granularity::Microsecond => 6,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sec" | "second" => Ok(Granularity::Second),
            "usec" | "microsecond" => Ok(Granularity::Microsecond),
            _ => Err(DiffError::InvalidTimeGranularity {
                given: s.to_string(),
                valid: "[sec, usec]",
            }),
        }
    }
}

impl TryFrom<String> for Granularity {
    type Error = DiffError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Rounds every timestamp in a value tree down to a [`Granularity`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeCoarsener {
    granularity: Granularity,
}

impl TimeCoarsener {
    /// A coarsener for `granularity`.
    pub fn new(granularity: Granularity) -> Self {
        Self { granularity }
    }

    /// A coarsener for the granularity called `name` (`sec` or `usec`).
    pub fn from_name(name: &str) -> Result<Self, DiffError> {
        name.parse().map(Self::new)
    }

    /// The configured granularity.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// A copy of `value` with every timestamp rounded down.
    ///
    /// Maps keep their keys, sequences their order; all other leaves are
    /// copied unchanged. The input is never modified.
    pub fn coarsen(&self, value: &Value) -> Value {
        debug!(granularity = %self.granularity, kind = value.kind(), "coarsening timestamps");
        self.convert(value)
    }

    /// Round a single timestamp down. Pre-epoch instants round toward the past.
    pub fn coarsen_time(&self, time: DateTime<Utc>) -> DateTime<Utc> {
        time.trunc_subsecs(self.granularity.digits())
    }

    fn convert(&self, value: &Value) -> Value {
        match value {
            Value::Map(m) => Value::Map(
                m.iter()
                    .map(|(key, value)| (key.clone(), self.convert(value)))
                    .collect(),
            ),
            Value::Seq(items) => Value::Seq(items.iter().map(|item| self.convert(item)).collect()),
            Value::Time(t) => Value::Time(self.coarsen_time(*t)),
            other => other.clone(),
        }
    }
}
