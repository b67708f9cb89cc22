//! The diff record contract.
//!
//! A structural diff service emits untyped [`DiffEntry`] tuples: an operator
//! symbol, a path, and either one value (`-`, `+`) or two values (`~`).
//! [`DiffRecord`] is the typed form the renderer works with; decoding an entry
//! with an unknown operator or the wrong arity fails.

use std::fmt;

use crate::error::TypeError;
use crate::value::Value;

/// The kind of disagreement a record describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiffOp {
    /// Present in expected, absent from actual (`-`).
    Missing,
    /// Present in actual, absent from expected (`+`).
    Spurious,
    /// Present in both with different values (`~`).
    Changed,
}

impl DiffOp {
    /// Decode an operator symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '-' => Some(DiffOp::Missing),
            '+' => Some(DiffOp::Spurious),
            '~' => Some(DiffOp::Changed),
            _ => None,
        }
    }

    /// The operator symbol.
    pub fn symbol(self) -> char {
        match self {
            DiffOp::Missing => '-',
            DiffOp::Spurious => '+',
            DiffOp::Changed => '~',
        }
    }

    /// Number of values an entry with this operator carries.
    pub fn arity(self) -> usize {
        match self {
            DiffOp::Missing | DiffOp::Spurious => 1,
            DiffOp::Changed => 2,
        }
    }
}

/// One record as emitted by a diff service, before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct DiffEntry {
    /// Operator symbol: `-`, `+` or `~` for well-formed entries.
    pub symbol: char,
    /// Location of the disagreement, e.g. `a.c` or `[4]`.
    pub path: String,
    /// The value for `-`/`+`, or the expected and actual values for `~`.
    pub values: Vec<Value>,
}

impl DiffEntry {
    /// Create an entry from its parts.
    pub fn new(symbol: char, path: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            symbol,
            path: path.into(),
            values,
        }
    }
}

/// Prints as a tuple: `["~", "a", 0, 1]`.
impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[\"{}\", {:?}", self.symbol, self.path)?;
        for value in &self.values {
            write!(f, ", {value}")?;
        }
        f.write_str("]")
    }
}

/// A validated unit of structural disagreement.
#[derive(Clone, Debug, PartialEq)]
pub enum DiffRecord {
    /// The actual structure lacks a value the expected one has.
    Missing { path: String, expected: Value },
    /// The actual structure has a value the expected one lacks.
    Spurious { path: String, actual: Value },
    /// Both structures have a value at `path` but they differ.
    Changed {
        path: String,
        expected: Value,
        actual: Value,
    },
}

impl DiffRecord {
    /// The record's operator.
    pub fn op(&self) -> DiffOp {
        match self {
            DiffRecord::Missing { .. } => DiffOp::Missing,
            DiffRecord::Spurious { .. } => DiffOp::Spurious,
            DiffRecord::Changed { .. } => DiffOp::Changed,
        }
    }

    /// The location of the disagreement.
    pub fn path(&self) -> &str {
        match self {
            DiffRecord::Missing { path, .. }
            | DiffRecord::Spurious { path, .. }
            | DiffRecord::Changed { path, .. } => path,
        }
    }

    /// Convert back to the untyped tuple shape.
    pub fn into_entry(self) -> DiffEntry {
        let symbol = self.op().symbol();
        match self {
            DiffRecord::Missing { path, expected } => DiffEntry::new(symbol, path, vec![expected]),
            DiffRecord::Spurious { path, actual } => DiffEntry::new(symbol, path, vec![actual]),
            DiffRecord::Changed {
                path,
                expected,
                actual,
            } => DiffEntry::new(symbol, path, vec![expected, actual]),
        }
    }
}

impl TryFrom<DiffEntry> for DiffRecord {
    type Error = TypeError;

    fn try_from(entry: DiffEntry) -> Result<Self, Self::Error> {
        let op = match DiffOp::from_symbol(entry.symbol) {
            Some(op) if op.arity() == entry.values.len() => op,
            _ => return Err(TypeError::UnprocessableDiffRecord(entry.to_string())),
        };

        let DiffEntry { path, values, .. } = entry;
        let mut values = values.into_iter();
        let mut next = || values.next().unwrap_or(Value::Null);

        Ok(match op {
            DiffOp::Missing => DiffRecord::Missing {
                path,
                expected: next(),
            },
            DiffOp::Spurious => DiffRecord::Spurious {
                path,
                actual: next(),
            },
            DiffOp::Changed => {
                let expected = next();
                let actual = next();
                DiffRecord::Changed {
                    path,
                    expected,
                    actual,
                }
            }
        })
    }
}
