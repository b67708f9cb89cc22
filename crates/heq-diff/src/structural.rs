//! Structural diff: compare two value trees and emit ordered diff entries.
//!
//! Maps are compared by key, sequences by a longest-common-subsequence
//! alignment in which containers that are "similar enough" are paired and
//! compared recursively. Everything else is compared by equality.

use heq_types::{DiffEntry, DiffRecord, Value};

/// A service that computes the ordered diff entries between two values.
///
/// The renderer only depends on this trait, so any diff algorithm that emits
/// `-`, `+` and `~` entries can be plugged in.
pub trait DiffSource {
    /// Diff entries describing how `actual` disagrees with `expected`, in
    /// the order they should be reported.
    fn diff(&self, expected: &Value, actual: &Value) -> Vec<DiffEntry>;
}

/// Default similarity threshold for pairing containers inside sequences.
pub const DEFAULT_SIMILARITY: f64 = 0.8;

/// The default [`DiffSource`].
///
/// Ordering for maps: removed keys, then recursive diffs of shared keys, then
/// added keys, each group sorted by key. For sequences, recursive diffs of
/// aligned elements come first, followed by removals and additions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StructuralDiff {
    similarity: f64,
}

impl Default for StructuralDiff {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralDiff {
    /// A diff with the default similarity threshold.
    pub const fn new() -> Self {
        Self {
            similarity: DEFAULT_SIMILARITY,
        }
    }

    /// A diff pairing sequence elements whose similarity reaches `similarity`.
    pub fn with_similarity(similarity: f64) -> Self {
        Self {
            similarity: similarity.clamp(0.0, 1.0),
        }
    }

    /// The configured similarity threshold.
    pub fn similarity(&self) -> f64 {
        self.similarity
    }

    /// Compute typed records between two values.
    pub fn records(&self, expected: &Value, actual: &Value) -> Vec<DiffRecord> {
        let mut records = Vec::new();
        self.diff_at("", expected, actual, &mut records);
        records
    }

    fn diff_at(
        &self,
        prefix: &str,
        expected: &Value,
        actual: &Value,
        out: &mut Vec<DiffRecord>,
    ) {
        match (expected, actual) {
            (Value::Map(old), Value::Map(new)) => {
                // Check for removed keys.
                for (key, value) in old {
                    if !new.contains_key(key) {
                        out.push(DiffRecord::Missing {
                            path: key_path(prefix, key),
                            expected: value.clone(),
                        });
                    }
                }

                // Recurse into shared keys.
                for (key, old_val) in old {
                    if let Some(new_val) = new.get(key) {
                        self.diff_at(&key_path(prefix, key), old_val, new_val, out);
                    }
                }

                // Check for added keys.
                for (key, value) in new {
                    if !old.contains_key(key) {
                        out.push(DiffRecord::Spurious {
                            path: key_path(prefix, key),
                            actual: value.clone(),
                        });
                    }
                }
            }
            (Value::Seq(old), Value::Seq(new)) => self.diff_sequences(prefix, old, new, out),
            _ if expected == actual => {}
            _ => out.push(DiffRecord::Changed {
                path: prefix.to_string(),
                expected: expected.clone(),
                actual: actual.clone(),
            }),
        }
    }

    fn diff_sequences(
        &self,
        prefix: &str,
        old: &[Value],
        new: &[Value],
        out: &mut Vec<DiffRecord>,
    ) {
        if old.is_empty() {
            for (i, value) in new.iter().enumerate() {
                out.push(DiffRecord::Spurious {
                    path: index_path(prefix, i),
                    actual: value.clone(),
                });
            }
            return;
        }
        if new.is_empty() {
            for (i, value) in old.iter().enumerate().rev() {
                out.push(DiffRecord::Missing {
                    path: index_path(prefix, i),
                    expected: value.clone(),
                });
            }
            return;
        }

        let mut links = self.align(old, new);

        // Aligned pairs are compared first, at the expected-side index.
        for &(x, y) in &links {
            self.diff_at(&index_path(prefix, x), &old[x], &new[y], out);
        }

        // Gaps between aligned pairs: removals back to front, then additions
        // front to back. Removal indices follow the actual-side position.
        links.push((old.len(), new.len()));
        let (mut next_x, mut next_y) = (0, 0);
        for (x, y) in links {
            for xi in (next_x..x).rev() {
                out.push(DiffRecord::Missing {
                    path: index_path(prefix, next_y + xi - next_x),
                    expected: old[xi].clone(),
                });
            }
            for yi in next_y..y {
                out.push(DiffRecord::Spurious {
                    path: index_path(prefix, yi),
                    actual: new[yi].clone(),
                });
            }
            next_x = x + 1;
            next_y = y + 1;
        }
    }

    /// Longest common subsequence of `old` and `new` under [`Self::similar`],
    /// as `(old_index, new_index)` pairs in ascending order.
    fn align(&self, old: &[Value], new: &[Value]) -> Vec<(usize, usize)> {
        #[derive(Clone, Copy)]
        enum Step {
            Diagonal,
            Up,
            Left,
        }

        let mut table = vec![vec![(Step::Up, 0usize); old.len()]; new.len()];
        for yi in 0..new.len() {
            for xi in 0..old.len() {
                table[yi][xi] = if self.similar(&old[xi], &new[yi]) {
                    let diagonal = if xi > 0 && yi > 0 {
                        table[yi - 1][xi - 1].1
                    } else {
                        0
                    };
                    (Step::Diagonal, diagonal + 1)
                } else {
                    let up = if yi > 0 { table[yi - 1][xi].1 } else { 0 };
                    let left = if xi > 0 { table[yi][xi - 1].1 } else { 0 };
                    let step = if up > left || (up == left && yi == 0) {
                        Step::Up
                    } else {
                        Step::Left
                    };
                    (step, up.max(left))
                };
            }
        }

        let mut links = Vec::new();
        let (mut x, mut y) = (old.len(), new.len());
        while x > 0 && y > 0 {
            let (step, len) = table[y - 1][x - 1];
            if len == 0 {
                break;
            }
            match step {
                Step::Diagonal => {
                    links.push((x - 1, y - 1));
                    x -= 1;
                    y -= 1;
                }
                Step::Up => y -= 1,
                Step::Left => x -= 1,
            }
        }
        links.reverse();
        links
    }

    /// Scalars are similar when equal. Containers are similar when the leaves
    /// touched by their diff are a small enough share of all their leaves.
    fn similar(&self, a: &Value, b: &Value) -> bool {
        if !a.is_enumerable() && !b.is_enumerable() {
            return a == b;
        }

        let total = a.leaf_count() + b.leaf_count();
        if total == 0 {
            return true;
        }

        let changed: usize = self
            .records(a, b)
            .iter()
            .map(|record| match record {
                DiffRecord::Missing { expected, .. } => expected.leaf_count(),
                DiffRecord::Spurious { actual, .. } => actual.leaf_count(),
                DiffRecord::Changed {
                    expected, actual, ..
                } => expected.leaf_count() + actual.leaf_count(),
            })
            .sum();

        1.0 - changed as f64 / total as f64 >= self.similarity
    }
}

impl DiffSource for StructuralDiff {
    fn diff(&self, expected: &Value, actual: &Value) -> Vec<DiffEntry> {
        self.records(expected, actual)
            .into_iter()
            .map(DiffRecord::into_entry)
            .collect()
    }
}

fn key_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn index_path(prefix: &str, index: usize) -> String {
    format!("{prefix}[{index}]")
}
