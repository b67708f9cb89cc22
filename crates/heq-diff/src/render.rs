//! Render diff entries as failure-message text.
//!
//! A [`DiffRenderer`] validates its two inputs when it is built, asks a
//! [`DiffSource`] for the ordered entries, and formats each one. The output
//! always starts with a newline so it sits on its own line when appended to
//! a larger assertion message.

use heq_types::{DiffRecord, Value};
use tracing::debug;

use crate::error::{DiffError, DiffResult};
use crate::structural::{DiffSource, StructuralDiff};
use crate::style::Palette;

static DEFAULT_SOURCE: StructuralDiff = StructuralDiff::new();

/// The input shape a renderer insists on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Any pair of provided values.
    Any,
    /// Both values must be maps.
    Map,
    /// Both values must be sequences or maps.
    Enumerable,
}

/// Renders the disagreement between an expected and an actual value.
pub struct DiffRenderer<'a> {
    expected: &'a Value,
    actual: &'a Value,
    shape: Shape,
    palette: Palette,
    source: &'a dyn DiffSource,
}

impl<'a> DiffRenderer<'a> {
    /// A renderer accepting any pair of provided values.
    pub fn new(expected: &'a Value, actual: &'a Value) -> DiffResult<Self> {
        Self::with_shape(expected, actual, Shape::Any)
    }

    /// A renderer requiring both values to be maps.
    pub fn for_maps(expected: &'a Value, actual: &'a Value) -> DiffResult<Self> {
        Self::with_shape(expected, actual, Shape::Map)
    }

    /// A renderer requiring both values to be sequences or maps.
    pub fn for_enumerables(expected: &'a Value, actual: &'a Value) -> DiffResult<Self> {
        Self::with_shape(expected, actual, Shape::Enumerable)
    }

    /// A renderer validating its inputs against `shape`.
    ///
    /// Checks run in order (expected present, actual present, expected
    /// shape, actual shape) and the first failure is returned.
    pub fn with_shape(expected: &'a Value, actual: &'a Value, shape: Shape) -> DiffResult<Self> {
        check_args(expected, actual, shape)?;
        Ok(Self {
            expected,
            actual,
            shape,
            palette: Palette::plain(),
            source: &DEFAULT_SOURCE,
        })
    }

    /// Use `palette` for styling.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Obtain diff entries from `source` instead of the default structural diff.
    pub fn with_source(mut self, source: &'a dyn DiffSource) -> Self {
        self.source = source;
        self
    }

    /// The shape this renderer validated against.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Render every diff entry, one message per entry.
    ///
    /// Fails with [`DiffError::Record`] on the first entry that is not a
    /// well-formed `-`, `+` or `~` record; no partial output is returned.
    pub fn render(&self) -> DiffResult<String> {
        let entries = self.source.diff(self.expected, self.actual);
        debug!(entries = entries.len(), shape = ?self.shape, "rendering diff");

        let messages = entries
            .into_iter()
            .map(|entry| {
                let record = DiffRecord::try_from(entry)?;
                Ok(self.format_record(&record))
            })
            .collect::<DiffResult<Vec<_>>>()?;

        Ok(self.palette.neutral(&format!("\n{}", messages.join("\n"))))
    }

    fn format_record(&self, record: &DiffRecord) -> String {
        match record {
            DiffRecord::Missing { path, expected } => {
                missing_value_message(&self.palette, path, expected)
            }
            DiffRecord::Spurious { path, actual } => {
                spurious_value_message(&self.palette, path, actual)
            }
            DiffRecord::Changed {
                path,
                expected,
                actual,
            } => value_disagreement_message(&self.palette, path, expected, actual),
        }
    }
}

fn check_args(expected: &Value, actual: &Value, shape: Shape) -> DiffResult<()> {
    if expected.is_null() {
        return Err(DiffError::RequiredValueMissing { name: "expected" });
    }
    if actual.is_null() {
        return Err(DiffError::RequiredValueMissing { name: "actual" });
    }

    match shape {
        Shape::Any => {}
        Shape::Map => {
            if !expected.is_map() {
                return Err(DiffError::ExpectedMustBeMap {
                    kind: expected.kind(),
                });
            }
            if !actual.is_map() {
                return Err(DiffError::ActualMustBeMap {
                    kind: actual.kind(),
                });
            }
        }
        Shape::Enumerable => {
            if !expected.is_enumerable() {
                return Err(DiffError::ExpectedMustBeEnumerable {
                    kind: expected.kind(),
                });
            }
            if !actual.is_enumerable() {
                return Err(DiffError::ActualMustBeEnumerable {
                    kind: actual.kind(),
                });
            }
        }
    }
    Ok(())
}

/// Message for a value present in expected but absent from actual.
pub fn missing_value_message(palette: &Palette, path: &str, expected: &Value) -> String {
    [
        format!(
            "actual value for {} is missing, expected was",
            palette.attention(path)
        ),
        palette.positive(&expected.to_string()),
    ]
    .join("\n\t")
}

/// Message for a value present in actual but absent from expected.
pub fn spurious_value_message(palette: &Palette, path: &str, actual: &Value) -> String {
    format!(
        "spurious value {} for {path} was not expected",
        palette.attention(&actual.to_string())
    )
}

/// Message for a path whose expected and actual values differ.
pub fn value_disagreement_message(
    palette: &Palette,
    path: &str,
    expected: &Value,
    actual: &Value,
) -> String {
    [
        format!("values for {path} differ"),
        format!("expected: {}", palette.positive(&expected.to_string())),
        format!("actual: {}", palette.attention(&actual.to_string())),
    ]
    .join("\n\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use heq_types::{DiffEntry, TypeError};
    use serde_json::json;

    const PLAIN: Palette = Palette::plain();

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    fn render(expected: serde_json::Value, actual: serde_json::Value) -> String {
        let (expected, actual) = (v(expected), v(actual));
        DiffRenderer::for_enumerables(&expected, &actual)
            .unwrap()
            .render()
            .unwrap()
    }

    fn block(messages: &[String]) -> String {
        format!("\n{}", messages.join("\n"))
    }

    /// Emits a fixed list of entries regardless of input.
    struct Canned(Vec<DiffEntry>);

    impl DiffSource for Canned {
        fn diff(&self, _: &Value, _: &Value) -> Vec<DiffEntry> {
            self.0.clone()
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn missing_expected_is_rejected_first() {
        let err = DiffRenderer::new(&Value::Null, &Value::Null).err().unwrap();
        assert_eq!(err, DiffError::RequiredValueMissing { name: "expected" });
    }

    #[test]
    fn missing_actual_is_rejected() {
        let err = DiffRenderer::new(&Value::map(), &Value::Null).err().unwrap();
        assert_eq!(err, DiffError::RequiredValueMissing { name: "actual" });
        assert_eq!(err.to_string(), "actual must be provided");
    }

    #[test]
    fn map_renderer_rejects_non_map_expected() {
        let err = DiffRenderer::for_maps(&Value::from(""), &Value::map())
            .err()
            .unwrap();
        assert_eq!(err, DiffError::ExpectedMustBeMap { kind: "string" });
    }

    #[test]
    fn map_renderer_rejects_non_map_actual() {
        let err = DiffRenderer::for_maps(&Value::map(), &Value::from(""))
            .err()
            .unwrap();
        assert_eq!(err, DiffError::ActualMustBeMap { kind: "string" });
    }

    #[test]
    fn map_renderer_checks_expected_before_actual() {
        let err = DiffRenderer::for_maps(&Value::seq(), &Value::Int(1))
            .err()
            .unwrap();
        assert_eq!(err, DiffError::ExpectedMustBeMap { kind: "seq" });
    }

    #[test]
    fn enumerable_renderer_rejects_scalars() {
        let err = DiffRenderer::for_enumerables(&Value::from(""), &Value::map())
            .err()
            .unwrap();
        assert_eq!(err, DiffError::ExpectedMustBeEnumerable { kind: "string" });

        let err = DiffRenderer::for_enumerables(&Value::map(), &Value::from(""))
            .err()
            .unwrap();
        assert_eq!(err, DiffError::ActualMustBeEnumerable { kind: "string" });
    }

    #[test]
    fn enumerable_renderer_accepts_maps_and_sequences() {
        assert!(DiffRenderer::for_enumerables(&Value::map(), &Value::seq()).is_ok());
        assert!(DiffRenderer::for_enumerables(&Value::seq(), &Value::seq()).is_ok());
    }

    #[test]
    fn generic_renderer_accepts_scalars() {
        let (expected, actual) = (Value::Int(1), Value::Int(2));
        let out = DiffRenderer::new(&expected, &actual).unwrap().render().unwrap();
        assert_eq!(
            out,
            block(&[value_disagreement_message(&PLAIN, "", &expected, &actual)])
        );
    }

    // -----------------------------------------------------------------------
    // Messages
    // -----------------------------------------------------------------------

    #[test]
    fn missing_key() {
        let out = render(json!({"a": 1}), json!({}));
        assert_eq!(out, "\nactual value for a is missing, expected was\n\t1");
    }

    #[test]
    fn spurious_key() {
        let out = render(json!({}), json!({"a": 1}));
        assert_eq!(out, "\nspurious value 1 for a was not expected");
    }

    #[test]
    fn disagreement() {
        let out = render(json!({"a": 0}), json!({"a": 1}));
        assert_eq!(out, "\nvalues for a differ\n\texpected: 0\n\tactual: 1");
    }

    #[test]
    fn disagreement_in_the_deep() {
        let out = render(json!({"a": {"b": 1, "c": 2}}), json!({"a": {"b": 1, "c": 3}}));
        assert_eq!(out, "\nvalues for a.c differ\n\texpected: 2\n\tactual: 3");
    }

    #[test]
    fn both_spurious_and_missing_key() {
        let out = render(json!({"a": 1}), json!({"b": 2}));
        assert_eq!(
            out,
            block(&[
                missing_value_message(&PLAIN, "a", &Value::Int(1)),
                spurious_value_message(&PLAIN, "b", &Value::Int(2)),
            ])
        );
    }

    #[test]
    fn both_missing_and_disagreement() {
        let out = render(json!({"a": 0, "b": 1}), json!({"a": 2}));
        assert_eq!(
            out,
            block(&[
                missing_value_message(&PLAIN, "b", &Value::Int(1)),
                value_disagreement_message(&PLAIN, "a", &Value::Int(0), &Value::Int(2)),
            ])
        );
    }

    #[test]
    fn array_missing_element_quotes_strings() {
        let out = render(json!(["a", "b", "c", "d", "e"]), json!(["a", "b", "c", "d"]));
        assert_eq!(out, "\nactual value for [4] is missing, expected was\n\t\"e\"");
    }

    #[test]
    fn array_trailing_replacement() {
        let out = render(json!(["a", "b", "c", "d", "e"]), json!(["a", "b", "c", "d", "z"]));
        assert_eq!(
            out,
            block(&[
                missing_value_message(&PLAIN, "[4]", &Value::from("e")),
                spurious_value_message(&PLAIN, "[4]", &Value::from("z")),
            ])
        );
    }

    #[test]
    fn equal_values_render_an_empty_block() {
        assert_eq!(render(json!({"a": 1}), json!({"a": 1})), "\n");
    }

    #[test]
    fn ansi_palette_styles_the_parts() {
        let (expected, actual) = (v(json!({"a": 0})), v(json!({"a": 1})));
        let palette = Palette::ansi();
        let out = DiffRenderer::for_maps(&expected, &actual)
            .unwrap()
            .with_palette(palette)
            .render()
            .unwrap();
        let message = format!(
            "values for a differ\n\texpected: {}\n\tactual: {}",
            palette.positive("0"),
            palette.attention("1")
        );
        assert_eq!(out, palette.neutral(&format!("\n{message}")));
    }

    #[test]
    fn rendering_is_deterministic() {
        let (expected, actual) = (
            v(json!({"z": [1, 2, {"q": null}], "a": {"b": "x"}, "m": 1})),
            v(json!({"z": [2, {"q": 1}], "a": {"c": "x"}, "n": 1})),
        );
        let renderer = DiffRenderer::for_enumerables(&expected, &actual).unwrap();
        assert_eq!(renderer.render().unwrap(), renderer.render().unwrap());
    }

    // -----------------------------------------------------------------------
    // Diff sources
    // -----------------------------------------------------------------------

    #[test]
    fn entries_are_rendered_in_source_order() {
        let source = Canned(vec![
            DiffEntry::new('+', "z", vec![Value::Int(1)]),
            DiffEntry::new('-', "a", vec![Value::Int(2)]),
        ]);
        let (expected, actual) = (Value::map(), Value::map());
        let out = DiffRenderer::new(&expected, &actual)
            .unwrap()
            .with_source(&source)
            .render()
            .unwrap();
        assert_eq!(
            out,
            block(&[
                spurious_value_message(&PLAIN, "z", &Value::Int(1)),
                missing_value_message(&PLAIN, "a", &Value::Int(2)),
            ])
        );
    }

    #[test]
    fn unknown_operator_aborts_rendering() {
        let source = Canned(vec![
            DiffEntry::new('-', "a", vec![Value::Int(1)]),
            DiffEntry::new('!', "b", vec![Value::Int(2)]),
        ]);
        let (expected, actual) = (Value::map(), Value::map());
        let err = DiffRenderer::new(&expected, &actual)
            .unwrap()
            .with_source(&source)
            .render()
            .unwrap_err();
        assert_eq!(
            err,
            DiffError::Record(TypeError::UnprocessableDiffRecord(
                "[\"!\", \"b\", 2]".into()
            ))
        );
    }
}
