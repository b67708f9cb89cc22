use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A structured value under comparison.
///
/// The set of kinds is closed: a value is either a scalar leaf, a timestamp,
/// an ordered sequence, or a map with unique string keys. Maps keep their
/// keys sorted, which gives diff output a stable order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// The absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A UTF-8 string.
    Str(String),
    /// A UTC timestamp with nanosecond precision.
    Time(DateTime<Utc>),
    /// An ordered sequence of values.
    Seq(Vec<Value>),
    /// A map from unique keys to values.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// An empty map.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// An empty sequence.
    pub fn seq() -> Self {
        Value::Seq(Vec::new())
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this value is map-like.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns `true` if this value can be traversed: sequences and maps.
    pub fn is_enumerable(&self) -> bool {
        matches!(self, Value::Seq(_) | Value::Map(_))
    }

    /// Returns `true` if this value is a timestamp.
    pub fn is_time(&self) -> bool {
        matches!(self, Value::Time(_))
    }

    /// Short name of the value's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Time(_) => "time",
            Value::Seq(_) => "seq",
            Value::Map(_) => "map",
        }
    }

    /// The timestamp, if this is a [`Value::Time`].
    pub fn as_time(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Time(t) => Some(t),
            _ => None,
        }
    }

    /// Look up a key in a map. Returns `None` for other kinds.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(m) => m.get(key),
            _ => None,
        }
    }

    /// Look up a position in a sequence. Returns `None` for other kinds.
    pub fn at(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Seq(items) => items.get(index),
            _ => None,
        }
    }

    /// Insert a key into a map value, returning the updated map.
    ///
    /// Has no effect on values that are not maps.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Value::Map(m) = &mut self {
            m.insert(key.into(), value.into());
        }
        self
    }

    /// Number of non-null leaves beneath this value. Empty containers and
    /// `Null` count zero.
    pub fn leaf_count(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Seq(items) => items.iter().map(Value::leaf_count).sum(),
            Value::Map(m) => m.values().map(Value::leaf_count).sum(),
            _ => 1,
        }
    }
}

/// The printed representation: what an inspector would show.
///
/// Strings are quoted and escaped, null prints as `nil`, timestamps print as
/// `YYYY-MM-DD HH:MM:SS[.fraction] UTC` with trailing fraction zeros dropped.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write_float(f, *x),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Time(t) => write_time(f, t),
            Value::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(m) => {
                f.write_str("{")?;
                for (i, (key, value)) in m.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?} => {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }

    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        // 1e20 prints as 1.0e+20, 1.5e-7 as 1.5e-07
        let formatted = format!("{x:e}");
        let (mantissa, exponent) = formatted
            .split_once('e')
            .unwrap_or((formatted.as_str(), "0"));
        let point = if mantissa.contains('.') { "" } else { ".0" };
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        return write!(f, "{mantissa}{point}e{sign}{digits:0>2}");
    }

    let formatted = x.to_string();
    if formatted.contains('.') {
        f.write_str(&formatted)
    } else {
        write!(f, "{formatted}.0")
    }
}

fn write_time(f: &mut fmt::Formatter<'_>, t: &DateTime<Utc>) -> fmt::Result {
    write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S"))?;
    let nanos = t.timestamp_subsec_nanos() % 1_000_000_000;
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        write!(f, ".{}", fraction.trim_end_matches('0'))?;
    }
    f.write_str(" UTC")
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(m: BTreeMap<String, T>) -> Self {
        Value::Map(m.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Map(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn json_objects_become_maps() {
        let v = Value::from(json!({"a": 1, "b": {"c": [true, null]}}));
        assert!(v.is_map());
        assert_eq!(v.get("a"), Some(&Value::Int(1)));
        let c = v.get("b").and_then(|b| b.get("c")).unwrap();
        assert_eq!(c.at(0), Some(&Value::Bool(true)));
        assert_eq!(c.at(1), Some(&Value::Null));
    }

    #[test]
    fn json_numbers_prefer_integers() {
        assert_eq!(Value::from(json!(7)), Value::Int(7));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert!(matches!(Value::from(json!(u64::MAX)), Value::Float(_)));
    }

    #[test]
    fn shape_predicates() {
        assert!(Value::map().is_map());
        assert!(Value::map().is_enumerable());
        assert!(Value::seq().is_enumerable());
        assert!(!Value::seq().is_map());
        assert!(!Value::from("").is_enumerable());
        assert!(Value::Null.is_null());
    }

    #[test]
    fn printed_scalars() {
        assert_eq!(Value::Int(1).to_string(), "1");
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::from("e").to_string(), "\"e\"");
        assert_eq!(Value::from("say \"hi\"").to_string(), "\"say \\\"hi\\\"\"");
        assert_eq!(Value::Null.to_string(), "nil");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn printed_containers() {
        let v = Value::from(json!({"firstname": "John", "tags": [1, "x"]}));
        assert_eq!(v.to_string(), "{\"firstname\" => \"John\", \"tags\" => [1, \"x\"]}");
        assert_eq!(Value::seq().to_string(), "[]");
        assert_eq!(Value::map().to_string(), "{}");
    }

    #[test]
    fn printed_timestamps() {
        let whole = Utc.timestamp_opt(1_046_684_800, 0).unwrap();
        assert_eq!(Value::from(whole).to_string(), "2003-03-03 09:46:40 UTC");

        let usec = Utc.timestamp_opt(1_046_684_800, 123_456_000).unwrap();
        assert_eq!(Value::from(usec).to_string(), "2003-03-03 09:46:40.123456 UTC");

        let nsec = Utc.timestamp_opt(1_046_684_800, 123_456_789).unwrap();
        assert_eq!(Value::from(nsec).to_string(), "2003-03-03 09:46:40.123456789 UTC");
    }

    #[test]
    fn printed_timestamps_drop_trailing_zeros() {
        let half = Utc.timestamp_opt(1_046_684_800, 500_000_000).unwrap();
        assert_eq!(Value::from(half).to_string(), "2003-03-03 09:46:40.5 UTC");

        let small = Utc.timestamp_opt(1_046_684_800, 999).unwrap();
        assert_eq!(Value::from(small).to_string(), "2003-03-03 09:46:40.000000999 UTC");
    }

    #[test]
    fn printed_floats() {
        assert_eq!(Value::Float(0.1).to_string(), "0.1");
        assert_eq!(Value::Float(-2.5).to_string(), "-2.5");
        assert_eq!(Value::Float(1e15).to_string(), "1000000000000000.0");
        assert_eq!(Value::Float(1e20).to_string(), "1.0e+20");
        assert_eq!(Value::Float(-1.25e100).to_string(), "-1.25e+100");
        assert_eq!(Value::Float(1.5e-7).to_string(), "1.5e-07");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn leaf_count_ignores_structure() {
        let v = Value::from(json!({"a": 1, "b": [2, 3], "c": {}}));
        assert_eq!(v.leaf_count(), 3);
        assert_eq!(Value::Int(4).leaf_count(), 1);
        assert_eq!(Value::from(json!([null, 1])).leaf_count(), 1);
    }

    #[test]
    fn builder_inserts_keys() {
        let v = Value::map().with("a", 1).with("b", "two");
        assert_eq!(v.to_string(), "{\"a\" => 1, \"b\" => \"two\"}");
        assert_eq!(Value::Int(1).with("a", 1), Value::Int(1));
    }

    #[test]
    fn serializes_untagged() {
        let v = Value::from(json!({"a": [1, "x", null]}));
        assert_eq!(serde_json::to_value(&v).unwrap(), json!({"a": [1, "x", null]}));
    }
}
