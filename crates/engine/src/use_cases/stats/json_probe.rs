//! Typed probing of untyped upstream JSON.
//!
//! Every candidate schema layout is an explicit path of object keys. A
//! missing key, a non-object on the way, or a leaf of the wrong type is
//! simply "not found".

use serde_json::{Map, Value};

/// A list of object keys from the member record root to a field.
pub type JsonPath = &'static [&'static str];

/// Follow `path` through nested objects.
pub fn at<'v>(value: &'v Value, path: &[&str]) -> Option<&'v Value> {
    path.iter().try_fold(value, |node, key| node.as_object()?.get(*key))
}

/// Object found at `path`.
pub fn object_at<'v>(value: &'v Value, path: &[&str]) -> Option<&'v Map<String, Value>> {
    at(value, path)?.as_object()
}

/// JSON number found at `path`. Strings are not coerced.
pub fn number_at(value: &Value, path: &[&str]) -> Option<f64> {
    at(value, path)?.as_f64()
}

/// First JSON number found among `paths`, in order.
pub fn first_number(value: &Value, paths: &[JsonPath]) -> Option<f64> {
    paths.iter().find_map(|path| number_at(value, path))
}

/// A number, or a string that parses as one.
pub fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Strictly positive, finite JSON number.
pub fn positive_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite() && *n > 0.0)
}
