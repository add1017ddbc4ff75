//! Field extraction from loosely-typed provider JSON.
//!
//! Each helper walks a fixed list of candidate keys and returns the first one
//! that yields a usable value after coercion.

use serde_json::Value;

/// Numbers, and strings holding a number, coerce to `f64`.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Integral epoch seconds from a number or numeric string.
pub fn coerce_epoch_secs(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// First candidate key present with a numeric value.
pub fn first_f64(record: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| record.get(*k).and_then(coerce_f64))
}

/// First candidate key holding a non-empty string.
pub fn first_non_empty_str<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| {
        record
            .get(*k)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    })
}

/// Value at a nested path such as `["Earnings", "Date"]`.
pub fn at_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, key| node.as_object()?.get(*key))
}

/// True when any record in `records` has any of `keys`.
pub fn any_has_key(records: &[Value], keys: &[&str]) -> bool {
    records
        .iter()
        .any(|r| keys.iter().any(|k| r.get(*k).is_some()))
}
