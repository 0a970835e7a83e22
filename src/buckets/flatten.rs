//! Flattening between nested bucket payloads and the flat key→text map that
//! the delta processor and translators consume.
//!
//! Keys are dot-joined paths (`"auth.login.title"`); array elements use their
//! index as a path segment. The inverse direction never rebuilds a graph from
//! paths alone: `apply_flat` maps the *source* value's string leaves through
//! the flat map, so arrays and non-string leaves keep their shape.

use indexmap::IndexMap;
use serde_json::Value;

/// Flattens a value graph to dot-joined string entries.
///
/// Only string leaves become entries; numbers, booleans and nulls are not
/// translatable and are left to `apply_flat` to carry through unchanged.
pub fn flatten_value(value: &Value) -> IndexMap<String, String> {
    let mut flat = IndexMap::new();
    flatten_into(value, String::new(), &mut flat);
    flat
}

fn flatten_into(value: &Value, prefix: String, flat: &mut IndexMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_into(val, join_path(&prefix, key), flat);
            }
        }
        Value::Array(items) => {
            for (index, val) in items.iter().enumerate() {
                flatten_into(val, join_path(&prefix, &index.to_string()), flat);
            }
        }
        Value::String(s) => {
            if !prefix.is_empty() {
                flat.insert(prefix, s.clone());
            }
        }
        _ => {}
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Rebuilds a value shaped like `source`, substituting each string leaf with
/// the flat map's entry for its path. Leaves absent from the map keep their
/// source text.
pub fn apply_flat(source: &Value, flat: &IndexMap<String, String>) -> Value {
    apply_at(source, String::new(), flat)
}

fn apply_at(value: &Value, prefix: String, flat: &IndexMap<String, String>) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, val)| (key.clone(), apply_at(val, join_path(&prefix, key), flat)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(index, val)| apply_at(val, join_path(&prefix, &index.to_string()), flat))
                .collect(),
        ),
        Value::String(s) => Value::String(
            flat.get(&prefix)
                .cloned()
                .unwrap_or_else(|| s.clone()),
        ),
        other => other.clone(),
    }
}
