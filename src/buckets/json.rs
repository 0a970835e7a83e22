//! JSON bucket adapters: plain passthrough and the root-keyed variant that
//! nests each locale's payload under its locale code in one shared file.

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::buckets::BucketParser;

/// Pretty-prints with 2-space indentation and a trailing newline, the fixed
/// output normalization for all JSON-backed formats.
pub(crate) fn to_pretty_json(value: &Value) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    out.push('\n');
    Ok(out)
}

pub(crate) fn parse_object(raw: &str) -> Result<Map<String, Value>> {
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_json::from_str(raw).context("Invalid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("Expected a JSON object at the root, found {}", json_kind(&other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One file per locale, the whole document is that locale's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonParser;

impl BucketParser for JsonParser {
    fn deserialize(&self, _locale: &str, raw: &str) -> Result<Value> {
        if raw.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_str(raw).context("Invalid JSON")
    }

    fn serialize(&self, _locale: &str, data: &Value, _existing: Option<&str>) -> Result<String> {
        to_pretty_json(data)
    }
}

/// One shared file for all locales, each nested under its locale code.
///
/// Serialization merges into the existing root object so sibling locales in
/// the same file are preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonRootParser;

impl BucketParser for JsonRootParser {
    fn deserialize(&self, locale: &str, raw: &str) -> Result<Value> {
        let root = parse_object(raw)?;
        Ok(root
            .get(locale)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())))
    }

    fn serialize(&self, locale: &str, data: &Value, existing: Option<&str>) -> Result<String> {
        let mut root = parse_object(existing.unwrap_or_default())?;
        root.insert(locale.to_string(), data.clone());
        to_pretty_json(&Value::Object(root))
    }
}
