//! YAML bucket adapters, mirroring the JSON pair.
//!
//! Values are deserialized straight into `serde_json::Value` so the rest of
//! the pipeline sees one value model regardless of storage format. Output
//! formatting follows the serde_yaml emitter.

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::buckets::BucketParser;

fn parse_yaml(raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    let value: Value = serde_yaml::from_str(raw).context("Invalid YAML")?;
    // An all-comments document parses as null; treat it as empty.
    if value.is_null() {
        return Ok(Value::Object(Map::new()));
    }
    Ok(value)
}

fn to_yaml(value: &Value) -> Result<String> {
    serde_yaml::to_string(value).context("Failed to render YAML")
}

fn parse_yaml_object(raw: &str) -> Result<Map<String, Value>> {
    match parse_yaml(raw)? {
        Value::Object(map) => Ok(map),
        _ => bail!("Expected a YAML mapping at the root"),
    }
}

/// One file per locale, the whole document is that locale's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YamlParser;

impl BucketParser for YamlParser {
    fn deserialize(&self, _locale: &str, raw: &str) -> Result<Value> {
        parse_yaml(raw)
    }

    fn serialize(&self, _locale: &str, data: &Value, _existing: Option<&str>) -> Result<String> {
        to_yaml(data)
    }
}

/// One shared YAML file for all locales, each nested under its locale code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YamlRootParser;

impl BucketParser for YamlRootParser {
    fn deserialize(&self, locale: &str, raw: &str) -> Result<Value> {
        let root = parse_yaml_object(raw)?;
        Ok(root
            .get(locale)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())))
    }

    fn serialize(&self, locale: &str, data: &Value, existing: Option<&str>) -> Result<String> {
        let mut root = parse_yaml_object(existing.unwrap_or_default())?;
        root.insert(locale.to_string(), data.clone());
        to_yaml(&Value::Object(root))
    }
}
