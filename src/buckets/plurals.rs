//! Structured plural-variant catalog adapter.
//!
//! File shape: a JSON root object keyed by locale, each locale holding entry
//! keys whose value is either a plain string or a variant record
//! (`{"one": ..., "other": ..., "zero": ...}`). All locales live in one file,
//! so serialization merges the written locale into the existing root instead
//! of replacing the document.

use anyhow::Result;
use serde_json::{Map, Value};

use crate::buckets::BucketParser;
use crate::buckets::json::{parse_object, to_pretty_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PluralsParser;

impl BucketParser for PluralsParser {
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
