//! Per-format bucket adapters.
//!
//! A *bucket* is a group of translatable files sharing one storage format.
//! Each adapter turns raw file content into a `serde_json::Value` graph and
//! back, so everything downstream (flattening, delta, translation) is format
//! agnostic. Adapters are selected by declared format name, never sniffed
//! from content.
//!
//! Round-trip law: `serialize(locale, &deserialize(locale, raw)?, None)`
//! reproduces `raw` up to declared formatting normalization (2-space JSON
//! indentation with a trailing newline; serde_yaml emitter output for YAML).

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use enum_dispatch::enum_dispatch;
use serde_json::Value;

pub mod flatten;
mod json;
mod markdown;
mod plurals;
mod yaml;

pub use json::{JsonParser, JsonRootParser};
pub use markdown::MarkdownParser;
pub use plurals::PluralsParser;
pub use yaml::{YamlParser, YamlRootParser};

/// The (de)serialization contract every format adapter implements.
#[enum_dispatch]
pub trait BucketParser {
    /// Parses raw file content into a value graph holding `locale`'s data.
    fn deserialize(&self, locale: &str, raw: &str) -> Result<Value>;

    /// Parses an existing *target* file for diffing against `source`.
    ///
    /// The default ignores `source`. Adapters whose keys are derived from
    /// content (markdown) override this to re-key the target by the source's
    /// keys, so an unchanged document deltas to empty.
    fn deserialize_target(&self, locale: &str, raw: &str, source: &Value) -> Result<Value> {
        let _ = source;
        self.deserialize(locale, raw)
    }

    /// Renders `data` as file content for `locale`.
    ///
    /// `existing` carries the file's current on-disk content, if any, so
    /// adapters whose files hold several locales at once can merge instead of
    /// overwrite.
    fn serialize(&self, locale: &str, data: &Value, existing: Option<&str>) -> Result<String>;
}

/// Registry of all bucket formats, dispatching to the matching adapter.
#[enum_dispatch(BucketParser)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketFormat {
    Json(JsonParser),
    JsonRoot(JsonRootParser),
    Yaml(YamlParser),
    YamlRoot(YamlRootParser),
    Markdown(MarkdownParser),
    Plurals(PluralsParser),
}

impl BucketFormat {
    pub const NAMES: &'static [&'static str] =
        &["json", "json-root", "yaml", "yaml-root", "markdown", "plurals"];

    pub fn name(&self) -> &'static str {
        match self {
            BucketFormat::Json(_) => "json",
            BucketFormat::JsonRoot(_) => "json-root",
            BucketFormat::Yaml(_) => "yaml",
            BucketFormat::YamlRoot(_) => "yaml-root",
            BucketFormat::Markdown(_) => "markdown",
            BucketFormat::Plurals(_) => "plurals",
        }
    }
}

impl FromStr for BucketFormat {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "json" => Ok(BucketFormat::Json(JsonParser)),
            "json-root" => Ok(BucketFormat::JsonRoot(JsonRootParser)),
            "yaml" => Ok(BucketFormat::Yaml(YamlParser)),
            "yaml-root" => Ok(BucketFormat::YamlRoot(YamlRootParser)),
            "markdown" => Ok(BucketFormat::Markdown(MarkdownParser)),
            "plurals" => Ok(BucketFormat::Plurals(PluralsParser)),
            other => anyhow::bail!(
                "Unknown bucket format '{}'. Supported formats: {}",
                other,
                Self::NAMES.join(", ")
            ),
        }
    }
}

impl fmt::Display for BucketFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
