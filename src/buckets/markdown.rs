//! Heading-delimited text adapter.
//!
//! A document splits into ordered sections at top-level headings (`#` through
//! `######` at the start of a line, outside fenced code blocks). Each source
//! section is keyed by the MD5 of its own text, so an edit to one section
//! never shifts the keys of the others. Content before the first heading
//! forms a leading section.
//!
//! A translated target cannot be keyed by its own hashes (they would never
//! match the source's), so target sections are paired ordinally with the
//! source sections and take their keys. The pairing requires the translation
//! to keep the section structure; a restructured target reads as missing and
//! is rebuilt whole.

use anyhow::Result;
use serde_json::{Map, Value};

use crate::buckets::BucketParser;
use crate::hash::md5_hex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkdownParser;

impl BucketParser for MarkdownParser {
    fn deserialize(&self, _locale: &str, raw: &str) -> Result<Value> {
        let mut root = Map::new();
        for section in split_sections(raw) {
            root.insert(md5_hex(&section), Value::String(section));
        }
        Ok(Value::Object(root))
    }

    fn deserialize_target(&self, _locale: &str, raw: &str, source: &Value) -> Result<Value> {
        let Value::Object(source_sections) = source else {
            anyhow::bail!("Expected a section map for markdown content");
        };
        let sections = split_sections(raw);
        if sections.len() != source_sections.len() {
            return Ok(Value::Object(Map::new()));
        }
        let root = source_sections
            .keys()
            .cloned()
            .zip(sections.into_iter().map(Value::String))
            .collect();
        Ok(Value::Object(root))
    }

    fn serialize(&self, _locale: &str, data: &Value, _existing: Option<&str>) -> Result<String> {
        let Value::Object(sections) = data else {
            anyhow::bail!("Expected a section map for markdown content");
        };
        let mut out = String::new();
        for value in sections.values() {
            match value {
                Value::String(text) => out.push_str(text),
                _ => anyhow::bail!("Expected string section bodies for markdown content"),
            }
        }
        Ok(out)
    }
}

/// Splits a document into sections whose concatenation reproduces the input
/// byte for byte.
fn split_sections(raw: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();
    // The marker that opened the current fence; only its own kind closes it.
    let mut fence: Option<&str> = None;

    for line in raw.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let marker = ["```", "~~~"].into_iter().find(|m| trimmed.starts_with(m));
        match (fence, marker) {
            (None, Some(opened)) => fence = Some(opened),
            (Some(open), Some(close)) if open == close => fence = None,
            (None, None) if is_heading(line) && !current.is_empty() => {
                sections.push(std::mem::take(&mut current));
            }
            _ => {}
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

/// A top-level heading: one to six `#` at the very start of the line,
/// followed by whitespace or nothing.
fn is_heading(line: &str) -> bool {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return false;
    }
    match line[hashes..].chars().next() {
        None => true,
        Some(c) => c == ' ' || c == '\t' || c == '\n' || c == '\r',
    }
}
