//! Locale-placeholder file patterns.
//!
//! A bucket declares its files with a pattern like `locales/[locale].json`.
//! Substituting a locale gives the glob to match on disk; going the other way
//! (*delocalizing* a matched path back to the pattern form) gives the stable
//! per-file identity that the lockfile keys on, immune to which locale the
//! path was matched under.

use anyhow::{Context, Result};
use regex::Regex;

pub const LOCALE_PLACEHOLDER: &str = "[locale]";

#[derive(Debug, Clone)]
pub struct BucketPattern {
    raw: String,
    /// Matches a concrete path, capturing each locale substitution.
    capture: Regex,
}

impl BucketPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let escaped = regex::escape(pattern);
        let capture = format!(
            "^{}$",
            escaped
                .replace(&regex::escape(LOCALE_PLACEHOLDER), "([A-Za-z0-9_\\-]+)")
                // Glob wildcards stay wildcards when matching back.
                .replace("\\*", "[^/]*")
        );
        let capture = Regex::new(&capture)
            .with_context(|| format!("Invalid bucket pattern: {pattern}"))?;
        Ok(Self {
            raw: pattern.to_string(),
            capture,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn has_placeholder(&self) -> bool {
        self.raw.contains(LOCALE_PLACEHOLDER)
    }

    /// Substitutes a locale into every placeholder occurrence.
    pub fn localize(&self, locale: &str) -> String {
        self.raw.replace(LOCALE_PLACEHOLDER, locale)
    }

    /// Replaces the locale substitutions in a matched path back with the
    /// placeholder. Returns `None` when the path does not match the pattern.
    pub fn delocalize(&self, path: &str) -> Option<String> {
        let captures = self.capture.captures(path)?;
        let mut out = path.to_string();
        // Splice in reverse so earlier byte ranges stay valid.
        for index in (1..captures.len()).rev() {
            if let Some(group) = captures.get(index) {
                out.replace_range(group.range(), LOCALE_PLACEHOLDER);
            }
        }
        Some(out)
    }
}
