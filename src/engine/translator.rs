//! The translator seam.
//!
//! The engine never talks to a provider directly: it hands a flat key→text
//! map to whatever implements [`Translator`] and only ever inspects
//! success/failure, never the error shape. The built-in [`PseudoTranslator`]
//! implements the trait without any network, which keeps the CLI usable end
//! to end and the test suite hermetic.

use anyhow::Result;
use indexmap::IndexMap;

/// Locale pair for one translation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateRequest<'a> {
    pub source_locale: &'a str,
    pub target_locale: &'a str,
}

/// An opaque translation capability.
///
/// Implementations may be remote providers; errors are propagated as-is and
/// abort only the file being translated.
pub trait Translator: Send + Sync {
    /// Translates a single text.
    fn translate(&self, text: &str, request: &TranslateRequest) -> Result<String>;

    /// Translates a whole key→text map. The default forwards entry by entry;
    /// providers with a batch endpoint should override.
    fn translate_map(
        &self,
        map: &IndexMap<String, String>,
        request: &TranslateRequest,
    ) -> Result<IndexMap<String, String>> {
        map.iter()
            .map(|(key, text)| Ok((key.clone(), self.translate(text, request)?)))
            .collect()
    }
}

/// Bracketed accented pseudolocalization.
///
/// Maps vowels to accented forms and wraps the result in brackets, leaving
/// `{placeholder}` spans untouched. Output is deterministic, which the CLI
/// tests rely on.
#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoTranslator;

impl Translator for PseudoTranslator {
    fn translate(&self, text: &str, _request: &TranslateRequest) -> Result<String> {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('[');
        let mut in_placeholder = false;
        for c in text.chars() {
            match c {
                '{' => {
                    in_placeholder = true;
                    out.push(c);
                }
                '}' => {
                    in_placeholder = false;
                    out.push(c);
                }
                _ if in_placeholder => out.push(c),
                _ => out.push(accent(c)),
            }
        }
        out.push(']');
        Ok(out)
    }
}

fn accent(c: char) -> char {
    match c {
        'a' => 'á',
        'e' => 'é',
        'i' => 'í',
        'o' => 'ó',
        'u' => 'ú',
        'y' => 'ý',
        'A' => 'Á',
        'E' => 'É',
        'I' => 'Í',
        'O' => 'Ó',
        'U' => 'Ú',
        'Y' => 'Ý',
        other => other,
    }
}
