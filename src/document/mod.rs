//! Generic document tree shared by scope extraction and the structured-text
//! localizer.
//!
//! A front-end parser (JSX, HTML, a template grammar) produces this tree; the
//! algorithms in this crate are grammar-independent and only ever see the
//! three node kinds below. Unknown constructs in the source grammar should be
//! mapped to the closest kind or dropped by the front end.

use indexmap::IndexMap;

pub mod scopes;

/// Attribute names whose values are display-facing and therefore translatable.
pub const TRANSLATABLE_ATTRIBUTES: &[&str] = &["title", "alt", "placeholder", "label", "aria-label"];

/// Marker attribute that forces an element to become a scope root.
pub const SCOPE_MARKER_ATTRIBUTE: &str = "data-i18n-scope";

/// Element tags whose content is never translatable.
pub const NON_TRANSLATABLE_TAGS: &[&str] = &["script", "style"];

/// A node in the generic document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// A raw text run. May be whitespace-only; consumers decide eligibility.
    Text(String),
    /// An embedded expression, carried as an opaque signature string
    /// (e.g. the source text of a `{user.name}` interpolation).
    Expression(String),
}

/// An element node: tag, ordered attributes, ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(Node::Text(value.into()))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Whether an attribute's value is eligible for translation.
///
/// Only the display-facing allowlist qualifies; `data-`-prefixed attributes
/// and tree-identity keys (`id`, `key`) are always excluded, so the allowlist
/// can never be widened into structural territory by mistake.
pub fn is_translatable_attribute(name: &str) -> bool {
    if name.starts_with("data-") || name == "id" || name == "key" {
        return false;
    }
    TRANSLATABLE_ATTRIBUTES.contains(&name)
}

/// Whether an element's content is categorically non-translatable.
pub fn is_non_translatable_tag(tag: &str) -> bool {
    NON_TRANSLATABLE_TAGS.contains(&tag)
}

/// Normalizes a text run for content addressing: trims the ends and collapses
/// internal whitespace runs to a single space.
///
/// Two text runs that differ only in formatting whitespace normalize to the
/// same string and therefore share a chunk id.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
