//! Scope and chunk extraction over the generic document tree.
//!
//! A *scope* is a maximal content region translated and cached as a unit; a
//! *chunk* is the smallest translatable text unit inside it. Both carry ids
//! derived purely from content, never from position or counters, so two
//! structurally identical fragments anywhere in a tree collapse to the same
//! ids and reuse each other's translations.
//!
//! Extraction never fails: node kinds it does not understand simply emit no
//! chunk.

use indexmap::IndexMap;

use crate::document::{
    Element, Node, SCOPE_MARKER_ATTRIBUTE, is_translatable_attribute, normalize_text,
};
use crate::hash::md5_hex;

/// The payload of a chunk: either normalized display text or the opaque
/// signature of an embedded expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkContent {
    Text(String),
    Expression(String),
}

/// The smallest translatable unit inside a scope.
///
/// `id` is `md5(normalized text)` for text chunks and `md5(signature)` for
/// expression chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub id: String,
    pub content: ChunkContent,
}

impl Chunk {
    fn text(normalized: String) -> Self {
        Self {
            id: md5_hex(&normalized),
            content: ChunkContent::Text(normalized),
        }
    }

    fn expression(signature: String) -> Self {
        Self {
            id: md5_hex(&signature),
            content: ChunkContent::Expression(signature),
        }
    }
}

/// A content region grouping chunks that are translated together.
///
/// `id` is `md5` over the ordered direct chunk ids followed by the nested
/// scope ids, so a scope's identity follows its content transitively.
/// `explicit` marks scopes forced into existence by the scope marker
/// attribute rather than by having text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub id: String,
    pub chunks: Vec<Chunk>,
    pub nested: Vec<Scope>,
    pub explicit: bool,
}

/// Result of walking one document tree.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Every scope found, nested ones included, keyed by scope id.
    /// Content-identical scopes collapse to a single entry.
    pub scopes: IndexMap<String, Scope>,
    /// Raw translatable text per text-chunk id. Expression chunks carry no
    /// translatable text and do not appear here.
    pub chunk_texts: IndexMap<String, String>,
}

/// Walks a document tree and extracts all scopes and chunks.
pub fn extract_scopes(root: &Node) -> Extraction {
    let mut extraction = Extraction::default();
    find_scope_roots(root, &mut extraction);
    extraction
}

fn find_scope_roots(node: &Node, out: &mut Extraction) {
    if let Node::Element(el) = node {
        if qualifies_as_scope(el) {
            build_scope(el, out);
        } else {
            for child in &el.children {
                find_scope_roots(child, out);
            }
        }
    }
    // Bare text or expressions outside any element have no scope to live in.
}

/// A node is a scope root iff it has non-empty rendered text content, or it
/// carries the explicit scope marker. Callers guarantee the nearest element
/// ancestor does not already qualify, so scopes never claim text twice.
fn qualifies_as_scope(el: &Element) -> bool {
    el.attributes.contains_key(SCOPE_MARKER_ATTRIBUTE) || !rendered_text(el).is_empty()
}

/// Concatenated normalized text of all descendant text runs.
fn rendered_text(el: &Element) -> String {
    let mut parts = Vec::new();
    collect_text(el, &mut parts);
    normalize_text(&parts.join(" "))
}

fn collect_text(el: &Element, parts: &mut Vec<String>) {
    for child in &el.children {
        match child {
            Node::Text(t) => parts.push(t.clone()),
            Node::Element(inner) => collect_text(inner, parts),
            Node::Expression(_) => {}
        }
    }
}

fn build_scope(el: &Element, out: &mut Extraction) -> Scope {
    let explicit = el.attributes.contains_key(SCOPE_MARKER_ATTRIBUTE);

    let mut chunks = Vec::new();
    let mut nested = Vec::new();

    push_attribute_chunks(el, &mut chunks, out);
    for child in &el.children {
        collect_member(child, &mut chunks, &mut nested, out);
    }

    let joined: String = chunks
        .iter()
        .map(|c| c.id.as_str())
        .chain(nested.iter().map(|s| s.id.as_str()))
        .collect();
    let scope = Scope {
        id: md5_hex(&joined),
        chunks,
        nested,
        explicit,
    };
    out.scopes.insert(scope.id.clone(), scope.clone());
    scope
}

/// Adds one child of a scope to that scope's members.
///
/// Direct text runs and expressions become chunks. A nested element with its
/// own text becomes a nested scope; one without contributes only its
/// allowlisted attribute chunks and is walked through for deeper members.
fn collect_member(node: &Node, chunks: &mut Vec<Chunk>, nested: &mut Vec<Scope>, out: &mut Extraction) {
    match node {
        Node::Text(t) => {
            let normalized = normalize_text(t);
            if !normalized.is_empty() {
                let chunk = Chunk::text(normalized.clone());
                out.chunk_texts.insert(chunk.id.clone(), normalized);
                chunks.push(chunk);
            }
        }
        Node::Expression(signature) => {
            chunks.push(Chunk::expression(signature.clone()));
        }
        Node::Element(inner) => {
            if qualifies_as_scope(inner) {
                nested.push(build_scope(inner, out));
            } else {
                push_attribute_chunks(inner, chunks, out);
                for child in &inner.children {
                    collect_member(child, chunks, nested, out);
                }
            }
        }
    }
}

fn push_attribute_chunks(el: &Element, chunks: &mut Vec<Chunk>, out: &mut Extraction) {
    for (name, value) in &el.attributes {
        if !is_translatable_attribute(name) {
            continue;
        }
        let normalized = normalize_text(value);
        if normalized.is_empty() {
            continue;
        }
        let chunk = Chunk::text(normalized.clone());
        out.chunk_texts.insert(chunk.id.clone(), normalized);
        chunks.push(chunk);
    }
}
