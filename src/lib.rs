//! Glossa - incremental localization compiler
//!
//! Glossa extracts translatable content from structured sources (JSON/YAML
//! catalogs, heading-delimited text, plural-variant catalogs, generic
//! document trees), tracks what changed since the last successful translation
//! through a content-hash lockfile, and reinserts translated text without
//! disturbing anything non-translatable.
//!
//! ## Module Structure
//!
//! - `buckets`: per-format serialize/deserialize adapters and flattening
//! - `cli`: command-line interface layer
//! - `delta`: change detection and the persisted lockfile ledger
//! - `document`: generic document tree plus scope/chunk extraction
//! - `engine`: the per-file pipeline, fan-out, and the translator seam
//! - `hash`: content hashing shared by every identifier scheme
//! - `html`: positional round-trip localization for HTML-like trees

pub mod buckets;
pub mod cli;
pub mod delta;
pub mod document;
pub mod engine;
pub mod hash;
pub mod html;
