//! Change detection between a source map, its translated target map, and the
//! lockfile's recorded hashes.
//!
//! The delta is what makes builds incremental: only keys it reports as added,
//! updated, or the new side of a rename ever reach the translator. Everything
//! is keyed on content hashes, so renames carry their translation along and
//! unchanged text is never re-sent.

use indexmap::IndexMap;

use crate::hash::md5_hex;

pub mod lockfile;

pub use lockfile::{LOCKFILE_NAME, Lockfile};

/// What changed in one bucket file since the last successful translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    /// Keys in the source with no target entry; need translation.
    pub added: Vec<String>,
    /// Target keys no longer in the source; dropped from the target.
    pub removed: Vec<String>,
    /// Keys whose source text drifted from the locked hash; need
    /// re-translation even if a target value exists.
    pub updated: Vec<String>,
    /// `(old, new)` key pairs whose content hash matched across the
    /// added/removed sets; the target value moves to the new key without
    /// re-translation.
    pub renamed: Vec<(String, String)>,
}

impl Delta {
    /// Keys that must go to the translator.
    pub fn keys_to_translate(&self) -> impl Iterator<Item = &str> {
        self.added
            .iter()
            .chain(self.updated.iter())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.updated.is_empty()
            && self.renamed.is_empty()
    }
}

/// Computes the delta for one bucket file.
///
/// `lock` maps translation keys to the MD5 of the source value at the last
/// successful translation. A key present in both maps but absent from the
/// lock counts as updated: it was never recorded as translated, so drift must
/// be assumed.
pub fn calculate_delta(
    source: &IndexMap<String, String>,
    target: &IndexMap<String, String>,
    lock: &IndexMap<String, String>,
) -> Delta {
    let mut added: Vec<String> = source
        .keys()
        .filter(|k| !target.contains_key(*k))
        .cloned()
        .collect();
    let mut removed: Vec<String> = target
        .keys()
        .filter(|k| !source.contains_key(*k))
        .cloned()
        .collect();

    // Rename detection: an added key whose source hash matches the lock entry
    // of a removed key is the same content under a new name. First match in
    // stable input order wins; ties are best-effort and non-corrupting since
    // tied candidates are content-identical by definition.
    let mut renamed = Vec::new();
    added.retain(|new_key| {
        let hash = md5_hex(&source[new_key]);
        let Some(pos) = removed.iter().position(|old| lock.get(old) == Some(&hash)) else {
            return true;
        };
        renamed.push((removed.remove(pos), new_key.clone()));
        false
    });

    let updated = source
        .iter()
        .filter(|(key, value)| {
            target.contains_key(*key) && lock.get(*key) != Some(&md5_hex(value.as_str()))
        })
        .map(|(key, _)| key.clone())
        .collect();

    Delta {
        added,
        removed,
        updated,
        renamed,
    }
}

/// The lock entry recorded for a file after a fully successful translation:
/// the MD5 of every source value.
pub fn checksums_for(source: &IndexMap<String, String>) -> IndexMap<String, String> {
    source
        .iter()
        .map(|(key, value)| (key.clone(), md5_hex(value)))
        .collect()
}
