//! The persisted ledger of last-known source-value hashes.
//!
//! Layout on disk (YAML, at `i18n.lock` in the project root):
//!
//! ```yaml
//! version: 1
//! checksums:
//!   <md5(delocalized pattern)>:
//!     <translation key>: <md5(source value)>
//! ```
//!
//! File keys hash the *delocalized* pattern (the matched path with the locale
//! substitution replaced back by the placeholder), so they survive locale
//! differences and path-root moves. The lockfile is the only state carried
//! between runs; a missing or corrupt file is silently replaced by an empty
//! ledger and never blocks a build.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::hash::md5_hex;

pub const LOCKFILE_NAME: &str = "i18n.lock";

pub const LOCKFILE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lockfile {
    pub version: u32,
    #[serde(default)]
    pub checksums: IndexMap<String, IndexMap<String, String>>,
}

impl Default for Lockfile {
    fn default() -> Self {
        Self {
            version: LOCKFILE_VERSION,
            checksums: IndexMap::new(),
        }
    }
}

impl Lockfile {
    /// The checksum sub-map key for one bucket file.
    pub fn file_key(delocalized_pattern: &str) -> String {
        md5_hex(delocalized_pattern)
    }

    /// Loads the lockfile from the project root, falling back to an empty
    /// ledger when the file is missing or unreadable as a lockfile.
    pub fn load(root: &Path) -> Self {
        let path = Self::path(root);
        let Ok(raw) = fs::read_to_string(&path) else {
            return Self::default();
        };
        serde_yaml::from_str(&raw).unwrap_or_default()
    }

    /// Writes the lockfile to the project root.
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = Self::path(root);
        let raw = serde_yaml::to_string(self).context("Failed to render lockfile")?;
        fs::write(&path, raw)
            .with_context(|| format!("Failed to write lockfile: {}", path.display()))
    }

    pub fn path(root: &Path) -> PathBuf {
        root.join(LOCKFILE_NAME)
    }

    /// The recorded hashes for one bucket file; empty if never translated.
    pub fn checksums_for_file(&self, file_key: &str) -> IndexMap<String, String> {
        self.checksums.get(file_key).cloned().unwrap_or_default()
    }

    /// Replaces the sub-map for one bucket file after a fully successful
    /// translation.
    pub fn record(&mut self, file_key: String, checksums: IndexMap<String, String>) {
        self.checksums.insert(file_key, checksums);
    }
}
