//! Content-addressed directory manifests

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sync_fs::{ExclusionRules, compute_file_checksum, walk_files};

use crate::Result;

/// Map from relative POSIX path to the SHA-256 hex digest of the file's bytes.
///
/// Keys are unique and case-sensitive. Iteration is in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, String>,
}

impl Manifest {
    /// Index every non-excluded file under `root`.
    ///
    /// An absent `root` yields an empty manifest: nothing has been published
    /// there yet.
    ///
    /// # Errors
    ///
    /// Returns a filesystem error if the tree cannot be walked or a file
    /// cannot be read.
    pub fn build(root: &Path, rules: &ExclusionRules) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for relative in walk_files(root, rules)? {
            let checksum = compute_file_checksum(&root.join(relative.to_native()))?;
            entries.insert(relative.as_str().to_string(), checksum);
        }
        tracing::debug!(root = %root.display(), files = entries.len(), "Built manifest");
        Ok(Self { entries })
    }

    /// Build a manifest from in-memory `(path, digest)` pairs.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths in lexicographic order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
