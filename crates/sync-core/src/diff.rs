//! Manifest comparison
//!
//! [`compare`] is pure: it never touches the filesystem, and the same two
//! manifests always produce the same [`DiffResult`].

use serde::{Deserialize, Serialize};

use crate::manifest::Manifest;

/// Classification of every path found in either manifest.
///
/// The four lists are sorted and pairwise disjoint; together they cover the
/// union of both manifests' paths exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// In the source only
    pub added: Vec<String>,
    /// In the target only
    pub deleted: Vec<String>,
    /// In both, with different digests
    pub modified: Vec<String>,
    /// In both, with identical digests
    pub unchanged: Vec<String>,
}

impl DiffResult {
    /// Whether applying this diff would mutate the target.
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty())
    }

    /// Files that must be copied from the source: added then modified.
    pub fn to_copy(&self) -> impl Iterator<Item = &str> {
        self.added
            .iter()
            .chain(self.modified.iter())
            .map(String::as_str)
    }

    /// Number of paths across all four lists.
    pub fn total(&self) -> usize {
        self.added.len() + self.deleted.len() + self.modified.len() + self.unchanged.len()
    }
}

/// Compare a source manifest against a target manifest.
pub fn compare(source: &Manifest, target: &Manifest) -> DiffResult {
    let mut diff = DiffResult::default();

    // Both manifests iterate in key order, so every list comes out sorted.
    for (path, digest) in source.iter() {
        match target.get(path) {
            None => diff.added.push(path.to_string()),
            Some(other) if other != digest => diff.modified.push(path.to_string()),
            Some(_) => diff.unchanged.push(path.to_string()),
        }
    }
    diff.deleted = target
        .paths()
        .filter(|path| !source.contains(path))
        .map(str::to_string)
        .collect();

    diff
}
