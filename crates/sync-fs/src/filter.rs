//! Exclusion rules shared by manifest building and tree copying
//!
//! A path is excluded when any of its segments is an excluded directory name
//! (VCS metadata, bytecode caches), or when its file name or extension matches
//! an excluded OS-metadata or bytecode pattern. Rules apply at every depth.
//! Name and extension rules only ever match files: a directory called
//! `build.pyc` is walked like any other.

use std::collections::BTreeSet;

use crate::NormalizedPath;

/// Names and extensions that never take part in a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRules {
    /// Directory names skipped wherever they appear (`.git`, `__pycache__`)
    pub dir_names: BTreeSet<String>,
    /// Exact file names skipped (`.DS_Store`)
    pub file_names: BTreeSet<String>,
    /// File extensions skipped, without the dot (`pyc`)
    pub extensions: BTreeSet<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            dir_names: [".git", "__pycache__"].into_iter().map(String::from).collect(),
            file_names: [".DS_Store"].into_iter().map(String::from).collect(),
            extensions: ["pyc"].into_iter().map(String::from).collect(),
        }
    }
}

impl ExclusionRules {
    /// Add extra names on top of the current rules.
    pub fn extend<I, J, K>(mut self, dir_names: I, file_names: J, extensions: K) -> Self
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
        K: IntoIterator<Item = String>,
    {
        self.dir_names.extend(dir_names);
        self.file_names.extend(file_names);
        self.extensions
            .extend(extensions.into_iter().map(|e| e.trim_start_matches('.').to_string()));
        self
    }

    /// Whether a directory with this name is skipped entirely.
    pub fn is_excluded_dir_name(&self, name: &str) -> bool {
        self.dir_names.contains(name)
    }

    /// Whether a relative directory path lies in or is an excluded directory.
    pub fn is_excluded_dir(&self, relative: &NormalizedPath) -> bool {
        relative.components().any(|c| self.dir_names.contains(c))
    }

    /// Whether a relative file path is excluded.
    pub fn is_excluded(&self, relative: &NormalizedPath) -> bool {
        if self.is_excluded_dir(relative) {
            return true;
        }
        if relative
            .file_name()
            .is_some_and(|name| self.file_names.contains(name))
        {
            return true;
        }
        relative
            .extension()
            .is_some_and(|ext| self.extensions.contains(ext))
    }
}
