//! Deterministic file enumeration
//!
//! Produces the finite, lexicographically ordered list of relative file paths
//! below a root, with excluded directories pruned before they are entered.

use std::path::Path;

use walkdir::WalkDir;

use crate::{Error, ExclusionRules, NormalizedPath, Result};

/// List every non-excluded file below `root`, sorted by normalized path.
///
/// Excluded directories are never descended into; directories are matched
/// by name only, files by name and extension too. Symlinks are not followed
/// while walking, but a symlink that points at a regular file is listed.
/// An absent `root` yields an empty list.
///
/// # Errors
///
/// Returns [`Error::Io`] if a directory cannot be read, and
/// [`Error::NonUtf8Path`] for a listed file whose relative path is not
/// valid UTF-8, since manifest keys are strings.
pub fn walk_files(root: &Path, rules: &ExclusionRules) -> Result<Vec<NormalizedPath>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let Some(rel) = NormalizedPath::relative_to(entry.path(), root) else {
                return false;
            };
            if entry.file_type().is_dir() {
                !rules.is_excluded_dir(&rel)
            } else {
                !rules.is_excluded(&rel)
            }
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io(path, std::io::Error::from(e))
        })?;
        if entry.depth() == 0 || !entry.path().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if relative.to_str().is_none() {
            return Err(Error::NonUtf8Path {
                path: entry.path().to_path_buf(),
            });
        }
        files.push(NormalizedPath::new(relative));
    }

    files.sort();
    tracing::debug!(root = %root.display(), files = files.len(), "Walked directory");
    Ok(files)
}
