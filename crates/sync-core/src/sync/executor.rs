//! Applies a resolved operation to the target folder
//!
//! `add` copies the whole filtered source tree. `update` deletes removed
//! files, prunes directories the deletions left empty, then copies added and
//! modified files, so a path can switch between file and directory across
//! runs. `no-change` touches nothing.

use std::fs;
use std::path::Path;

use sync_fs::io::{copy_file, remove_file_if_exists};
use sync_fs::{ExclusionRules, NormalizedPath, walk_files};

use crate::diff::DiffResult;
use crate::{Error, Result, SyncOperation};

/// Counts of what an apply did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub copied: usize,
    pub deleted: usize,
    pub pruned: usize,
}

/// Performs the filesystem mutations for one run.
///
/// The caller proves `target` lies inside the managed repository before
/// calling [`SyncExecutor::apply`]; the executor additionally refuses any
/// diff path that would climb out of `target`.
#[derive(Debug, Clone)]
pub struct SyncExecutor<'a> {
    rules: &'a ExclusionRules,
}

impl<'a> SyncExecutor<'a> {
    pub fn new(rules: &'a ExclusionRules) -> Self {
        Self { rules }
    }

    pub fn apply(
        &self,
        operation: SyncOperation,
        source: &Path,
        target: &Path,
        diff: &DiffResult,
    ) -> Result<ApplySummary> {
        match operation {
            SyncOperation::Add => self.copy_tree(source, target),
            SyncOperation::Update => self.update(source, target, diff),
            SyncOperation::NoChange | SyncOperation::ValidationFailed => {
                Ok(ApplySummary::default())
            }
        }
    }

    fn copy_tree(&self, source: &Path, target: &Path) -> Result<ApplySummary> {
        fs::create_dir_all(target).map_err(|e| sync_fs::Error::io(target, e))?;

        let mut summary = ApplySummary::default();
        for relative in walk_files(source, self.rules)? {
            let native = relative.to_native();
            copy_file(&source.join(&native), &target.join(&native))?;
            summary.copied += 1;
        }
        tracing::info!(target = %target.display(), files = summary.copied, "Copied skill folder");
        Ok(summary)
    }

    fn update(&self, source: &Path, target: &Path, diff: &DiffResult) -> Result<ApplySummary> {
        fs::create_dir_all(target).map_err(|e| sync_fs::Error::io(target, e))?;

        let mut summary = ApplySummary::default();
        for path in &diff.deleted {
            let native = confined(path)?.to_native();
            if remove_file_if_exists(&target.join(native))? {
                tracing::info!(file = %path, "Deleted");
                summary.deleted += 1;
            }
        }
        if !diff.deleted.is_empty() {
            summary.pruned = prune_empty_dirs(target, self.rules)?;
        }
        for path in diff.to_copy() {
            let native = confined(path)?.to_native();
            copy_file(&source.join(&native), &target.join(&native))?;
            tracing::info!(file = path, "Copied");
            summary.copied += 1;
        }
        Ok(summary)
    }
}

fn confined(path: &str) -> Result<NormalizedPath> {
    let normalized = NormalizedPath::new(path);
    if !normalized.is_confined() {
        return Err(Error::repository_state(format!(
            "Refusing to touch path outside the target folder: {path}"
        )));
    }
    Ok(normalized)
}

/// Remove empty directories below `root`, deepest first.
///
/// Excluded-name directories are neither entered nor removed, symlinks are
/// not followed, and `root` itself always survives.
pub fn prune_empty_dirs(root: &Path, rules: &ExclusionRules) -> Result<usize> {
    let mut removed = 0;
    let entries = fs::read_dir(root).map_err(|e| sync_fs::Error::io(root, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| sync_fs::Error::io(root, e))?;
        let file_type = entry.file_type().map_err(|e| sync_fs::Error::io(entry.path(), e))?;
        if !file_type.is_dir() || rules.is_excluded_dir_name(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let path = entry.path();
        removed += prune_empty_dirs(&path, rules)?;
        let is_empty = fs::read_dir(&path)
            .map_err(|e| sync_fs::Error::io(&path, e))?
            .next()
            .is_none();
        if is_empty {
            fs::remove_dir(&path).map_err(|e| sync_fs::Error::io(&path, e))?;
            tracing::debug!(dir = %path.display(), "Pruned empty directory");
            removed += 1;
        }
    }
    Ok(removed)
}
