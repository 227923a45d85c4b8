//! Lifecycle of the local clone of the managed repository
//!
//! [`RepositoryManager::ensure`] runs five strictly sequential steps and
//! stops at the first failure:
//!
//! 1. clone when no repository exists yet (refusing a foreign non-empty directory)
//! 2. compare the configured remote URL with the expected one
//! 3. refuse a working tree with uncommitted changes
//! 4. check out the branch
//! 5. optionally fetch and fast-forward pull
//!
//! Nothing is stashed, merged or rolled back. An interrupted clone must be
//! cleaned up by hand.

use std::fs;
use std::path::{Path, PathBuf};

use sync_git::{DEFAULT_REMOTE, VersionControl, configured_remote_url, has_repository_metadata};

use crate::{Error, Result};

/// Where the managed repository lives and what it must track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySpec {
    /// Local clone path
    pub path: PathBuf,
    /// Expected remote URL
    pub url: String,
    /// Branch to check out and pull
    pub branch: String,
}

/// What [`RepositoryManager::ensure`] had to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnsureOutcome {
    /// The repository was cloned during this call
    pub created: bool,
}

/// Owns every version-control interaction of a run.
#[derive(Debug)]
pub struct RepositoryManager<V> {
    vcs: V,
    remote: String,
}

impl<V: VersionControl> RepositoryManager<V> {
    pub fn new(vcs: V) -> Self {
        Self {
            vcs,
            remote: DEFAULT_REMOTE.to_string(),
        }
    }

    /// The underlying version-control adapter.
    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    /// Bring the clone at `spec.path` into a clean, checked-out state.
    ///
    /// # Errors
    ///
    /// - [`Error::RepositoryState`] for a foreign non-empty directory, a
    ///   remote mismatch, or a dirty working tree
    /// - [`Error::Process`] when a git command fails
    /// - [`Error::Filesystem`] when the clone's parent cannot be created
    pub fn ensure(&self, spec: &RepositorySpec, pull: bool) -> Result<EnsureOutcome> {
        let path = spec.path.as_path();
        let mut outcome = EnsureOutcome::default();

        if !has_repository_metadata(path) {
            if is_occupied(path) {
                return Err(Error::repository_state(format!(
                    "Repo path exists but is not a git repo: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| sync_fs::Error::io(parent, e))?;
            }
            tracing::info!(url = %spec.url, path = %path.display(), "Cloning repository");
            self.vcs.clone_repository(&spec.url, path)?;
            outcome.created = true;

            if !has_repository_metadata(path) {
                return Err(Error::repository_state(format!(
                    "Invalid git repository path: {}",
                    path.display()
                )));
            }
        }

        if let Some(current) = configured_remote_url(path, &self.remote)?
            && current != spec.url
        {
            return Err(Error::repository_state(format!(
                "Repo remote mismatch at {}: expected {}, got {}",
                path.display(),
                spec.url,
                current
            )));
        }

        if !self.vcs.status(path)?.trim().is_empty() {
            return Err(Error::repository_state(format!(
                "Repository has uncommitted changes: {}. Commit or stash before syncing.",
                path.display()
            )));
        }

        tracing::debug!(branch = %spec.branch, "Checking out branch");
        self.vcs.checkout(path, &spec.branch)?;

        if pull {
            tracing::debug!(remote = %self.remote, branch = %spec.branch, "Pulling");
            self.vcs.fetch(path, &self.remote)?;
            self.vcs.pull_fast_forward(path, &self.remote, &spec.branch)?;
        }

        Ok(outcome)
    }

    /// Short status of `pathspec` only, trimmed.
    pub fn scoped_status(&self, repo: &Path, pathspec: &str) -> Result<String> {
        Ok(self.vcs.status_short(repo, pathspec)?.trim().to_string())
    }
}

/// True when `path` exists and is anything other than an empty directory.
fn is_occupied(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }
    match fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => true,
    }
}
