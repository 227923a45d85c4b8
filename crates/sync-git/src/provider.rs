//! Version-control capability trait

use std::path::Path;

use crate::Result;

/// Remote name used for fetch and pull.
pub const DEFAULT_REMOTE: &str = "origin";

/// The version-control operations the synchronizer depends on.
///
/// Every method blocks until the underlying command finishes. There is no
/// timeout and no retry; a failed command is reported once and the caller
/// decides what to do.
pub trait VersionControl {
    /// Clone `url` into `dest`. `dest` must be absent or empty.
    fn clone_repository(&self, url: &str, dest: &Path) -> Result<()>;

    /// Check out an existing local or remote-tracking branch.
    fn checkout(&self, repo: &Path, branch: &str) -> Result<()>;

    /// Fetch from `remote`.
    fn fetch(&self, repo: &Path, remote: &str) -> Result<()>;

    /// Pull `branch` from `remote`, refusing anything but a fast-forward.
    fn pull_fast_forward(&self, repo: &Path, remote: &str, branch: &str) -> Result<()>;

    /// Porcelain status of the whole working tree.
    ///
    /// An empty (or whitespace-only) result means the tree is clean.
    fn status(&self, repo: &Path) -> Result<String>;

    /// Short status restricted to `pathspec`, relative to the repository root.
    fn status_short(&self, repo: &Path, pathspec: &str) -> Result<String>;
}

impl<T: VersionControl + ?Sized> VersionControl for &T {
    fn clone_repository(&self, url: &str, dest: &Path) -> Result<()> {
        (**self).clone_repository(url, dest)
    }

    fn checkout(&self, repo: &Path, branch: &str) -> Result<()> {
        (**self).checkout(repo, branch)
    }

    fn fetch(&self, repo: &Path, remote: &str) -> Result<()> {
        (**self).fetch(repo, remote)
    }

    fn pull_fast_forward(&self, repo: &Path, remote: &str, branch: &str) -> Result<()> {
        (**self).pull_fast_forward(repo, remote, branch)
    }

    fn status(&self, repo: &Path) -> Result<String> {
        (**self).status(repo)
    }

    fn status_short(&self, repo: &Path, pathspec: &str) -> Result<String> {
        (**self).status_short(repo, pathspec)
    }
}
