//! [`FakeVcs`]: an in-process stand-in for the git command line.
//!
//! Records every call, returns canned status output and can be told to fail
//! a given operation. `clone_repository` initialises a real (empty) repository
//! with `git2` so remote-URL lookups behave as they would after a real clone.

use std::cell::RefCell;
use std::path::Path;

use sync_git::{Error, Result, VersionControl};

/// Recording fake of [`VersionControl`].
#[derive(Debug, Default)]
pub struct FakeVcs {
    calls: RefCell<Vec<String>>,
    status_output: String,
    scoped_status_output: String,
    fail_on: Option<String>,
}

impl FakeVcs {
    /// A fake that succeeds everywhere and reports a clean tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Output returned by `status` (non-empty means dirty).
    pub fn with_status(mut self, output: &str) -> Self {
        self.status_output = output.to_string();
        self
    }

    /// Output returned by `status_short`.
    pub fn with_scoped_status(mut self, output: &str) -> Self {
        self.scoped_status_output = output.to_string();
        self
    }

    /// Make `operation` (`clone`, `checkout`, `fetch`, `pull`, `status`,
    /// `status_short`) fail with a command error.
    pub fn failing_on(mut self, operation: &str) -> Self {
        self.fail_on = Some(operation.to_string());
        self
    }

    /// Every call so far, e.g. `"checkout main"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Operation names only, in call order.
    pub fn operations(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| c.split_whitespace().next().map(str::to_string))
            .collect()
    }

    fn record(&self, operation: &str, detail: &str) -> Result<()> {
        let call = if detail.is_empty() {
            operation.to_string()
        } else {
            format!("{operation} {detail}")
        };
        self.calls.borrow_mut().push(call.clone());

        if self.fail_on.as_deref() == Some(operation) {
            return Err(Error::CommandFailed {
                command: format!("git {call}"),
                code: Some(1),
                output: format!("simulated {operation} failure"),
            });
        }
        Ok(())
    }
}

impl VersionControl for FakeVcs {
    fn clone_repository(&self, url: &str, dest: &Path) -> Result<()> {
        self.record("clone", &format!("{url} {}", dest.display()))?;
        let repo = git2::Repository::init(dest)?;
        repo.remote("origin", url)?;
        Ok(())
    }

    fn checkout(&self, _repo: &Path, branch: &str) -> Result<()> {
        self.record("checkout", branch)
    }

    fn fetch(&self, _repo: &Path, remote: &str) -> Result<()> {
        self.record("fetch", remote)
    }

    fn pull_fast_forward(&self, _repo: &Path, remote: &str, branch: &str) -> Result<()> {
        self.record("pull", &format!("{remote} {branch}"))
    }

    fn status(&self, _repo: &Path) -> Result<String> {
        self.record("status", "")?;
        Ok(self.status_output.clone())
    }

    fn status_short(&self, _repo: &Path, pathspec: &str) -> Result<String> {
        self.record("status_short", pathspec)?;
        Ok(self.scoped_status_output.clone())
    }
}
