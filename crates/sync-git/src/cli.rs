//! Subprocess adapter for the `git` command line
//!
//! Exit code and captured output are the whole contract: a non-zero exit
//! becomes [`Error::CommandFailed`] carrying git's own message.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::{Error, Result, VersionControl};

/// Reject ref or remote names that git could read as options or traversal.
///
/// Rejects:
/// - Empty strings
/// - Strings containing `..`
/// - Strings starting with `-`
/// - Strings containing null bytes or control characters
fn validate_ref(value: &str, name: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidInput {
            message: format!("{} cannot be empty", name),
        });
    }
    if value.contains("..") {
        return Err(Error::InvalidInput {
            message: format!("{} cannot contain '..'", name),
        });
    }
    if value.starts_with('-') {
        return Err(Error::InvalidInput {
            message: format!("{} cannot start with '-'", name),
        });
    }
    if value.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err(Error::InvalidInput {
            message: format!("{} cannot contain null or control characters", name),
        });
    }
    Ok(())
}

/// Git CLI wrapper.
///
/// Commands run with `GIT_TERMINAL_PROMPT=0` and a null stdin so a missing
/// credential fails the command instead of waiting on a prompt.
#[derive(Debug, Clone)]
pub struct GitCli {
    git_path: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    /// Use the `git` found on `PATH`.
    pub fn new() -> Self {
        Self {
            git_path: "git".into(),
        }
    }

    /// Use a specific git executable.
    pub fn with_program(git_path: impl Into<String>) -> Self {
        Self {
            git_path: git_path.into(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.git_path);
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.stdin(Stdio::null());
        cmd
    }

    /// Run git with `args`, optionally inside `repo` (`git -C <repo>`).
    ///
    /// Returns captured stdout on success.
    fn run<I, S>(&self, repo: Option<&Path>, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = self.command();
        if let Some(repo) = repo {
            cmd.arg("-C").arg(repo);
        }
        cmd.args(args);

        let rendered = render_command(&self.git_path, &cmd);
        tracing::debug!(command = %rendered, "Running git");

        let output = cmd.output().map_err(|source| Error::Spawn {
            command: rendered.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            let output_text = if !stderr.is_empty() {
                stderr
            } else if !stdout.is_empty() {
                stdout
            } else {
                "unknown error".to_string()
            };
            tracing::debug!(command = %rendered, code = ?output.status.code(), "git failed");
            return Err(Error::CommandFailed {
                command: rendered,
                code: output.status.code(),
                output: output_text,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn render_command(program: &str, cmd: &Command) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

impl VersionControl for GitCli {
    fn clone_repository(&self, url: &str, dest: &Path) -> Result<()> {
        if url.is_empty() || url.starts_with('-') {
            return Err(Error::InvalidInput {
                message: format!("invalid repository url: {url:?}"),
            });
        }
        self.run(None, [OsStr::new("clone"), OsStr::new(url), dest.as_os_str()])?;
        Ok(())
    }

    fn checkout(&self, repo: &Path, branch: &str) -> Result<()> {
        validate_ref(branch, "branch")?;
        self.run(Some(repo), ["checkout", branch])?;
        Ok(())
    }

    fn fetch(&self, repo: &Path, remote: &str) -> Result<()> {
        validate_ref(remote, "remote")?;
        self.run(Some(repo), ["fetch", remote])?;
        Ok(())
    }

    fn pull_fast_forward(&self, repo: &Path, remote: &str, branch: &str) -> Result<()> {
        validate_ref(remote, "remote")?;
        validate_ref(branch, "branch")?;
        self.run(Some(repo), ["pull", "--ff-only", remote, branch])?;
        Ok(())
    }

    fn status(&self, repo: &Path) -> Result<String> {
        self.run(Some(repo), ["status", "--porcelain"])
    }

    fn status_short(&self, repo: &Path, pathspec: &str) -> Result<String> {
        self.run(Some(repo), ["status", "--short", "--", pathspec])
    }
}
