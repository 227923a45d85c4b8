//! Git repository fixtures at three realism levels.
//!
//! Choose the lowest-realism fixture that satisfies your test's needs;
//! fakes are faster and have fewer external dependencies.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run `git <args>` in `dir`, panicking with git's stderr on failure.
///
/// # Panics
/// Panics if git cannot be spawned or exits non-zero.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed in {}:\n{}",
            dir.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Set a local identity so commits work without global git config.
pub fn configure_identity(dir: &Path) {
    git(dir, &["config", "user.email", "test@test.com"]);
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

/// Creates a minimal `.git` directory structure **without** initialising a real
/// git repository.
///
/// Realism level: **FAKE**: directory structure only, no git object store.
///
/// Use for: tests that only need the `.git` marker to be present.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir_all(path.join(".git/refs/heads"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
}

/// Initialises a real git repository using `git2`, with `origin` set to `url`.
///
/// Realism level: **REAL**: valid git state, empty history.
///
/// Use for: repository-state checks (remote URL lookup) that never run the
/// `git` binary.
///
/// # Panics
/// Panics if `git2` cannot initialise the repository or add the remote.
pub fn real_git_repo(path: &Path, origin_url: Option<&str>) -> git2::Repository {
    let repo = git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    });
    if let Some(url) = origin_url {
        repo.remote("origin", url)
            .unwrap_or_else(|e| panic!("real_git_repo: failed to add origin: {e}"));
    }
    repo
}

/// Creates a bare repository under `parent` whose `main` branch holds one
/// commit (a `README.md`).
///
/// Realism level: **REAL WITH HISTORY**: a remote that `git clone`, `fetch`
/// and `pull` can talk to over the local filesystem.
///
/// Returns the path of the bare repository, usable directly as a clone URL.
///
/// # Panics
/// Panics if any git operation fails.
pub fn bare_remote_with_commit(parent: &Path) -> PathBuf {
    let remote = parent.join("remote.git");
    fs::create_dir_all(&remote).unwrap();
    git(&remote, &["init", "--bare"]);
    git(&remote, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    let seed = seed_path(&remote);
    git(parent, &["clone", remote.to_str().unwrap(), seed.to_str().unwrap()]);
    configure_identity(&seed);
    git(&seed, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    fs::write(seed.join("README.md"), "# Skills\n").unwrap();
    git(&seed, &["add", "."]);
    git(&seed, &["commit", "-m", "Initial commit"]);
    git(&seed, &["push", "origin", "main"]);

    remote
}

/// Push a commit writing `file` to the remote created by
/// [`bare_remote_with_commit`], simulating upstream activity.
///
/// # Panics
/// Panics if any git operation fails.
pub fn push_upstream_change(remote: &Path, file: &str, content: &str) {
    let seed = seed_path(remote);
    let path = seed.join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    git(&seed, &["add", "."]);
    git(&seed, &["commit", "-m", &format!("Update {file}")]);
    git(&seed, &["push", "origin", "main"]);
}

/// Clone `remote` into `dest` with a local identity configured.
///
/// # Panics
/// Panics if the clone fails.
pub fn clone_with_identity(remote: &Path, dest: &Path) {
    let parent = dest.parent().unwrap();
    git(parent, &["clone", remote.to_str().unwrap(), dest.to_str().unwrap()]);
    configure_identity(dest);
}

fn seed_path(remote: &Path) -> PathBuf {
    remote.with_file_name("remote-seed")
}
