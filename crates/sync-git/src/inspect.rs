//! Read-only repository lookups through libgit2

use std::path::Path;

use git2::{ErrorCode, Repository};

use crate::Result;

/// Whether `path` carries git metadata of its own (a `.git` entry).
pub fn has_repository_metadata(path: &Path) -> bool {
    path.join(".git").exists()
}

/// The URL configured for `remote`, if the remote exists and has one.
///
/// # Errors
///
/// Returns an error if `repo` cannot be opened as a git repository.
pub fn configured_remote_url(repo: &Path, remote: &str) -> Result<Option<String>> {
    let repository = Repository::open(repo)?;
    match repository.find_remote(remote) {
        Ok(found) => Ok(found.url().map(str::to_string)),
        Err(e) if matches!(e.code(), ErrorCode::NotFound | ErrorCode::InvalidSpec) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_metadata_detection() {
        let temp = TempDir::new().unwrap();
        assert!(!has_repository_metadata(temp.path()));

        Repository::init(temp.path()).unwrap();
        assert!(has_repository_metadata(temp.path()));
    }

    #[test]
    fn test_remote_url_present() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        repo.remote("origin", "https://example.com/org/skills.git")
            .unwrap();

        let url = configured_remote_url(temp.path(), "origin").unwrap();
        assert_eq!(url.as_deref(), Some("https://example.com/org/skills.git"));
    }

    #[test]
    fn test_remote_url_absent() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();

        assert_eq!(configured_remote_url(temp.path(), "origin").unwrap(), None);
    }

    #[test]
    fn test_not_a_repository() {
        let temp = TempDir::new().unwrap();
        assert!(configured_remote_url(temp.path(), "origin").is_err());
    }
}
