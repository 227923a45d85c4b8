//! Error types for sync-core

use serde::{Deserialize, Serialize};

/// Result type for sync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end a sync run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The skill folder failed validation
    #[error("Validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    /// The managed repository is in a state the run refuses to touch
    #[error("{message}")]
    RepositoryState { message: String },

    /// Configuration is missing or inconsistent
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A version-control command failed
    #[error(transparent)]
    Process(#[from] sync_git::Error),

    /// Filesystem error from sync-fs
    #[error(transparent)]
    Filesystem(#[from] sync_fs::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failure classes, as surfaced in reports and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Validation,
    RepositoryState,
    Process,
    Filesystem,
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::RepositoryState => "repository-state",
            Self::Process => "process",
            Self::Filesystem => "filesystem",
            Self::Config => "config",
        }
    }
}

impl Error {
    pub fn repository_state(message: impl Into<String>) -> Self {
        Self::RepositoryState {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::RepositoryState { .. } => ErrorKind::RepositoryState,
            Self::Config { .. } => ErrorKind::Config,
            Self::Process(_) => ErrorKind::Process,
            Self::Filesystem(sync_fs::Error::PathEscape { .. }) => ErrorKind::RepositoryState,
            Self::Filesystem(sync_fs::Error::ConfigParse { .. })
            | Self::Filesystem(sync_fs::Error::UnsupportedFormat { .. }) => ErrorKind::Config,
            Self::Filesystem(_) | Self::Json(_) => ErrorKind::Filesystem,
        }
    }

    /// Process exit status for this failure: `2` for validation, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Validation => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    fn escape() -> Error {
        Error::Filesystem(sync_fs::Error::PathEscape {
            root: PathBuf::from("/repo"),
            path: PathBuf::from("/elsewhere"),
        })
    }

    #[rstest]
    #[case(Error::Validation { errors: vec!["bad".into()] }, ErrorKind::Validation, 2)]
    #[case(Error::repository_state("dirty"), ErrorKind::RepositoryState, 1)]
    #[case(Error::config("no url"), ErrorKind::Config, 1)]
    #[case(escape(), ErrorKind::RepositoryState, 1)]
    #[case(
        Error::Process(sync_git::Error::InvalidInput { message: "x".into() }),
        ErrorKind::Process,
        1
    )]
    fn test_kind_and_exit_code(#[case] err: Error, #[case] kind: ErrorKind, #[case] code: i32) {
        assert_eq!(err.kind(), kind);
        assert_eq!(err.exit_code(), code);
    }

    #[test]
    fn test_validation_display_lists_errors() {
        let err = Error::Validation {
            errors: vec!["missing SKILL.md".into(), "bad name".into()],
        };
        assert_eq!(err.to_string(), "Validation failed: missing SKILL.md; bad name");
    }
}
