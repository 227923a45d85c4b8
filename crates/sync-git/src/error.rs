//! Error types for sync-git

/// Result type for sync-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sync-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited non-zero; `output` carries what git printed.
    #[error("Command failed: {command}\n{output}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}
