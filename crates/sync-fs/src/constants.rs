//! Well-known file and directory names.

use std::path::Path;

/// Fixed names the synchronizer looks for on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoPath {
    /// The `.git` directory (Git database)
    GitDir,
    /// The `SKILL.md` metadata file every skill folder must carry
    SkillManifest,
    /// The per-user configuration directory name (`skill-sync`)
    ConfigDir,
    /// The configuration file name inside [`RepoPath::ConfigDir`]
    ConfigFile,
}

impl RepoPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitDir => ".git",
            Self::SkillManifest => "SKILL.md",
            Self::ConfigDir => "skill-sync",
            Self::ConfigFile => "config.toml",
        }
    }
}

impl AsRef<Path> for RepoPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for RepoPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
