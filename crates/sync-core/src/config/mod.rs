//! Configuration for skill-sync
//!
//! - [`SyncConfig`]: the effective settings handed to the engine
//! - [`ConfigLayer`]: one partial source (a file, or command-line overrides)
//! - [`ConfigResolver`]: merges the layers in order

mod resolver;

pub use resolver::{ConfigResolver, GLOBAL_CONFIG_DIR_ENV};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sync_fs::ExclusionRules;

/// Clone location used when nothing else is configured.
pub const DEFAULT_REPO_PATH: &str = "~/.codex/repos/skills";

/// Branch used when nothing else is configured.
pub const DEFAULT_BRANCH: &str = "main";

/// Extra names excluded on top of the built-in rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExclusionConfig {
    /// Directory names skipped at any depth
    pub dirs: Vec<String>,
    /// Exact file names skipped
    pub files: Vec<String>,
    /// File extensions skipped, with or without the leading dot
    pub extensions: Vec<String>,
}

impl ExclusionConfig {
    /// Built-in rules extended with these extras.
    pub fn rules(&self) -> ExclusionRules {
        ExclusionRules::default().extend(
            self.dirs.iter().cloned(),
            self.files.iter().cloned(),
            self.extensions.iter().cloned(),
        )
    }

    fn merge(&mut self, other: ExclusionConfig) {
        self.dirs.extend(other.dirs);
        self.files.extend(other.files);
        self.extensions.extend(other.extensions);
    }
}

/// One partial configuration source. Unset fields leave earlier values alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub repo_url: Option<String>,
    pub repo_path: Option<PathBuf>,
    pub branch: Option<String>,
    pub skills_subdir: Option<PathBuf>,
    pub pull: Option<bool>,
    pub exclude: ExclusionConfig,
}

/// Effective configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncConfig {
    /// Expected remote URL of the managed repository. Required to run.
    pub repo_url: Option<String>,
    /// Local clone path
    pub repo_path: PathBuf,
    pub branch: String,
    /// Sub-directory of the repository holding skill folders
    pub skills_subdir: PathBuf,
    /// Fetch and fast-forward before syncing
    pub pull: bool,
    pub exclude: ExclusionConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            repo_url: None,
            repo_path: PathBuf::from(DEFAULT_REPO_PATH),
            branch: DEFAULT_BRANCH.to_string(),
            skills_subdir: PathBuf::from("."),
            pull: true,
            exclude: ExclusionConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Overlay `layer` on top of the current values.
    pub fn apply(&mut self, layer: ConfigLayer) {
        if let Some(url) = layer.repo_url {
            self.repo_url = Some(url);
        }
        if let Some(path) = layer.repo_path {
            self.repo_path = path;
        }
        if let Some(branch) = layer.branch {
            self.branch = branch;
        }
        if let Some(subdir) = layer.skills_subdir {
            self.skills_subdir = subdir;
        }
        if let Some(pull) = layer.pull {
            self.pull = pull;
        }
        self.exclude.merge(layer.exclude);
    }
}
