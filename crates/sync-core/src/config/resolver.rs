//! Configuration resolution with layered merge
//!
//! Layers, later overriding earlier:
//! 1. built-in defaults
//! 2. the global file (`<config_dir>/skill-sync/config.toml`)
//! 3. an explicit config file (TOML, JSON or YAML)
//! 4. command-line overrides

use std::path::{Path, PathBuf};

use sync_fs::{ConfigStore, RepoPath, expand_home, resolve};

use super::{ConfigLayer, SyncConfig};
use crate::{Error, Result};

/// Environment variable that relocates the global config directory.
pub const GLOBAL_CONFIG_DIR_ENV: &str = "SKILL_SYNC_CONFIG_DIR";

/// Resolves a [`SyncConfig`] from the configured sources.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    /// Override for the global config directory (used for testing).
    /// When `None`, `dirs::config_dir()` is used.
    global_config_dir_override: Option<PathBuf>,
    /// File given with `--config`
    explicit_file: Option<PathBuf>,
    store: ConfigStore,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `dir` instead of the platform config directory.
    pub fn with_global_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.global_config_dir_override = Some(dir.into());
        self
    }

    /// Add an explicit config file layer. The file must exist.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.global_config_dir_override {
            return Some(dir.clone());
        }
        dirs::config_dir().map(|d| d.join(RepoPath::ConfigDir))
    }

    /// Path of the global config file, if a config directory is known.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.global_config_dir()
            .map(|dir| dir.join(RepoPath::ConfigFile))
    }

    /// Merge every layer and normalize the paths.
    ///
    /// A missing global file is skipped. A missing explicit file, or any file
    /// that fails to parse, is an error.
    pub fn resolve(&self, overrides: ConfigLayer) -> Result<SyncConfig> {
        let mut config = SyncConfig::default();

        if let Some(path) = self.global_config_path()
            && path.is_file()
        {
            config.apply(self.load(&path)?);
        }

        if let Some(path) = &self.explicit_file {
            let path = expand_home(path);
            if !path.is_file() {
                return Err(Error::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            config.apply(self.load(&path)?);
        }

        config.apply(overrides);

        config.repo_path = resolve(&config.repo_path)?;
        if config.repo_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            config.repo_url = None;
        }
        if config.branch.trim().is_empty() {
            return Err(Error::config("Branch name cannot be empty"));
        }

        tracing::debug!(
            repo = %config.repo_path.display(),
            branch = %config.branch,
            "Resolved configuration"
        );
        Ok(config)
    }

    fn load(&self, path: &Path) -> Result<ConfigLayer> {
        tracing::debug!(path = %path.display(), "Loading config layer");
        Ok(self.store.load(path)?)
    }
}
