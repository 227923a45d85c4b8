//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use sync_core::ConfigLayer;

/// skill-sync - Validate one skill folder and publish it into a skills git repository
#[derive(Parser, Debug)]
#[command(name = "skill-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Local skill folder to sync
    #[arg(long)]
    pub source: PathBuf,

    /// Local clone of the skills repository [default: ~/.codex/repos/skills]
    #[arg(long, env = "SKILL_SYNC_REPO")]
    pub repo: Option<PathBuf>,

    /// Expected remote URL, used when cloning
    #[arg(long, env = "SKILL_SYNC_REPO_URL")]
    pub repo_url: Option<String>,

    /// Branch to check out and pull [default: main]
    #[arg(long, env = "SKILL_SYNC_BRANCH")]
    pub branch: Option<String>,

    /// Folder name inside the repository [default: source folder name]
    #[arg(long)]
    pub skill_name: Option<String>,

    /// Repository sub-directory holding skills [default: .]
    #[arg(long)]
    pub skills_subdir: Option<PathBuf>,

    /// Only validate and compare; do not copy files
    #[arg(long)]
    pub dry_run: bool,

    /// Skip git fetch/pull before syncing
    #[arg(long)]
    pub skip_pull: bool,

    /// Also write the markdown report to this file
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Write the JSON report to this file
    #[arg(long, value_name = "PATH")]
    pub json_report: Option<PathBuf>,

    /// Extra configuration file (TOML, JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the global config.toml
    #[arg(long, value_name = "DIR", env = sync_core::config::GLOBAL_CONFIG_DIR_ENV, hide = true)]
    pub config_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Settings given on the command line, as the top configuration layer.
    pub fn overrides(&self) -> ConfigLayer {
        ConfigLayer {
            repo_url: self.repo_url.clone(),
            repo_path: self.repo.clone(),
            branch: self.branch.clone(),
            skills_subdir: self.skills_subdir.clone(),
            pull: self.skip_pull.then_some(false),
            ..ConfigLayer::default()
        }
    }
}
