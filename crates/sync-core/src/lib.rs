//! Core orchestration layer for skill-sync
//!
//! Publishes one local skill folder into a managed git repository:
//!
//! - **Validation**: the folder and its `SKILL.md` front matter are checked first
//! - **Repository management**: clone, remote check, clean check, checkout, pull
//! - **Manifests and diff**: content-addressed snapshots of source and target
//! - **Sync execution**: add, update or leave alone, with an optional dry run
//! - **Reports**: one record per run, rendered as markdown and JSON
//!
//! # Architecture
//!
//! ```text
//!          sync-cli
//!             |
//!         sync-core
//!             |
//!      +------+------+
//!      |             |
//!   sync-fs      sync-git
//! ```
//!
//! # Example
//!
//! ```no_run
//! use sync_core::{ConfigLayer, ConfigResolver, SyncEngine, SyncRequest};
//! use sync_git::GitCli;
//!
//! let config = ConfigResolver::new().resolve(ConfigLayer {
//!     repo_url: Some("git@example.com:org/skills.git".into()),
//!     ..ConfigLayer::default()
//! })?;
//! let engine = SyncEngine::new(GitCli::new(), config);
//! let outcome = engine.run(&SyncRequest {
//!     source: "./my-skill".into(),
//!     ..SyncRequest::default()
//! });
//! print!("{}", outcome.report.to_markdown());
//! # Ok::<(), sync_core::Error>(())
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod manifest;
pub mod report;
pub mod repository;
pub mod sync;
pub mod validate;

pub use config::{ConfigLayer, ConfigResolver, ExclusionConfig, SyncConfig};
pub use diff::{DiffResult, compare};
pub use error::{Error, ErrorKind, Result};
pub use manifest::Manifest;
pub use report::{RunFailure, RunReport, ValidationSummary};
pub use repository::{EnsureOutcome, RepositoryManager, RepositorySpec};
pub use sync::{ApplySummary, RunOutcome, SyncEngine, SyncExecutor, SyncOperation, SyncRequest};
pub use validate::{ValidationReport, validate_skill_folder};
