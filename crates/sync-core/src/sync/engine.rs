//! SyncEngine implementation
//!
//! One run is strictly sequential: validate, ensure the repository, build
//! both manifests, diff, resolve the operation, apply it (unless dry-run),
//! read the scoped status and assemble the report. The first failure stops
//! the run; whatever was gathered up to that point still lands in the
//! report.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use sync_fs::{ExclusionRules, ensure_within, resolve};
use sync_git::VersionControl;

use crate::config::SyncConfig;
use crate::diff::compare;
use crate::manifest::Manifest;
use crate::report::{RunFailure, RunReport, ValidationSummary};
use crate::repository::{RepositoryManager, RepositorySpec};
use crate::validate::{resolve_skill_name, validate_skill_folder};
use crate::{Error, Result};

use super::executor::SyncExecutor;
use super::operation::SyncOperation;

/// One skill folder to publish.
#[derive(Debug, Clone, Default)]
pub struct SyncRequest {
    /// Local skill folder
    pub source: PathBuf,
    /// Name override; defaults to the source folder name
    pub skill_name: Option<String>,
    /// Compute and report, but do not touch the target
    pub dry_run: bool,
}

/// The report of a run plus the error that ended it, if any.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: RunReport,
    pub error: Option<Error>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// `0` on success (including no-change), otherwise the error's code.
    pub fn exit_code(&self) -> i32 {
        self.error.as_ref().map_or(0, Error::exit_code)
    }

    /// A run that stopped before the pipeline started, e.g. on unusable
    /// configuration. `config` only fills in the report header.
    pub fn aborted(request: &SyncRequest, config: &SyncConfig, error: Error) -> Self {
        let mut report = initial_report(config, request);
        report.error = Some(RunFailure::from(&error));
        Self {
            report,
            error: Some(error),
        }
    }
}

fn initial_report(config: &SyncConfig, request: &SyncRequest) -> RunReport {
    let skill_name = resolve_skill_name(&request.source, request.skill_name.as_deref());
    RunReport {
        timestamp: Utc::now(),
        source: request.source.clone(),
        repo_path: config.repo_path.clone(),
        branch: config.branch.clone(),
        target: config.repo_path.join(&config.skills_subdir).join(skill_name),
        dry_run: request.dry_run,
        operation: None,
        repo_created: false,
        validation: ValidationSummary::default(),
        changes: Default::default(),
        git_status: String::new(),
        error: None,
    }
}

/// Runs the publish pipeline against one managed repository.
pub struct SyncEngine<V> {
    manager: RepositoryManager<V>,
    config: SyncConfig,
    rules: ExclusionRules,
}

impl<V: VersionControl> SyncEngine<V> {
    pub fn new(vcs: V, config: SyncConfig) -> Self {
        let rules = config.exclude.rules();
        Self {
            manager: RepositoryManager::new(vcs),
            config,
            rules,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn manager(&self) -> &RepositoryManager<V> {
        &self.manager
    }

    /// Execute one run. Never panics on operational failure; the error is
    /// returned alongside the report.
    pub fn run(&self, request: &SyncRequest) -> RunOutcome {
        let mut report = initial_report(&self.config, request);

        let error = match self.execute(request, &mut report) {
            Ok(()) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Sync run aborted");
                report.error = Some(RunFailure::from(&e));
                Some(e)
            }
        };
        report.timestamp = Utc::now();

        RunOutcome { report, error }
    }

    fn execute(&self, request: &SyncRequest, report: &mut RunReport) -> Result<()> {
        let source = resolve(&request.source)?;
        let repo_path = resolve(&self.config.repo_path)?;
        let skill_name = resolve_skill_name(&source, request.skill_name.as_deref());
        let destination_root = repo_path.join(&self.config.skills_subdir);
        report.source = source.clone();
        report.repo_path = repo_path.clone();
        report.target = resolve(&destination_root.join(&skill_name))?;

        tracing::debug!(source = %source.display(), skill = %skill_name, "Validating");
        let validation = validate_skill_folder(&source, &skill_name);
        report.validation = ValidationSummary::from(&validation);
        if !validation.passed() {
            report.operation = Some(SyncOperation::ValidationFailed);
            return Err(Error::Validation {
                errors: validation.errors,
            });
        }

        let url = self.config.repo_url.clone().ok_or_else(|| {
            Error::config("No repository URL configured (set --repo-url or repo_url)")
        })?;
        let spec = RepositorySpec {
            path: repo_path.clone(),
            url,
            branch: self.config.branch.clone(),
        };
        let ensured = self.manager.ensure(&spec, self.config.pull)?;
        report.repo_created = ensured.created;

        let target = ensure_within(&repo_path, &destination_root.join(&skill_name))
            .map_err(into_repository_state)?;
        report.target = target.clone();

        if !request.dry_run && !destination_root.exists() {
            fs::create_dir_all(&destination_root)
                .map_err(|e| sync_fs::Error::io(&destination_root, e))?;
        }

        let target_exists = target.exists();
        let source_manifest = Manifest::build(&source, &self.rules)?;
        let target_manifest = Manifest::build(&target, &self.rules)?;
        let diff = compare(&source_manifest, &target_manifest);
        let operation = SyncOperation::resolve(target_exists, &diff);
        tracing::debug!(
            %operation,
            added = diff.added.len(),
            modified = diff.modified.len(),
            deleted = diff.deleted.len(),
            "Resolved operation"
        );
        report.operation = Some(operation);
        report.changes = diff;

        if request.dry_run {
            tracing::debug!("Dry run, skipping apply");
        } else {
            SyncExecutor::new(&self.rules).apply(operation, &source, &target, &report.changes)?;
        }

        let pathspec = scoped_pathspec(&self.config.skills_subdir, &skill_name);
        report.git_status = self.manager.scoped_status(&repo_path, &pathspec)?;

        Ok(())
    }
}

fn into_repository_state(error: sync_fs::Error) -> Error {
    match error {
        sync_fs::Error::PathEscape { .. } => Error::repository_state(error.to_string()),
        other => other.into(),
    }
}

/// Path of the target relative to the repository root, as given to git.
pub(crate) fn scoped_pathspec(skills_subdir: &Path, skill_name: &str) -> String {
    let subdir = sync_fs::NormalizedPath::new(skills_subdir);
    if subdir.as_str().is_empty() {
        skill_name.to_string()
    } else {
        subdir.join(skill_name).as_str().to_string()
    }
}
