//! End-to-end sync scenarios against real git repositories
//!
//! Each test publishes a skill folder through `SyncEngine` with the real
//! `GitCli`, using a local bare repository as the remote.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use sync_core::{
    ErrorKind, Manifest, RunOutcome, SyncConfig, SyncEngine, SyncOperation, SyncRequest,
};
use sync_fs::ExclusionRules;
use sync_git::GitCli;
use sync_test_utils::git::{
    bare_remote_with_commit, clone_with_identity, configure_identity, git, push_upstream_change,
};
use sync_test_utils::skill::SkillFixture;
use tempfile::TempDir;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// A bare remote, a local clone path and one source skill folder.
struct Workspace {
    temp: TempDir,
    remote: PathBuf,
    skill: SkillFixture,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let remote = bare_remote_with_commit(temp.path());
        let skill = SkillFixture::create(&temp.path().join("work"), "pdf-tools")
            .with_file("scripts/extract.py", "print('extract')\n")
            .with_file("references/formats.md", "# Formats\n");
        Self {
            temp,
            remote,
            skill,
        }
    }

    fn clone_path(&self) -> PathBuf {
        self.temp.path().join("repos/skills")
    }

    fn target(&self) -> PathBuf {
        self.clone_path().join("pdf-tools")
    }

    fn config(&self) -> SyncConfig {
        SyncConfig {
            repo_url: Some(self.remote.to_str().unwrap().to_string()),
            repo_path: self.clone_path(),
            ..SyncConfig::default()
        }
    }

    fn run(&self) -> RunOutcome {
        self.run_with(self.config(), false)
    }

    fn run_with(&self, config: SyncConfig, dry_run: bool) -> RunOutcome {
        SyncEngine::new(GitCli::new(), config).run(&SyncRequest {
            source: self.skill.path().to_path_buf(),
            skill_name: None,
            dry_run,
        })
    }

    /// Commit whatever the last sync wrote, as an operator would.
    fn commit_all(&self, message: &str) {
        let clone = self.clone_path();
        configure_identity(&clone);
        git(&clone, &["add", "-A"]);
        git(&clone, &["commit", "-m", message]);
    }
}

fn manifest(root: &Path) -> Manifest {
    Manifest::build(root, &ExclusionRules::default()).unwrap()
}

fn assert_success(outcome: &RunOutcome) {
    assert!(
        outcome.is_success(),
        "run failed: {:?}\n{}",
        outcome.error,
        outcome.report.to_markdown()
    );
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn scenario_add_into_fresh_clone() {
    let ws = Workspace::new();

    let outcome = ws.run();

    assert_success(&outcome);
    assert!(outcome.report.repo_created);
    assert_eq!(outcome.report.operation, Some(SyncOperation::Add));
    assert_eq!(manifest(&ws.target()), manifest(ws.skill.path()));
    assert_eq!(manifest(&ws.target()).len(), 3);
    assert_eq!(outcome.report.git_status, "?? pdf-tools/");
}

#[test]
fn scenario_update_modified_file() {
    let ws = Workspace::new();
    assert_success(&ws.run());
    ws.commit_all("Publish pdf-tools");
    ws.skill.write("scripts/extract.py", "print('extract v2')\n");

    let outcome = ws.run_with(
        SyncConfig {
            pull: false,
            ..ws.config()
        },
        false,
    );

    assert_success(&outcome);
    assert_eq!(outcome.report.operation, Some(SyncOperation::Update));
    assert_eq!(outcome.report.changes.modified, vec!["scripts/extract.py"]);
    assert!(outcome.report.changes.added.is_empty());
    assert!(outcome.report.changes.deleted.is_empty());
    assert_eq!(manifest(&ws.target()), manifest(ws.skill.path()));
    assert_eq!(outcome.report.git_status, "M pdf-tools/scripts/extract.py");
}

#[test]
fn scenario_delete_removed_file_and_prune() {
    let ws = Workspace::new();
    assert_success(&ws.run());
    ws.commit_all("Publish pdf-tools");
    ws.skill.remove("references/formats.md");
    fs::remove_dir(ws.skill.path().join("references")).unwrap();

    let outcome = ws.run_with(
        SyncConfig {
            pull: false,
            ..ws.config()
        },
        false,
    );

    assert_success(&outcome);
    assert_eq!(outcome.report.operation, Some(SyncOperation::Update));
    assert_eq!(outcome.report.changes.deleted, vec!["references/formats.md"]);
    assert!(!ws.target().join("references").exists());
    assert_eq!(manifest(&ws.target()), manifest(ws.skill.path()));
}

#[test]
fn scenario_foreign_directory_is_never_cloned_into() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.clone_path()).unwrap();
    fs::write(ws.clone_path().join("diary.txt"), "private").unwrap();

    let outcome = ws.run();

    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(
        outcome.report.error.as_ref().map(|e| e.kind),
        Some(ErrorKind::RepositoryState)
    );
    assert!(!ws.clone_path().join(".git").exists());
    assert_eq!(
        fs::read_to_string(ws.clone_path().join("diary.txt")).unwrap(),
        "private"
    );
}

#[test]
fn resync_after_commit_is_no_change() {
    let ws = Workspace::new();
    assert_success(&ws.run());
    ws.commit_all("Publish pdf-tools");

    let outcome = ws.run_with(
        SyncConfig {
            pull: false,
            ..ws.config()
        },
        false,
    );

    assert_success(&outcome);
    assert_eq!(outcome.report.operation, Some(SyncOperation::NoChange));
    assert!(!outcome.report.changes.has_changes());
    assert_eq!(outcome.report.git_status, "");
}

#[test]
fn pull_brings_in_upstream_commits_first() {
    let ws = Workspace::new();
    assert_success(&ws.run_with(ws.config(), true));
    push_upstream_change(&ws.remote, "other-skill/SKILL.md", "upstream\n");

    let outcome = ws.run();

    assert_success(&outcome);
    assert!(ws.clone_path().join("other-skill/SKILL.md").is_file());
    assert_eq!(outcome.report.git_status, "?? pdf-tools/");
}

#[test]
fn diverged_history_is_a_process_error() {
    let ws = Workspace::new();
    assert_success(&ws.run());
    ws.commit_all("Local publish");
    push_upstream_change(&ws.remote, "CHANGELOG.md", "upstream\n");
    ws.skill.write("SKILL.md", &sync_test_utils::skill::skill_markdown("pdf-tools", "v2"));

    let outcome = ws.run();

    assert_eq!(
        outcome.report.error.as_ref().map(|e| e.kind),
        Some(ErrorKind::Process)
    );
    assert_eq!(outcome.report.operation, None);
    let content = fs::read_to_string(ws.target().join("SKILL.md")).unwrap();
    assert!(!content.contains("v2"));
}

#[test]
fn remote_mismatch_is_refused() {
    let ws = Workspace::new();
    let other = ws.temp.path().join("other-clone");
    clone_with_identity(&ws.remote, &other);

    let outcome = ws.run_with(
        SyncConfig {
            repo_path: other.clone(),
            repo_url: Some("https://example.com/elsewhere.git".into()),
            ..ws.config()
        },
        false,
    );

    assert_eq!(outcome.exit_code(), 1);
    let message = &outcome.report.error.as_ref().unwrap().message;
    assert!(message.contains("remote mismatch"), "{message}");
    assert!(!other.join("pdf-tools").exists());
}

#[test]
fn dirty_tree_is_refused() {
    let ws = Workspace::new();
    assert_success(&ws.run());

    // The first sync left untracked files behind.
    let outcome = ws.run();

    assert_eq!(
        outcome.report.error.as_ref().map(|e| e.kind),
        Some(ErrorKind::RepositoryState)
    );
    assert!(outcome.report.to_markdown().contains("uncommitted changes"));
}

#[test]
fn dry_run_against_real_repository() {
    let ws = Workspace::new();

    let outcome = ws.run_with(ws.config(), true);

    assert_success(&outcome);
    assert!(outcome.report.dry_run);
    assert_eq!(outcome.report.operation, Some(SyncOperation::Add));
    assert_eq!(outcome.report.changes.added.len(), 3);
    assert!(!ws.target().exists());
    assert_eq!(outcome.report.git_status, "");
}
