//! Integration tests for the skill-sync binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use sync_test_utils::git::{bare_remote_with_commit, git};
use sync_test_utils::skill::SkillFixture;
use tempfile::{TempDir, tempdir};

/// A skill-sync command isolated from the user's config and environment.
fn sync_cmd(temp: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("skill-sync"));
    cmd.env("SKILL_SYNC_CONFIG_DIR", temp.join("config"))
        .env_remove("SKILL_SYNC_REPO")
        .env_remove("SKILL_SYNC_REPO_URL")
        .env_remove("SKILL_SYNC_BRANCH")
        .env_remove("RUST_LOG");
    cmd
}

struct Setup {
    temp: TempDir,
    remote: String,
}

impl Setup {
    fn new() -> Self {
        let temp = tempdir().unwrap();
        let remote = bare_remote_with_commit(temp.path())
            .to_str()
            .unwrap()
            .to_string();
        SkillFixture::create(&temp.path().join("work"), "demo")
            .with_file("scripts/run.sh", "echo run\n");
        Self { temp, remote }
    }

    fn source(&self) -> String {
        self.temp.path().join("work/demo").to_str().unwrap().to_string()
    }

    fn clone_path(&self) -> std::path::PathBuf {
        self.temp.path().join("clone")
    }

    fn cmd(&self) -> Command {
        let mut cmd = sync_cmd(self.temp.path());
        cmd.args(["--source", &self.source()])
            .args(["--repo", self.clone_path().to_str().unwrap()])
            .args(["--repo-url", &self.remote]);
        cmd
    }
}

#[test]
fn test_help_output() {
    let temp = tempdir().unwrap();
    sync_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--skills-subdir"))
        .stdout(predicate::str::contains("--json-report"));
}

#[test]
fn test_first_sync_adds_and_prints_report() {
    let setup = Setup::new();

    setup
        .cmd()
        .assert()
        .code(0)
        .stdout(predicate::str::contains("# Skill Sync Report"))
        .stdout(predicate::str::contains("- Operation: `add`"))
        .stdout(predicate::str::contains("?? demo/"));

    assert!(setup.clone_path().join("demo/scripts/run.sh").is_file());
}

#[test]
fn test_validation_failure_exits_two_and_writes_reports() {
    let temp = tempdir().unwrap();
    let source = SkillFixture::empty(temp.path(), "Bad_Name");
    let md = temp.path().join("out/report.md");
    let json = temp.path().join("out/report.json");

    sync_cmd(temp.path())
        .args(["--source", source.path().to_str().unwrap()])
        .args(["--repo", temp.path().join("clone").to_str().unwrap()])
        .args(["--repo-url", "https://example.com/unused.git"])
        .args(["--report", md.to_str().unwrap()])
        .args(["--json-report", json.to_str().unwrap()])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("### Validation Errors"));

    assert!(fs::read_to_string(&md).unwrap().contains("`validation-failed`"));
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(report["operation"], "validation-failed");
    assert_eq!(report["validation"]["passed"], false);
    assert_eq!(report["error"]["kind"], "validation");
    assert!(!temp.path().join("clone").exists());
}

#[test]
fn test_dry_run_leaves_clone_untouched() {
    let setup = Setup::new();

    setup
        .cmd()
        .arg("--dry-run")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("- Mode: `dry-run`"))
        .stdout(predicate::str::contains("- Operation: `add`"));

    assert!(setup.clone_path().join(".git").exists());
    assert!(!setup.clone_path().join("demo").exists());
}

#[test]
fn test_unchanged_second_run_after_commit() {
    let setup = Setup::new();
    setup.cmd().assert().code(0);
    let clone = setup.clone_path();
    sync_test_utils::git::configure_identity(&clone);
    git(&clone, &["add", "."]);
    git(&clone, &["commit", "-m", "Publish demo"]);

    setup
        .cmd()
        .arg("--skip-pull")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("- Operation: `no-change`"))
        .stdout(predicate::str::contains("(clean)"));
}

#[test]
fn test_uncommitted_previous_sync_blocks_next_run() {
    let setup = Setup::new();
    setup.cmd().assert().code(0);

    setup
        .cmd()
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("uncommitted changes"));
}

#[test]
fn test_foreign_directory_exits_one() {
    let setup = Setup::new();
    fs::create_dir_all(setup.clone_path()).unwrap();
    fs::write(setup.clone_path().join("notes.txt"), "mine").unwrap();

    setup
        .cmd()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a git repo"));

    assert!(!setup.clone_path().join(".git").exists());
}

#[test]
fn test_missing_repo_url_exits_one() {
    let temp = tempdir().unwrap();
    let source = SkillFixture::create(temp.path(), "demo");

    sync_cmd(temp.path())
        .args(["--source", source.path().to_str().unwrap()])
        .args(["--repo", temp.path().join("clone").to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No repository URL configured"));
}

#[test]
fn test_repo_url_from_global_config() {
    let setup = Setup::new();
    let config_dir = setup.temp.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        format!("repo_url = {:?}\nskills_subdir = \"skills\"\n", setup.remote),
    )
    .unwrap();

    sync_cmd(setup.temp.path())
        .args(["--source", &setup.source()])
        .args(["--repo", setup.clone_path().to_str().unwrap()])
        .assert()
        .code(0);

    assert!(setup.clone_path().join("skills/demo/SKILL.md").is_file());
}

#[test]
fn test_same_report_paths_are_rejected() {
    let temp = tempdir().unwrap();
    let out = temp.path().join("report.txt");

    sync_cmd(temp.path())
        .args(["--source", "demo"])
        .args(["--report", out.to_str().unwrap()])
        .args(["--json-report", out.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must point at different files"));
}

#[test]
fn test_malformed_global_config_still_writes_reports() {
    let temp = tempdir().unwrap();
    let source = SkillFixture::create(temp.path(), "demo");
    let config_dir = temp.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "repo_url = [unterminated\n").unwrap();
    let md = temp.path().join("out/report.md");
    let json = temp.path().join("out/report.json");

    sync_cmd(temp.path())
        .args(["--source", source.path().to_str().unwrap()])
        .args(["--repo", temp.path().join("clone").to_str().unwrap()])
        .args(["--report", md.to_str().unwrap()])
        .args(["--json-report", json.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("# Skill Sync Report"))
        .stderr(predicate::str::contains("config.toml"));

    assert!(fs::read_to_string(&md).unwrap().contains("## Error"));
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(report["error"]["kind"], "config");
    assert_eq!(report["operation"], serde_json::Value::Null);
    assert!(!temp.path().join("clone").exists());
}
