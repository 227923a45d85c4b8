use assert_fs::prelude::*;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use sync_fs::{ConfigStore, Error};

#[derive(Debug, Deserialize, PartialEq)]
struct Sample {
    repo_url: String,
    branch: String,
}

fn expected() -> Sample {
    Sample {
        repo_url: "git@example.com:org/skills.git".to_string(),
        branch: "main".to_string(),
    }
}

#[test]
fn test_load_toml() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("config.toml");
    file.write_str("repo_url = \"git@example.com:org/skills.git\"\nbranch = \"main\"\n")
        .unwrap();

    let loaded: Sample = ConfigStore::new().load(file.path()).unwrap();
    assert_eq!(loaded, expected());
}

#[test]
fn test_load_json() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("config.json");
    file.write_str(r#"{"repo_url": "git@example.com:org/skills.git", "branch": "main"}"#)
        .unwrap();

    let loaded: Sample = ConfigStore::new().load(file.path()).unwrap();
    assert_eq!(loaded, expected());
}

#[test]
fn test_load_yaml() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("config.yml");
    file.write_str("repo_url: git@example.com:org/skills.git\nbranch: main\n")
        .unwrap();

    let loaded: Sample = ConfigStore::new().load(file.path()).unwrap();
    assert_eq!(loaded, expected());
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("config.toml");
    file.write_str("repo_url = [unterminated").unwrap();

    let err = ConfigStore::new().load::<Sample>(file.path()).unwrap_err();
    match err {
        Error::ConfigParse { format, .. } => assert_eq!(format, "TOML"),
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn test_unknown_extension() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("config.ini");
    file.write_str("x=1").unwrap();

    let err = ConfigStore::new().load::<Sample>(file.path()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { .. }));
}
