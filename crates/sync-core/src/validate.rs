//! Skill folder validation
//!
//! Checks run in a fixed order and stop at the first failing class: the
//! source must be a directory, the intended name must be well-formed, the
//! `SKILL.md` manifest must exist, carry a delimited front-matter block, and
//! declare a non-empty `name` and `description`. Problems are collected as
//! messages, never raised.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sync_fs::RepoPath;

/// Bare line that opens and closes the front-matter block.
pub const FRONT_MATTER_DELIMITER: &str = "---";

static SKILL_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]{0,63}$").unwrap());

static FIELD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(name|description):(.*)$").unwrap());

/// Outcome of validating one skill folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// True when no errors were recorded. Warnings never fail validation.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
}

/// Fields extracted from a front-matter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Structural problems with the front-matter block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontMatterError {
    #[error("SKILL.md frontmatter is missing (expected leading '---').")]
    Missing,
    #[error("SKILL.md frontmatter is not closed (missing second '---').")]
    Unclosed,
}

/// Whether `name` is usable as a skill folder name.
pub fn is_valid_skill_name(name: &str) -> bool {
    SKILL_NAME_PATTERN.is_match(name)
}

/// The name a skill is published under: a non-blank override, or the last
/// component of the source path.
pub fn resolve_skill_name(source: &Path, override_name: Option<&str>) -> String {
    match override_name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

/// Parse the front-matter block at the top of `text`.
///
/// Leading blank lines are skipped; the first remaining line must be the
/// delimiter and a later line must close the block.
pub fn parse_front_matter(text: &str) -> Result<FrontMatter, FrontMatterError> {
    let mut lines = text.lines().skip_while(|line| line.trim().is_empty());
    if lines.next().map(str::trim) != Some(FRONT_MATTER_DELIMITER) {
        return Err(FrontMatterError::Missing);
    }

    let mut front_matter = FrontMatter::default();
    for line in lines {
        if line.trim() == FRONT_MATTER_DELIMITER {
            return Ok(front_matter);
        }
        let Some(captures) = FIELD_PATTERN.captures(line) else {
            continue;
        };
        let value = clean_value(&captures[2]);
        let slot = match &captures[1] {
            "name" => &mut front_matter.name,
            _ => &mut front_matter.description,
        };
        if slot.is_none() && !value.is_empty() {
            *slot = Some(value);
        }
    }

    Err(FrontMatterError::Unclosed)
}

fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_matches('\'')
        .trim_matches('"')
        .trim()
        .to_string()
}

/// Validate `source` as a skill folder to be published as `name`.
pub fn validate_skill_folder(source: &Path, name: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !source.exists() {
        report.error(format!("Source directory does not exist: {}", source.display()));
        return report;
    }
    if !source.is_dir() {
        report.error(format!("Source path is not a directory: {}", source.display()));
        return report;
    }

    if !is_valid_skill_name(name) {
        report.error(format!(
            "Folder name must match ^[a-z0-9][a-z0-9-]{{0,63}}$ (current: {name:?})."
        ));
    }

    let manifest = source.join(RepoPath::SkillManifest);
    if !manifest.is_file() {
        report.error(format!(
            "{} is required but missing in {}",
            RepoPath::SkillManifest,
            source.display()
        ));
        return report;
    }

    let text = match fs::read_to_string(&manifest) {
        Ok(text) => text,
        Err(e) => {
            report.error(format!("{} could not be read: {e}", RepoPath::SkillManifest));
            return report;
        }
    };

    let front_matter = match parse_front_matter(&text) {
        Ok(front_matter) => front_matter,
        Err(e) => {
            report.error(e.to_string());
            return report;
        }
    };

    if front_matter.name.is_none() {
        report.error("SKILL.md frontmatter must contain a non-empty name field.");
    }
    if front_matter.description.is_none() {
        report.error("SKILL.md frontmatter must contain a non-empty description field.");
    }

    if let Some(declared) = &front_matter.name
        && declared != name
    {
        let warning = format!(
            "SKILL.md name does not match folder name: name={declared:?}, folder={name:?}."
        );
        tracing::warn!("{warning}");
        report.warnings.push(warning);
    }

    report
}
