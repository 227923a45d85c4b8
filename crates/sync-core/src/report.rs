//! Run reports
//!
//! A [`RunReport`] is built once per run and never changed afterwards. The
//! markdown and JSON renderings both read from that single record.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::diff::DiffResult;
use crate::error::{Error, ErrorKind};
use crate::validate::ValidationReport;
use crate::{Result, SyncOperation};

/// Longest path list rendered in markdown before truncation.
pub const LIST_LIMIT: usize = 100;

/// Validation outcome as recorded in a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub passed: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl From<&ValidationReport> for ValidationSummary {
    fn from(report: &ValidationReport) -> Self {
        Self {
            passed: report.passed(),
            errors: report.errors.clone(),
            warnings: report.warnings.clone(),
        }
    }
}

/// Why a run was aborted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&Error> for RunFailure {
    fn from(error: &Error) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Immutable record of one sync run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub timestamp: DateTime<Utc>,
    pub source: PathBuf,
    pub repo_path: PathBuf,
    pub branch: String,
    pub target: PathBuf,
    pub dry_run: bool,
    /// `None` when the run aborted before an operation was resolved
    pub operation: Option<SyncOperation>,
    pub repo_created: bool,
    pub validation: ValidationSummary,
    pub changes: DiffResult,
    /// Short status of the target path only
    pub git_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RunFailure>,
}

impl RunReport {
    /// Render the human-readable summary.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let v = &self.validation;
        let c = &self.changes;
        let operation = self.operation.map_or("aborted", |op| op.as_str());

        out.push_str("# Skill Sync Report\n\n");
        let _ = writeln!(out, "- Time: `{}`", self.timestamp_text());
        let _ = writeln!(out, "- Source: `{}`", self.source.display());
        let _ = writeln!(out, "- Repository: `{}`", self.repo_path.display());
        let _ = writeln!(out, "- Branch: `{}`", self.branch);
        let _ = writeln!(out, "- Target Skill Path: `{}`", self.target.display());
        let _ = writeln!(
            out,
            "- Mode: `{}`",
            if self.dry_run { "dry-run" } else { "apply" }
        );
        let _ = writeln!(out, "- Operation: `{operation}`");

        out.push_str("\n## Validation\n");
        let _ = writeln!(out, "- Passed: `{}`", v.passed);
        let _ = writeln!(out, "- Errors: `{}`", v.errors.len());
        let _ = writeln!(out, "- Warnings: `{}`", v.warnings.len());
        if !v.errors.is_empty() {
            out.push_str("\n### Validation Errors\n");
            for item in &v.errors {
                let _ = writeln!(out, "- {item}");
            }
        }
        if !v.warnings.is_empty() {
            out.push_str("\n### Validation Warnings\n");
            for item in &v.warnings {
                let _ = writeln!(out, "- {item}");
            }
        }

        out.push_str("\n## Change Summary\n");
        let _ = writeln!(out, "- Added: `{}`", c.added.len());
        let _ = writeln!(out, "- Modified: `{}`", c.modified.len());
        let _ = writeln!(out, "- Deleted: `{}`", c.deleted.len());
        let _ = writeln!(out, "- Unchanged: `{}`", c.unchanged.len());

        for (title, paths) in [
            ("Added Files", &c.added),
            ("Modified Files", &c.modified),
            ("Deleted Files", &c.deleted),
        ] {
            let _ = write!(out, "\n### {title}\n{}\n", markdown_list(paths, LIST_LIMIT));
        }

        out.push_str("\n## Git Status (Target Path)\n```text\n");
        if self.git_status.is_empty() {
            out.push_str("(clean)");
        } else {
            out.push_str(&self.git_status);
        }
        out.push_str("\n```\n");

        if let Some(failure) = &self.error {
            out.push_str("\n## Error\n");
            let _ = writeln!(out, "- Kind: `{}`", failure.kind.as_str());
            let _ = write!(out, "\n```text\n{}\n```\n", failure.message.trim_end());
        }

        out
    }

    /// Render the structured form as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if a path cannot be represented as a string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn timestamp_text(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

/// Bullet list of code-formatted paths, `- (none)` when empty, with a
/// remainder line past `limit` entries.
pub fn markdown_list(paths: &[String], limit: usize) -> String {
    if paths.is_empty() {
        return "- (none)".to_string();
    }
    let mut lines: Vec<String> = paths
        .iter()
        .take(limit)
        .map(|p| format!("- `{p}`"))
        .collect();
    if paths.len() > limit {
        lines.push(format!("- ... ({} more)", paths.len() - limit));
    }
    lines.join("\n")
}
