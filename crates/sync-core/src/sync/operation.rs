//! The operation a run resolves to

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diff::DiffResult;

/// What a sync does to the target folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncOperation {
    /// Target absent: copy the whole source tree
    Add,
    /// Target present and different: copy, delete, prune
    Update,
    /// Target present and identical: nothing to do
    NoChange,
    /// The validation gate failed before any repository work
    ValidationFailed,
}

impl SyncOperation {
    /// Decide the operation from target existence and the computed diff.
    pub fn resolve(target_exists: bool, diff: &DiffResult) -> Self {
        if !target_exists {
            Self::Add
        } else if diff.has_changes() {
            Self::Update
        } else {
            Self::NoChange
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::NoChange => "no-change",
            Self::ValidationFailed => "validation-failed",
        }
    }
}

impl fmt::Display for SyncOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
