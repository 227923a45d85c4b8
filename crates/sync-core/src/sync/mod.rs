//! Sync pipeline
//!
//! - [`SyncOperation`]: what a run does to the target folder
//! - [`SyncExecutor`]: applies the operation
//! - [`SyncEngine`]: validate, prepare the repository, diff, apply, report

mod engine;
mod executor;
mod operation;

pub use engine::{RunOutcome, SyncEngine, SyncRequest};
pub use executor::{ApplySummary, SyncExecutor, prune_empty_dirs};
pub use operation::SyncOperation;
