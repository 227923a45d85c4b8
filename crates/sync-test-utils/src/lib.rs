//! Shared test utilities for the skill-sync workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures at three realism levels, plus bare remotes
//! - [`skill`]: [`skill::SkillFixture`] builder for source skill folders
//! - [`fake`]: [`fake::FakeVcs`], a recording `VersionControl` implementation

pub mod fake;
pub mod git;
pub mod skill;
