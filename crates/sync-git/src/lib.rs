//! Version-control layer for skill-sync
//!
//! The rest of the workspace talks to git only through the [`VersionControl`]
//! capability trait. [`GitCli`] implements it by shelling out to `git`;
//! read-only lookups that need no subprocess go through libgit2 in
//! [`inspect`].

pub mod cli;
pub mod error;
pub mod inspect;
pub mod provider;

pub use cli::GitCli;
pub use error::{Error, Result};
pub use inspect::{configured_remote_url, has_repository_metadata};
pub use provider::{DEFAULT_REMOTE, VersionControl};
