//! Filesystem layer for skill-sync
//!
//! Provides normalized relative paths, streamed content hashing, the shared
//! exclusion rules, deterministic tree walking and path-annotated I/O.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod io;
pub mod path;
pub mod walk;

pub use checksum::{compute_content_checksum, compute_file_checksum};
pub use config::ConfigStore;
pub use constants::RepoPath;
pub use error::{Error, Result};
pub use filter::ExclusionRules;
pub use path::{NormalizedPath, ensure_within, expand_home, resolve};
pub use walk::walk_files;
