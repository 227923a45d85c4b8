//! Path handling: normalized relative paths, home expansion and containment

use std::path::{Component, Path, PathBuf};

use crate::{Error, RepoPath, Result};

/// A path normalized to use forward slashes internally.
///
/// Manifest keys and diff entries are `NormalizedPath` strings, so the same
/// tree produces the same keys on every platform. Conversion back to the
/// platform-native format only happens at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes and drops `.` segments and
    /// repeated separators.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy().replace('\\', "/");
        let absolute = path_str.starts_with('/');
        let segments: Vec<&str> = path_str
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        let joined = segments.join("/");
        let inner = if absolute { format!("/{joined}") } else { joined };
        Self { inner }
    }

    /// Express `path` relative to `root`.
    ///
    /// Returns `None` when `path` is not below `root`.
    pub fn relative_to(path: &Path, root: &Path) -> Option<Self> {
        path.strip_prefix(root).ok().map(Self::new)
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        let mut native = if self.inner.starts_with('/') {
            PathBuf::from("/")
        } else {
            PathBuf::new()
        };
        native.extend(self.components());
        native
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        if self.inner.is_empty() {
            return Self::new(segment);
        }
        Self::new(format!("{}/{}", self.inner, segment))
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let idx = self.inner.rfind('/')?;
        Some(Self {
            inner: self.inner[..idx].to_string(),
        })
    }

    /// Iterate over the `/`-separated segments.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/').filter(|s| !s.is_empty())
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.components().last()
    }

    /// Get the extension if present.
    ///
    /// Dot-files such as `.DS_Store` have no extension.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Whether this is a relative path that stays below its base.
    ///
    /// Rejects absolute paths, empty paths, drive prefixes and any `..`
    /// segment. Other characters, `:` included, are ordinary file name bytes.
    pub fn is_confined(&self) -> bool {
        !self.inner.is_empty()
            && !self.inner.starts_with('/')
            && self.components().all(|c| c != "..")
            && !Path::new(&self.inner)
                .components()
                .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

/// Expand a leading `~` to the current user's home directory.
///
/// Paths without a leading `~` component, and all paths when no home
/// directory can be determined, are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => {
                let rest = components.as_path();
                if rest.as_os_str().is_empty() {
                    home
                } else {
                    home.join(rest)
                }
            }
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Remove `.` and `..` segments without touching the filesystem.
pub fn lexical_clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push(component);
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// Turn user input into an absolute, clean path.
///
/// Expands `~`, anchors relative paths at the current directory and removes
/// `.`/`..` segments. Existing paths are canonicalized so symlinked prefixes
/// resolve the same way on every run.
///
/// # Errors
///
/// Returns [`Error::Io`] if the current directory cannot be determined or an
/// existing path cannot be canonicalized.
pub fn resolve(path: &Path) -> Result<PathBuf> {
    let expanded = expand_home(path);
    let absolute = std::path::absolute(&expanded).map_err(|e| Error::io(&expanded, e))?;
    resolve_existing_prefix(&lexical_clean(&absolute))
}

/// Canonicalize the longest existing prefix of `path` and re-append the rest.
fn resolve_existing_prefix(path: &Path) -> Result<PathBuf> {
    let mut existing = path;
    let mut tail = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(path.to_path_buf()),
        }
    }

    let mut resolved = dunce::canonicalize(existing).map_err(|e| Error::io(existing, e))?;
    for name in tail.iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

/// Prove that `candidate` lies strictly inside `root` and outside its `.git`.
///
/// Both paths are resolved through any existing symlinks before comparison,
/// so a sub-path that climbs out with `..` or through a link is rejected.
/// Returns the resolved candidate.
///
/// # Errors
///
/// Returns [`Error::PathEscape`] when the candidate is the root itself, is
/// outside the root, or is inside the root's git database.
pub fn ensure_within(root: &Path, candidate: &Path) -> Result<PathBuf> {
    let canonical_root = resolve(root)?;
    let resolved = resolve(candidate)?;

    let escapes = resolved == canonical_root
        || !resolved.starts_with(&canonical_root)
        || resolved.starts_with(canonical_root.join(RepoPath::GitDir));
    if escapes {
        return Err(Error::PathEscape {
            root: canonical_root,
            path: candidate.to_path_buf(),
        });
    }

    Ok(resolved)
}
