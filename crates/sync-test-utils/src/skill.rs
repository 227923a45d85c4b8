//! [`SkillFixture`] builder for source skill folders.

use std::fs;
use std::path::{Path, PathBuf};

/// Render a `SKILL.md` with a well-formed front-matter block.
pub fn skill_markdown(name: &str, description: &str) -> String {
    format!("---\nname: {name}\ndescription: {description}\n---\n\n# {name}\n\nUsage notes.\n")
}

/// A skill folder on disk, created under a caller-owned parent directory.
///
/// # Example
///
/// ```rust,no_run
/// use sync_test_utils::skill::SkillFixture;
///
/// let temp = tempfile::tempdir().unwrap();
/// let skill = SkillFixture::create(temp.path(), "pdf-tools")
///     .with_file("scripts/extract.py", "print('hi')\n");
/// assert!(skill.path().join("SKILL.md").exists());
/// ```
#[derive(Debug, Clone)]
pub struct SkillFixture {
    root: PathBuf,
}

impl SkillFixture {
    /// Create `<parent>/<name>` with a valid `SKILL.md` declaring `name`.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn create(parent: &Path, name: &str) -> Self {
        let fixture = Self::empty(parent, name);
        fixture.write(
            "SKILL.md",
            &skill_markdown(name, &format!("Helpers for {name}")),
        );
        fixture
    }

    /// Create `<parent>/<name>` with no files at all.
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn empty(parent: &Path, name: &str) -> Self {
        let root = parent.join(name);
        fs::create_dir_all(&root)
            .unwrap_or_else(|e| panic!("SkillFixture: failed to create {}: {e}", root.display()));
        Self { root }
    }

    /// Builder form of [`SkillFixture::write`].
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        self.write(rel, content);
        self
    }

    /// Root of the skill folder.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write `content` to `rel`, creating parent directories.
    ///
    /// # Panics
    /// Panics if the write fails.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("SkillFixture: failed to write {}: {e}", path.display()));
    }

    /// Delete `rel` from the skill folder.
    ///
    /// # Panics
    /// Panics if the file cannot be removed.
    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.root.join(rel)).unwrap();
    }
}
