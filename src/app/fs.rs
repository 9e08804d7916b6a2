//! File system access used by the pipeline.
//!
//! Everything that touches the disk goes through [`FileSystem`] so the
//! resolver and assembler can be exercised against [`MockFileSystem`].

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

pub trait FileSystem {
    /// Read a whole file as UTF-8 text.
    fn read(&self, path: &Path) -> Result<String>;

    /// Write (create or truncate) a file.
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Recursively list every file below `dir`.
    fn scandir(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Search `start` and its ancestors, stopping below the filesystem root,
    /// for a file called `name`.
    fn find_up(&self, start: &Path, name: &str) -> Option<PathBuf>;
}

/// The real disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn scandir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            anyhow::bail!("Input directory {} does not exist", dir.display());
        }

        let mut files = Vec::new();
        // No gitignore or hidden-file filtering: every file is a candidate.
        let walker = WalkBuilder::new(dir).standard_filters(false).build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|t| t.is_file()) {
                        files.push(entry.into_path());
                    }
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        Ok(files)
    }

    fn find_up(&self, start: &Path, name: &str) -> Option<PathBuf> {
        let start = fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
        start
            .ancestors()
            .filter(|dir| dir.parent().is_some())
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}

/// In-memory file system for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystem {
    pub files: std::cell::RefCell<std::collections::BTreeMap<PathBuf, String>>,
}

#[cfg(test)]
impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.borrow_mut().insert(path.into(), content.to_string());
        self
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

#[cfg(test)]
impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> Result<String> {
        self.get(path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn scandir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|p| p.starts_with(dir))
            .cloned()
            .collect())
    }

    fn find_up(&self, start: &Path, name: &str) -> Option<PathBuf> {
        let files = self.files.borrow();
        start
            .ancestors()
            .filter(|dir| dir.parent().is_some())
            .map(|dir| dir.join(name))
            .find(|candidate| files.contains_key(candidate))
    }
}
