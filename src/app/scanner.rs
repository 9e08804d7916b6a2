use crate::app::fs::FileSystem;
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use pathdiff::diff_paths;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Collects the module files below the input directory.
pub struct Scanner<'a, F: FileSystem> {
    fs: &'a F,
    root: PathBuf,
    file_pattern: Regex,
    exclude_set: GlobSet,
}

impl<'a, F: FileSystem> Scanner<'a, F> {
    pub fn new(fs: &'a F, config: &RuntimeConfig) -> Result<Self> {
        Ok(Self {
            fs,
            root: config.indir.clone(),
            file_pattern: config.file_pattern.clone(),
            exclude_set: build_globset(&config.exclude)?,
        })
    }

    /// Matching files, sorted case-insensitively by path.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        log::info!("Scanning directory: {}", self.root.display());

        let mut files: Vec<PathBuf> = self
            .fs
            .scandir(&self.root)?
            .into_iter()
            .filter(|path| self.accepts(path))
            .collect();
        files.sort_by_cached_key(|path| path.to_string_lossy().to_lowercase());

        log::info!("Files found: {}", files.len());
        Ok(files)
    }

    fn accepts(&self, path: &Path) -> bool {
        if !self.file_pattern.is_match(&path.to_string_lossy()) {
            return false;
        }
        match diff_paths(path, &self.root) {
            Some(relative) => !self.exclude_set.is_match(relative),
            None => true,
        }
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).with_context(|| format!("Invalid glob pattern: {}", pat))?);
    }
    Ok(builder.build()?)
}
