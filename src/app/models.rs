use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;

/// Represents the final configuration after merging the manifest and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub indir: PathBuf,
    pub extension: String,
    pub template: Option<TemplateSource>,
    pub name: String,
    pub description: String,
    pub header: String,
    pub footer: String,
    pub file_pattern: Regex,
    pub exclude: Vec<String>,
    pub manifest: Option<PathBuf>,
    pub save: bool,
    pub created: String,
}

impl RuntimeConfig {
    /// Path of the generated index file.
    pub fn outfile(&self) -> PathBuf {
        self.indir.join(format!("index.{}", self.extension))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTemplate {
    /// CommonJS (`require` / `module.exports`).
    Node,
    /// ECMAScript modules (`import` / `export default`).
    Es6,
}

impl BuiltinTemplate {
    pub fn for_extension(extension: &str) -> Option<Self> {
        match extension {
            "js" => Some(Self::Node),
            "mjs" => Some(Self::Es6),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Builtin(BuiltinTemplate),
    File(PathBuf),
}

/// A file that survived name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// Logical location, e.g. `models.User`.
    pub dotted: String,
    /// Flattened identifier, e.g. `DemoModelsUser`.
    pub identifier: String,
}

/// One line of the generated import block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportEntry {
    pub name: String,
    pub file: String,
    pub spaces: String,
}
