use crate::app::cli::Cli;
use crate::app::fs::FileSystem;
use crate::app::models::{BuiltinTemplate, RuntimeConfig, TemplateSource};
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const MANIFEST_NAME: &str = "package.json";

pub const DEFAULT_EXTENSION: &str = "js";

/// Files considered modules: `.js`, `.mjs`, `.es`, `.es6`, ...
pub const DEFAULT_FILE_PATTERN: &str = r"(?i)\.(m?js|es\d?)$";

/// The manifest keys that map onto options. Everything else is ignored.
#[derive(Deserialize, Debug, Default)]
struct ManifestFields {
    name: Option<String>,
    description: Option<String>,
    extension: Option<String>,
    header: Option<String>,
    footer: Option<String>,
    tpl: Option<PathBuf>,
}

fn load_manifest(fs: &impl FileSystem, path: &Path) -> Result<ManifestFields> {
    let content = fs.read(path)?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Builds the configuration: defaults, then CLI flags, then manifest keys.
///
/// Manifest keys overwrite CLI values whenever they are present. Returns
/// `None` when no input directory was given.
pub fn resolve_config(cli: Cli, fs: &impl FileSystem) -> Result<Option<RuntimeConfig>> {
    let Some(indir) = cli.indir else {
        return Ok(None);
    };
    log::info!("Applying command line options");

    let manifest = cli.package.or_else(|| fs.find_up(&indir, MANIFEST_NAME));

    let mut name = cli.name.unwrap_or_default();
    let mut description = cli.description.unwrap_or_default();
    let mut extension = cli.extension.unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    let mut header = cli.header.unwrap_or_default();
    let mut footer = cli.footer.unwrap_or_default();
    let mut tpl = cli.tpl;

    if let Some(path) = &manifest {
        log::info!("Merging options from {}", path.display());
        let fields = load_manifest(fs, path)?;
        name = fields.name.unwrap_or(name);
        description = fields.description.unwrap_or(description);
        extension = fields.extension.unwrap_or(extension);
        header = fields.header.unwrap_or(header);
        footer = fields.footer.unwrap_or(footer);
        tpl = fields.tpl.or(tpl);
    }

    let template = match tpl {
        Some(path) => Some(TemplateSource::File(path)),
        None => BuiltinTemplate::for_extension(&extension).map(TemplateSource::Builtin),
    };
    log::debug!("Template for `{}`: {:?}", extension, template);

    Ok(Some(RuntimeConfig {
        indir,
        extension,
        template,
        name,
        description,
        header,
        footer,
        file_pattern: Regex::new(DEFAULT_FILE_PATTERN)?,
        exclude: cli.exclude.unwrap_or_default(),
        manifest,
        save: cli.save,
        created: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
