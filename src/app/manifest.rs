use crate::app::fs::FileSystem;
use crate::app::formatter::OutputGenerator;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

pub const INDEX_SCRIPT: &str = "modindex -i src/ -s";

/// Adds `scripts.index` to a package manifest unless one is already there.
///
/// Returns `true` when the manifest was rewritten.
pub fn register_index_script(fs: &impl FileSystem, manifest: &Path) -> Result<bool> {
    let content = fs.read(manifest)?;
    let mut root: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", manifest.display()))?;

    let Some(pkg) = root.as_object_mut() else {
        anyhow::bail!("{} is not a JSON object", manifest.display());
    };
    let scripts = pkg
        .entry("scripts")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(scripts) = scripts.as_object_mut() else {
        anyhow::bail!("`scripts` in {} is not an object", manifest.display());
    };
    if scripts.contains_key("index") {
        log::debug!("{} already has an index script", manifest.display());
        return Ok(false);
    }
    scripts.insert("index".to_string(), Value::String(INDEX_SCRIPT.to_string()));

    fs.write(manifest, &OutputGenerator::pretty_json(&root)?)?;

    log::info!("Added `index` script to {}: {}", manifest.display(), INDEX_SCRIPT);
    Ok(true)
}
