pub mod cli;
pub mod config;
pub mod formatter;
pub mod fs;
pub mod manifest;
pub mod mapping;
pub mod models;
pub mod naming;
pub mod scanner;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use pathdiff::diff_paths;
use std::env;

use self::cli::Cli;
use self::config::{resolve_config, MANIFEST_NAME};
use self::formatter::OutputGenerator;
use self::fs::{FileSystem, LocalFs};
use self::mapping::ClassMap;
use self::models::RuntimeConfig;
use self::naming::NameResolver;
use self::scanner::Scanner;

/// Scans, resolves and assembles the mapping for the configured directory.
pub fn collect_classes(fs: &impl FileSystem, config: &RuntimeConfig) -> Result<ClassMap> {
    let files = Scanner::new(fs, config)?.scan()?;
    let resolver = NameResolver::new(fs, &config.indir, &config.name);
    let mut map = ClassMap::new();

    for file in &files {
        let Some(name) = resolver.resolve(file)? else {
            continue;
        };
        let relative = diff_paths(file, &config.indir).unwrap_or_else(|| file.clone());
        let relative = relative.to_string_lossy().replace('\\', "/");
        map.insert(name, relative);
    }

    if map.is_empty() {
        log::info!("No files found to import.");
    } else {
        map.align();
        log::info!("Files to import: {}", map.imports.len());
    }

    Ok(map)
}

/// Runs the whole pipeline and returns the rendered index.
pub fn generate(fs: &impl FileSystem, config: &RuntimeConfig) -> Result<String> {
    let map = collect_classes(fs, config)?;
    OutputGenerator::render(fs, config, &map)
}

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();
    let fs = LocalFs;

    // 2. Optional manifest registration
    if args.register {
        let current_dir = env::current_dir().context("Failed to get current directory")?;
        match fs.find_up(&current_dir, MANIFEST_NAME) {
            Some(manifest) => {
                manifest::register_index_script(&fs, &manifest)?;
            }
            None => log::warn!("No {} found above {}", MANIFEST_NAME, current_dir.display()),
        }
        if args.indir.is_none() {
            return Ok(());
        }
    }

    // 3. Resolve Configuration
    let Some(config) = resolve_config(args, &fs)? else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    // 4. Scan, resolve and render
    let content = generate(&fs, &config)?;

    // 5. Save or print
    OutputGenerator::emit(&fs, &config, &content)
}
