use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Generate the index file of a CommonJS or ES module package",
    disable_help_flag = true
)]
pub struct Cli {
    /// Description to embed in the generated file
    #[arg(short = 'd', long)]
    pub description: Option<String>,

    /// Extension of the generated file (`js` or `mjs` pick a bundled template)
    #[arg(short = 'e', long)]
    pub extension: Option<String>,

    /// Text to place at the bottom of the generated file
    #[arg(short = 'f', long)]
    pub footer: Option<String>,

    /// Text to place at the top of the generated file
    #[arg(short = 'h', long)]
    pub header: Option<String>,

    /// Directory with the source code (required)
    #[arg(short = 'i', long)]
    pub indir: Option<PathBuf>,

    /// Module name, used as the identifier prefix
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Path to the `package.json` file whose keys are merged into the options
    #[arg(short = 'p', long)]
    pub package: Option<PathBuf>,

    /// Write the file instead of printing it
    #[arg(short = 's', long)]
    pub save: bool,

    /// Path of the template used to render the file
    #[arg(short = 't', long)]
    pub tpl: Option<PathBuf>,

    /// Glob patterns (relative to the input directory) for files to leave out
    #[arg(short = 'x', long, num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// Add an `index` script to the nearest package.json
    #[arg(long)]
    pub register: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}
