//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// probar-replay: validate and inspect replay driver expectation scripts
#[derive(Parser, Debug)]
#[command(name = "probar-replay")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load, validate and lint expectation scripts
    Check(CheckArgs),

    /// Print the expectations of a script in call order
    Show(ShowArgs),
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Script files (YAML, or JSON by `.json` extension)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Treat lint warnings as errors
    #[arg(long)]
    pub deny_warnings: bool,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Script file
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ShowFormat,
}

/// Output format for `show`
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShowFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// Script document as JSON
    Json,
}
