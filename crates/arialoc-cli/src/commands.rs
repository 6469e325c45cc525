//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// arialoc: resolve semantic locators against accessibility tree snapshots
#[derive(Parser, Debug)]
#[command(name = "arialoc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// YAML configuration file
    #[arg(long, global = true, env = "ARIALOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find elements matching a locator in a tree snapshot
    Find(FindArgs),

    /// Parse a locator and print its canonical form
    Parse(ParseArgs),

    /// Check locator syntax
    Check(CheckArgs),
}

/// Arguments for the find command
#[derive(Parser, Debug)]
pub struct FindArgs {
    /// Semantic locator, e.g. "{list} outer {listitem 'Home'}"
    pub locator: String,

    /// JSON tree snapshot to search
    #[arg(short, long)]
    pub tree: PathBuf,

    /// Return only the first match and fail with a diagnostic if none
    #[arg(long)]
    pub one: bool,

    /// With --one, fail if more than one element matches
    #[arg(long)]
    pub strict: bool,

    /// Include elements hidden from the accessibility tree
    #[arg(long)]
    pub include_hidden: bool,

    /// Include elements with a presentational role
    #[arg(long)]
    pub include_presentational: bool,

    /// Output format
    #[arg(short, long)]
    pub format: Option<FormatArg>,
}

/// Arguments for the parse command
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Semantic locator
    pub locator: String,

    /// Output format
    #[arg(short, long)]
    pub format: Option<FormatArg>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Semantic locator
    pub locator: String,
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color output argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
