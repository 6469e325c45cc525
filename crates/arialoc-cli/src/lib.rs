//! arialoc CLI Library
//!
//! Command-line front end for resolving semantic locators against JSON
//! accessibility tree snapshots.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{CheckArgs, Cli, ColorArg, Commands, FindArgs, FormatArg, ParseArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{
    render_locator, render_matches, render_not_found, MatchRecord, OutputFormat, Reporter,
};
pub use runner::{build_config, CommandRunner};
