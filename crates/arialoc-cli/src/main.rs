//! arialoc: resolve semantic locators from the command line
//!
//! ## Usage
//!
//! ```bash
//! arialoc find "{list} outer {listitem}" --tree page.json
//! arialoc find "{button 'Save'}" --tree page.json --one
//! arialoc parse "{checkbox checked:true}" --format json
//! arialoc check "{dialog} {button 'OK*'}"
//! ```

use std::process::ExitCode;

use arialoc_cli::{build_config, Cli, CliResult, CommandRunner, Verbosity};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_tracing(config.verbosity);

    let runner = CommandRunner::new(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runner.run(&cli.command, &mut out)
}

/// `RUST_LOG` wins over the verbosity flags
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
