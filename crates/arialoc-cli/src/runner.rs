//! Command execution

use std::io::Write;

use arialoc::{parse_locator, LocatorError, Resolver, ResolverOptions, UiTree};
use tracing::{debug, info};

use crate::commands::{CheckArgs, Cli, ColorArg, Commands, FindArgs, ParseArgs};
use crate::config::{CliConfig, Verbosity};
use crate::error::{CliError, CliResult};
use crate::output::{render_locator, render_matches, render_not_found, OutputFormat, Reporter};

/// Build the effective configuration: YAML file first, then flags
pub fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::new(),
    };
    if cli.quiet || cli.verbose > 0 {
        config.verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    }
    if !matches!(cli.color, ColorArg::Auto) {
        config.color = cli.color.into();
    }
    Ok(config)
}

/// Runs parsed commands, writing results to `out` and status to stderr
#[derive(Debug)]
pub struct CommandRunner {
    config: CliConfig,
    reporter: Reporter,
}

impl CommandRunner {
    /// Create a runner for a configuration
    #[must_use]
    pub fn new(config: CliConfig) -> Self {
        let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
        Self { config, reporter }
    }

    /// Effective configuration
    #[must_use]
    pub const fn config(&self) -> &CliConfig {
        &self.config
    }

    /// Execute a command
    pub fn run(&self, command: &Commands, out: &mut dyn Write) -> CliResult<()> {
        match command {
            Commands::Find(args) => self.find(args, out),
            Commands::Parse(args) => self.parse(args, out),
            Commands::Check(args) => self.check(args),
        }
    }

    fn format(&self, arg: Option<crate::commands::FormatArg>) -> OutputFormat {
        arg.map_or(self.config.format, Into::into)
    }

    fn resolver_options(&self, args: &FindArgs) -> ResolverOptions {
        let base = self.config.resolver;
        let visibility = base
            .visibility
            .with_hidden(base.visibility.include_hidden || args.include_hidden)
            .with_presentational(
                base.visibility.include_presentational || args.include_presentational,
            );
        ResolverOptions::new()
            .with_visibility(visibility)
            .with_strict(base.strict || args.strict)
    }

    fn find(&self, args: &FindArgs, out: &mut dyn Write) -> CliResult<()> {
        let format = self.format(args.format);
        let locator = parse_locator(&args.locator)?;
        let tree = UiTree::from_path(&args.tree)
            .map_err(|source| CliError::tree_load(&args.tree, source))?;
        info!(path = %args.tree.display(), nodes = tree.len(), "loaded tree snapshot");

        let options = self.resolver_options(args);
        debug!(?options, %locator, "resolving");
        let resolver = Resolver::new(&tree).with_options(options);
        let root = tree.root();

        let matches = if args.one {
            match resolver.find_one_parsed(&locator, &root) {
                Ok(node) => vec![node],
                Err(LocatorError::NotFound(not_found)) => {
                    if format == OutputFormat::Json {
                        writeln!(out, "{}", render_not_found(&not_found, format)?)?;
                    }
                    return Err(LocatorError::NotFound(not_found).into());
                }
                Err(err) => return Err(err.into()),
            }
        } else {
            resolver.find_all_parsed(&locator, &root)?
        };

        let rendered = render_matches(
            &tree,
            &locator,
            &matches,
            format,
            self.config.color.should_color(),
        )?;
        write!(out, "{rendered}")?;
        if format == OutputFormat::Json {
            writeln!(out)?;
        }
        if matches.is_empty() {
            self.reporter.info(&format!("No elements match {locator}"));
        }
        Ok(())
    }

    fn parse(&self, args: &ParseArgs, out: &mut dyn Write) -> CliResult<()> {
        let locator = parse_locator(&args.locator)?;
        let format = self.format(args.format);
        write!(out, "{}", render_locator(&locator, format)?)?;
        if format == OutputFormat::Json {
            writeln!(out)?;
        }
        Ok(())
    }

    fn check(&self, args: &CheckArgs) -> CliResult<()> {
        match parse_locator(&args.locator) {
            Ok(locator) => {
                self.reporter.success(&format!(
                    "{locator} ({} predicate nodes)",
                    locator.predicate_count()
                ));
                Ok(())
            }
            Err(err) => {
                self.reporter.failure(&args.locator);
                Err(err.into())
            }
        }
    }
}
