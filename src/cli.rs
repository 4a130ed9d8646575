//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use mw_sync::output::OutputConfig;

use crate::commands;

/// mw-sync - Audit and update the git repositories of a MediaWiki installation
#[derive(Parser, Debug)]
#[command(name = "mw-sync")]
#[command(version, about, long_about = None)]
#[command(after_help = "Repositories on master/main branches with updates will be prompted\n\
    for pull unless --yes is used. Use --report-only to skip pulling\n\
    entirely. A warning is shown when uncommitted changes exist.")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Enable verbose step tracing
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check all managed repositories for upstream updates
    Check(commands::check::CheckArgs),

    /// Update a single component (core, or a named extension/skin)
    Update(commands::update::UpdateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(self.verbose);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Check(args) => commands::check::execute(args, self.verbose, &output),
            Commands::Update(args) => commands::update::execute(args, self.verbose, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Wire `--verbose` to the log filter. `RUST_LOG` still wins when set, so
/// selective module filters keep working.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
