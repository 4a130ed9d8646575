//! # mw-sync CLI
//!
//! Binary entry point for the `mw-sync` command-line tool.
//!
//! Its responsibilities are parsing command-line arguments with `clap`,
//! dispatching to the selected command, and translating top-level errors
//! into user-facing output with a non-zero exit code. All core logic lives
//! in the library crate; the binary is a thin wrapper.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
