//! # Completions Command Implementation
//!
//! Generates shell completion scripts via `clap_complete`.
//!
//! ## Example
//!
//! ```bash
//! # Generate and install bash completions
//! mw-sync completions bash > ~/.local/share/bash-completion/completions/mw-sync
//!
//! # Generate zsh completions
//! mw-sync completions zsh > ~/.zfunc/_mw-sync
//! ```

use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for the requested shell to stdout; redirect
/// it into the shell's completion directory to install.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "mw-sync", &mut io::stdout());
    Ok(())
}
