//! # CLI Command Implementations
//!
//! One file per subcommand of the `mw-sync` command-line tool. Each module
//! defines a clap `Args` struct and an `execute` function that orchestrates
//! the command by calling into the `mw_sync` library.
//!
//! Structural failures (bad paths, bad arguments, a failed single-target
//! pull) are returned as errors and become exit code 1; per-repository
//! findings never fail a command.

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

pub mod check;
pub mod completions;
pub mod update;

/// The installation path from the command line, or prompted for when the
/// positional argument was omitted.
pub(crate) fn resolve_installation_path(arg: Option<PathBuf>) -> Result<PathBuf> {
    match arg {
        Some(path) => Ok(path),
        None => {
            let input: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("MediaWiki installation path")
                .interact_text()?;
            Ok(PathBuf::from(input.trim()))
        }
    }
}
