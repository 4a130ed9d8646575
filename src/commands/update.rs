//! # Update Command Implementation
//!
//! Implements the `update` subcommand: a single-target update of one
//! managed component (the core checkout, or a named extension or skin).
//!
//! ## Functionality
//!
//! - The component is driven through the same status state machine the
//!   full scan uses, with a policy that suppresses the scan's auto-pull so
//!   this command owns the prompt and the pull itself.
//! - Any evaluation failure (not a repo, unknown branch, failed fetch) is
//!   a structural error here; unlike in a scan, there are no siblings to
//!   keep going for. Exit code 1.
//! - A pull only happens when the component is actually behind, after a
//!   confirmation prompt (`--yes` auto-confirms). Declining exits 0; a
//!   failed pull exits 1 with the captured git output.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use mw_sync::error::Error;
use mw_sync::evaluator::evaluate_repository;
use mw_sync::git;
use mw_sync::installation;
use mw_sync::output::{emoji, OutputConfig};
use mw_sync::policy::ScanPolicy;
use mw_sync::prompt::{Confirmer, InteractiveGate, PullPrompt};
use mw_sync::status::RepoKind;

use super::resolve_installation_path;

/// Update a single component of the installation
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Component kind: 'core', 'extension', or 'skin'
    #[arg(value_name = "KIND")]
    pub kind: String,

    /// Component name (required for extension and skin)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Path to the MediaWiki installation (prompted for when omitted)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Auto-confirm the pull prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Map the trailing positionals onto the component name and installation
/// path for the requested kind. Core takes no NAME token, so a lone
/// positional after the kind is the installation path.
fn resolve_target(
    kind: RepoKind,
    name: Option<String>,
    path: Option<PathBuf>,
) -> mw_sync::error::Result<(String, Option<PathBuf>)> {
    match kind {
        RepoKind::Core => Ok((String::new(), path.or_else(|| name.map(PathBuf::from)))),
        RepoKind::Extension | RepoKind::Skin => {
            let name = name.ok_or(Error::MissingName {
                kind: kind.to_string(),
            })?;
            Ok((name, path))
        }
    }
}

/// Execute the `update` command.
pub fn execute(args: UpdateArgs, verbose: bool, output: &OutputConfig) -> Result<()> {
    // KIND is validated here rather than by clap so the documented exit
    // code (1) holds for bad tokens.
    let kind: RepoKind = args.kind.parse()?;
    let (name, path) = resolve_target(kind, args.name, args.path)?;

    let root = resolve_installation_path(path)?;
    let root = installation::validate_root(&root)?;
    let repo_path = installation::component_path(&root, kind, &name)?;

    println!("Checking {} at: {}", kind.describe(&name), repo_path.display());

    let policy = ScanPolicy::single_update(verbose, args.yes);
    let gate = InteractiveGate::new(policy.auto_yes);
    let status = evaluate_repository(&repo_path, kind, &policy, &gate);

    if !status.is_repo {
        return Err(Error::Evaluation {
            message: "Not a git repository".to_string(),
        }
        .into());
    }
    if let Some(message) = &status.error {
        return Err(Error::Evaluation {
            message: message.clone(),
        }
        .into());
    }

    println!("\nRepository Status:");
    println!("  Branch: {}", status.current_branch);
    println!(
        "  Uncommitted changes: {}",
        if status.has_uncommitted_changes {
            "Yes"
        } else {
            "No"
        }
    );
    println!(
        "  Commits behind: {}",
        if status.behind_by >= 0 {
            status.behind_by.to_string()
        } else {
            "Unknown".to_string()
        }
    );

    if status.behind_by <= 0 {
        println!("\n{} Already up to date!", emoji(output, "✅", "[OK]"));
        return Ok(());
    }

    let prompt = PullPrompt {
        name: status.name.clone(),
        kind,
        behind_by: status.behind_by,
        has_uncommitted_changes: status.has_uncommitted_changes,
    };
    if !gate.confirm(&prompt) {
        println!("Update cancelled.");
        return Ok(());
    }

    println!("Pulling updates...");
    match git::pull(&repo_path) {
        Ok(()) => {
            println!("\n{} Successfully updated!", emoji(output, "✅", "[OK]"));
            Ok(())
        }
        Err(detail) => Err(Error::PullFailed { detail }.into()),
    }
}
