//! # Check Command Implementation
//!
//! Implements the `check` subcommand: the full audit of an installation.
//!
//! ## Functionality
//!
//! - **Full scan**: evaluates the core checkout, then every repository
//!   under `extensions/` and `skins/` in bounded parallel, and renders one
//!   table per section plus a summary.
//!
//! - **Pull policy**: unless `--report-only` is set, repositories behind on
//!   `master`/`main` are offered a pull, each behind a single confirmation
//!   prompt (`--yes` auto-confirms without prompting).
//!
//! - **Report artifact**: with `--report-file` all rendered output is
//!   mirrored to a file prefixed with a generation timestamp.
//!
//! - **Formats**: `--format json` replaces the tables with one
//!   machine-readable document.
//!
//! Per-repository problems are findings, not failures: the command exits 0
//! once the scan itself has run.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use mw_sync::evaluator::evaluate_repository;
use mw_sync::installation;
use mw_sync::output::OutputConfig;
use mw_sync::policy::ScanPolicy;
use mw_sync::prompt::InteractiveGate;
use mw_sync::report::{self, ReportWriter};
use mw_sync::scanner::scan_directory;
use mw_sync::status::{RepoKind, RepoStatus, Statistics};

use super::resolve_installation_path;

/// Check all managed repositories for upstream updates
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the MediaWiki installation (prompted for when omitted)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Only report status, never pull updates
    #[arg(long)]
    pub report_only: bool,

    /// Auto-confirm all pull prompts
    #[arg(short, long)]
    pub yes: bool,

    /// Mirror results and summary to a file
    #[arg(long, value_name = "FILE")]
    pub report_file: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: String,
}

/// Execute the `check` command.
pub fn execute(args: CheckArgs, verbose: bool, output: &OutputConfig) -> Result<()> {
    let json = match args.format.as_str() {
        "text" => false,
        "json" => true,
        other => anyhow::bail!("Invalid format '{}'. Must be 'text' or 'json'", other),
    };

    let root = resolve_installation_path(args.path)?;
    let root = installation::validate_root(&root)?;
    let policy = ScanPolicy::scan(verbose, args.report_only, args.yes);

    if !json {
        println!("Checking MediaWiki installation at: {}", root.display());
        if !policy.report_only {
            println!("Auto-pull enabled for master/main branches with updates");
        }
        println!("This may take a moment...");
        println!("Checking MediaWiki core...");
    }

    // The core is a single direct evaluation, not a directory scan.
    let core_gate = InteractiveGate::new(policy.auto_yes);
    let core_results = vec![evaluate_repository(&root, RepoKind::Core, &policy, &core_gate)];

    let extensions_dir = installation::extensions_dir(&root);
    if !json {
        println!(
            "Checking extensions ({})...",
            installation::count_subdirectories(&extensions_dir)
        );
    }
    let extension_results = scan_section(&extensions_dir, RepoKind::Extension, &policy, json);

    let skins_dir = installation::skins_dir(&root);
    if !json {
        println!(
            "Checking skins ({})...",
            installation::count_subdirectories(&skins_dir)
        );
    }
    let skin_results = scan_section(&skins_dir, RepoKind::Skin, &policy, json);

    if json {
        let document = report::json_document(&core_results, &extension_results, &skin_results);
        let rendered = serde_json::to_string_pretty(&document)?;
        println!("{}", rendered);
        // The JSON document carries its own timestamp; mirror it verbatim.
        if let Some(path) = &args.report_file {
            std::fs::write(path, format!("{}\n", rendered))?;
            eprintln!("Report saved to: {}", path.display());
        }
        return Ok(());
    }

    let mut writer = match &args.report_file {
        Some(path) => ReportWriter::with_file(path),
        None => ReportWriter::console_only(),
    };

    writer.write("\nMEDIAWIKI CORE:\n");
    writer.write(&report::render_table(&core_results, output));
    writer.write(&report::render_section("EXTENSIONS", &extension_results, output));
    writer.write(&report::render_section("SKINS", &skin_results, output));

    let stats = Statistics::from_results(&core_results)
        + Statistics::from_results(&extension_results)
        + Statistics::from_results(&skin_results);
    writer.write(&report::render_summary(stats));
    writer.finish();

    Ok(())
}

/// Scan one component directory with a progress bar wired through both the
/// scanner (ticks) and the gate (prompt suspension).
fn scan_section(
    dir: &std::path::Path,
    kind: RepoKind,
    policy: &ScanPolicy,
    quiet: bool,
) -> Vec<RepoStatus> {
    let bar = if quiet || policy.verbose {
        // Verbose tracing and progress redraws fight over stderr.
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("  {msg} [{bar:40}] {pos}/{len}")
                .expect("static progress template is valid")
                .progress_chars("=> "),
        );
        bar.set_message(format!("{}s", kind));
        bar
    };

    let gate = InteractiveGate::new(policy.auto_yes).with_progress(bar.clone());
    let results = scan_directory(dir, kind, policy, &gate, Some(&bar));
    bar.finish_and_clear();
    results
}
