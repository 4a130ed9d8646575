//! # Aggregator / Reporter
//!
//! Renders the scan results: one fixed-width table per component section,
//! a summary block, and optionally a mirrored copy of everything in a
//! report file prefixed with a generation timestamp.
//!
//! All rendering is pure (`String`-returning) so it can be unit-tested;
//! [`ReportWriter`] is the only part that touches stdout and the report
//! artifact, and every write goes through it so console and file never
//! disagree.

use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::warn;
use serde_json::json;

use crate::output::{emoji, OutputConfig};
use crate::status::{RepoStatus, Statistics};

const TABLE_WIDTH: usize = 100;

/// Render one result table: Name / Type / Branch / Behind / Uncommitted /
/// Status, framed the way the original reports always looked.
pub fn render_table(results: &[RepoStatus], config: &OutputConfig) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push('\n');
    out.push_str(&"=".repeat(TABLE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "{:<30}{:<12}{:<15}{:<10}{:<14}Status\n",
        "Name", "Type", "Branch", "Behind", "Uncommitted"
    ));
    out.push_str(&"-".repeat(TABLE_WIDTH));
    out.push('\n');

    for status in results {
        out.push_str(&render_row(status, config));
    }

    out.push_str(&"=".repeat(TABLE_WIDTH));
    out.push('\n');
    out
}

/// One table row. Anything the evaluation could not determine renders as
/// `N/A`, never as a zero or a stale count.
fn render_row(status: &RepoStatus, config: &OutputConfig) -> String {
    let ok = emoji(config, "✅", "[OK]");
    let warn_sign = emoji(config, "⚠️ ", "[WARN]");
    let fail = emoji(config, "❌", "[FAIL]");
    let updates = emoji(config, "🔴", "[UPDATES]");

    let branch = if status.current_branch.is_empty() {
        "N/A"
    } else {
        &status.current_branch
    };
    let dirty = if status.has_uncommitted_changes {
        "Yes"
    } else {
        "No"
    };

    let mut row = format!("{:<30}{:<12}{:<15}", status.name, status.kind, branch);

    if !status.is_repo {
        row.push_str(&format!(
            "{:<10}{:<14}{} Not a git repo\n",
            "N/A", "N/A", warn_sign
        ));
    } else if let Some(error) = &status.error {
        row.push_str(&format!("{:<10}{:<14}{} {}\n", "N/A", "N/A", warn_sign, error));
    } else if status.pulled {
        // Pulled successfully: behind-count displays as caught up.
        if status.has_uncommitted_changes {
            row.push_str(&format!(
                "{:<10}{:<14}{} Pulled ({} had uncommitted changes)\n",
                "0", dirty, ok, warn_sign
            ));
        } else {
            row.push_str(&format!(
                "{:<10}{:<14}{} Pulled and up to date\n",
                "0", dirty, ok
            ));
        }
    } else if let Some(pull_error) = &status.pull_error {
        row.push_str(&format!(
            "{:<10}{:<14}{} Pull failed: {}\n",
            status.behind_by,
            dirty,
            fail,
            pull_error.trim_end()
        ));
    } else if status.has_updates() {
        row.push_str(&format!(
            "{:<10}{:<14}{} Updates available\n",
            status.behind_by, dirty, updates
        ));
    } else {
        row.push_str(&format!("{:<10}{:<14}{} Up to date\n", "0", dirty, ok));
    }

    row
}

/// Render a titled section, with the "nothing here" fallback for empty
/// extension/skin directories; an absent directory is a valid state.
pub fn render_section(title: &str, results: &[RepoStatus], config: &OutputConfig) -> String {
    let mut out = format!("\n{}:\n", title);
    if !results.is_empty() {
        out.push_str(&render_table(results, config));
    } else {
        match title {
            "EXTENSIONS" => {
                out.push_str("No extensions found or extensions directory doesn't exist.\n")
            }
            "SKINS" => out.push_str("No skins found or skins directory doesn't exist.\n"),
            _ => out.push_str("Nothing found.\n"),
        }
    }
    out
}

/// Render the run summary from pre-folded per-section statistics.
pub fn render_summary(stats: Statistics) -> String {
    format!(
        "\nSUMMARY:\n  Total repositories: {}\n  Up to date: {}\n  Updates available: {}\n  Errors/Warnings: {}\n\n",
        stats.total(),
        stats.up_to_date,
        stats.has_updates,
        stats.errors
    )
}

/// Machine-readable scan document for `--format json`.
pub fn json_document(
    core: &[RepoStatus],
    extensions: &[RepoStatus],
    skins: &[RepoStatus],
) -> serde_json::Value {
    let stats = Statistics::from_results(core)
        + Statistics::from_results(extensions)
        + Statistics::from_results(skins);

    json!({
        "generated": Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        "core": core,
        "extensions": extensions,
        "skins": skins,
        "summary": {
            "total": stats.total(),
            "up_to_date": stats.up_to_date,
            "has_updates": stats.has_updates,
            "errors": stats.errors,
        },
    })
}

/// Shared sink for all report output: console always, report file when
/// requested. The file starts with a generation timestamp line. All scan
/// output flows through one `ReportWriter`, which is what serializes
/// writes to the artifact.
pub struct ReportWriter {
    file: Option<(PathBuf, File)>,
}

impl ReportWriter {
    /// Console-only writer.
    pub fn console_only() -> Self {
        Self { file: None }
    }

    /// Writer mirroring to `path`. An unopenable file degrades to
    /// console-only with a warning; it does not fail the run.
    pub fn with_file(path: &Path) -> Self {
        match File::create(path) {
            Ok(mut file) => {
                let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
                if let Err(e) = writeln!(file, "{}", stamp) {
                    warn!("Could not write to report file {}: {}", path.display(), e);
                }
                Self {
                    file: Some((path.to_path_buf(), file)),
                }
            }
            Err(e) => {
                eprintln!("Warning: Could not open report file: {} ({})", path.display(), e);
                Self { file: None }
            }
        }
    }

    /// Write to the console and, when open, the report file.
    pub fn write(&mut self, text: &str) {
        print!("{}", text);
        if let Some((path, file)) = &mut self.file {
            if let Err(e) = file.write_all(text.as_bytes()) {
                warn!("Could not write to report file {}: {}", path.display(), e);
            }
        }
    }

    /// Flush and announce the artifact, if one was written.
    pub fn finish(self) {
        if let Some((path, mut file)) = self.file {
            let _ = file.flush();
            println!("Report saved to: {}", path.display());
        }
    }
}
