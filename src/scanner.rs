//! # Bounded Scanner
//!
//! Enumerates the immediate subdirectories of a parent directory
//! (non-recursive; plain files and hidden entries are skipped) and
//! evaluates each one concurrently through the status evaluator.
//!
//! Work runs on a dedicated rayon pool sized to the hardware parallelism
//! (minimum one thread), so at most that many evaluations are ever in
//! flight at once. Entries are sorted by name before submission and
//! `par_iter().map().collect()` keeps result order equal to submission
//! order, which keeps reports deterministic. Exactly one record is
//! returned per subdirectory regardless of its evaluation outcome.

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use log::{debug, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::evaluator::evaluate_repository;
use crate::policy::ScanPolicy;
use crate::prompt::Confirmer;
use crate::status::{RepoKind, RepoStatus};

/// Number of evaluations allowed in flight at once.
pub fn worker_budget() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(1)
}

/// Immediate subdirectories of `dir`, sorted by name. Hidden entries and
/// plain files are skipped. A missing or non-directory path yields an
/// empty list; absent extensions/skins directories are a valid state,
/// not an error.
fn subdirectories(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .map(|entry| entry.path())
        .collect();
    dirs.sort();
    dirs
}

/// Scan every repository directly under `dir`, evaluating concurrently.
///
/// The optional progress bar ticks once per completed evaluation; prompt
/// serialization against it is the gate's responsibility.
pub fn scan_directory(
    dir: &Path,
    kind: RepoKind,
    policy: &ScanPolicy,
    gate: &dyn Confirmer,
    progress: Option<&ProgressBar>,
) -> Vec<RepoStatus> {
    if !dir.is_dir() {
        debug!("Scan target missing or not a directory: {}", dir.display());
        return Vec::new();
    }

    let targets = subdirectories(dir);
    if targets.is_empty() {
        return Vec::new();
    }

    if let Some(bar) = progress {
        bar.set_length(targets.len() as u64);
    }

    let evaluate_all = || {
        targets
            .par_iter()
            .map(|path| {
                let status = evaluate_repository(path, kind, policy, gate);
                if let Some(bar) = progress {
                    bar.inc(1);
                }
                status
            })
            .collect()
    };

    // A dedicated pool makes the in-flight cap explicit and keeps a scan
    // from competing with any other rayon work in the process.
    match ThreadPoolBuilder::new().num_threads(worker_budget()).build() {
        Ok(pool) => pool.install(evaluate_all),
        Err(e) => {
            warn!("Falling back to the global thread pool: {}", e);
            evaluate_all()
        }
    }
}
