//! # Repository Status Model
//!
//! Data types shared by the scanner, evaluator, and reporter:
//!
//! - **`RepoKind`**: the three roles a managed repository can play within an
//!   installation tree (core, extension, skin).
//! - **`RepoStatus`**: the point-in-time record produced by evaluating one
//!   repository. Constructed once per evaluation and immutable afterwards;
//!   every field the evaluation could not determine is left in its
//!   "unknown" shape rather than guessed.
//! - **`Statistics`**: summary counts folded over a list of statuses. A pure
//!   view with no lifecycle of its own.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// The role a repository plays within the installation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoKind {
    /// The MediaWiki core checkout (the installation root itself).
    Core,
    /// A repository under `extensions/`.
    Extension,
    /// A repository under `skins/`.
    Skin,
}

impl RepoKind {
    /// Human-readable label used in prompts and error messages,
    /// e.g. `extension 'Vector'`.
    pub fn describe(&self, name: &str) -> String {
        match self {
            RepoKind::Core => "MediaWiki core".to_string(),
            RepoKind::Extension => format!("extension '{}'", name),
            RepoKind::Skin => format!("skin '{}'", name),
        }
    }
}

impl fmt::Display for RepoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            RepoKind::Core => "core",
            RepoKind::Extension => "extension",
            RepoKind::Skin => "skin",
        };
        // pad() keeps width specifiers working in the report tables.
        f.pad(token)
    }
}

impl FromStr for RepoKind {
    type Err = Error;

    /// Parse the exact CLI tokens `core`, `extension`, `skin`.
    ///
    /// Anything else is the invalid-kind structural error (exit code 1),
    /// not a clap-level usage error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "core" => Ok(RepoKind::Core),
            "extension" => Ok(RepoKind::Extension),
            "skin" => Ok(RepoKind::Skin),
            other => Err(Error::InvalidKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Point-in-time synchronization state of one repository.
///
/// Field semantics:
/// - `current_branch` is empty when the branch could not be determined.
/// - `behind_by` is `-1` when undetermined (no tracking branch, or the
///   query failed; the two are indistinguishable), `0` when up
///   to date, `> 0` when behind by that many commits.
/// - At most one of `pulled` / `pull_error` is ever set.
/// - A non-empty `error` means evaluation stopped before the pull decision;
///   `behind_by` must then be rendered as unknown, never as a count.
#[derive(Debug, Clone, Serialize)]
pub struct RepoStatus {
    pub name: String,
    pub kind: RepoKind,
    pub is_repo: bool,
    pub current_branch: String,
    pub behind_by: i32,
    pub has_uncommitted_changes: bool,
    pub pulled: bool,
    pub pull_error: Option<String>,
    pub error: Option<String>,
}

impl RepoStatus {
    /// A fresh record with every field in its "nothing known yet" shape.
    pub fn new(name: impl Into<String>, kind: RepoKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_repo: false,
            current_branch: String::new(),
            behind_by: 0,
            has_uncommitted_changes: false,
            pulled: false,
            pull_error: None,
            error: None,
        }
    }

    /// Whether the remote has commits this checkout lacks.
    ///
    /// Stays true after a successful pull: the record describes what the
    /// scan *found*, and the reporter handles the pulled-so-now-current
    /// display case.
    pub fn has_updates(&self) -> bool {
        self.behind_by > 0
    }

    /// Whether this record counts as an error/warning in the summary.
    pub fn is_error(&self) -> bool {
        !self.is_repo || self.error.is_some()
    }
}

/// Summary counts over a list of repository statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub up_to_date: usize,
    pub has_updates: usize,
    pub errors: usize,
}

impl Statistics {
    /// Fold a list of statuses into summary counts.
    ///
    /// Precedence mirrors the report: an errored record is counted as an
    /// error even if a behind-count happened to be computed first.
    pub fn from_results(results: &[RepoStatus]) -> Self {
        let mut stats = Statistics::default();
        for status in results {
            if status.is_error() {
                stats.errors += 1;
            } else if status.has_updates() {
                stats.has_updates += 1;
            } else {
                stats.up_to_date += 1;
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.up_to_date + self.has_updates + self.errors
    }
}

impl Add for Statistics {
    type Output = Statistics;

    fn add(self, other: Statistics) -> Statistics {
        Statistics {
            up_to_date: self.up_to_date + other.up_to_date,
            has_updates: self.has_updates + other.has_updates,
            errors: self.errors + other.errors,
        }
    }
}
