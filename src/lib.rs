//! # mw-sync Library
//!
//! Core functionality for auditing a MediaWiki installation whose pieces
//! (the core checkout plus every extension and skin) are independently
//! version-controlled git clones. Each run is a stateless point-in-time
//! audit: every component is driven through the same status state machine
//! (branch detection → fetch → behind-count → dirty-check → conditional
//! pull) and the results are folded into one report.
//!
//! ## Quick Example
//!
//! ```no_run
//! use mw_sync::policy::ScanPolicy;
//! use mw_sync::prompt::InteractiveGate;
//! use mw_sync::scanner::scan_directory;
//! use mw_sync::status::{RepoKind, Statistics};
//! use std::path::Path;
//!
//! let policy = ScanPolicy::scan(false, true, false);
//! let gate = InteractiveGate::new(policy.auto_yes);
//!
//! let extensions = scan_directory(
//!     Path::new("/srv/wiki/extensions"),
//!     RepoKind::Extension,
//!     &policy,
//!     &gate,
//!     None,
//! );
//! let stats = Statistics::from_results(&extensions);
//! println!("{} extensions behind their remote", stats.has_updates);
//! ```
//!
//! ## Core Concepts
//!
//! - **Status model (`status`)**: the `RepoStatus` record one evaluation
//!   produces, the component kinds, and the summary statistics fold.
//! - **Policy (`policy`)**: one immutable `ScanPolicy` value carries every
//!   run-wide toggle; it is shared read-only across all scan workers.
//! - **Adapter (`git`)**: single blocking git operations against one
//!   repository path, with the historical error/fatal output heuristic.
//! - **Evaluator (`evaluator`)**: the per-repository state machine, and the
//!   policy decision of whether a pull may even be attempted.
//! - **Gate (`prompt`)**: the serialized confirmation prompt consulted
//!   before any pull; auto-yes policy short-circuits it.
//! - **Scanner (`scanner`)**: bounded-parallel evaluation of every
//!   repository under a directory, capped at the hardware thread budget.
//! - **Reporting (`report`, `output`)**: pure renderers for the tables and
//!   summary, plus the console/report-file sink.
//!
//! ## Failure Philosophy
//!
//! A repository failing to evaluate never aborts the scan of its siblings;
//! the failure becomes part of that repository's record. Only structural
//! problems (an invalid installation path, bad update arguments, a failed
//! single-target pull) abort the run, via [`error::Error`].

pub mod error;
pub mod evaluator;
pub mod git;
pub mod installation;
pub mod output;
pub mod policy;
pub mod prompt;
pub mod report;
pub mod scanner;
pub mod status;

pub use error::{Error, Result};
