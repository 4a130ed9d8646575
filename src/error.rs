//! # Error Handling
//!
//! This module defines the centralized error type for `mw-sync`. It uses the
//! `thiserror` library to model the structural failure modes of a run: the
//! ones that abort the process with a non-zero exit code.
//!
//! Per-repository failures (not a git repo, undetermined branch, failed
//! fetch, failed pull during a full scan) are deliberately *not* represented
//! here: they are captured inside [`crate::status::RepoStatus`] records and
//! surfaced in the aggregate report without aborting the scan. Only failures
//! outside any single repository (an invalid installation path, bad
//! single-update arguments, or a pull failure in single-update mode) become
//! `Error` values that bubble up to `main`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for mw-sync structural failures
#[derive(Error, Debug)]
pub enum Error {
    /// The given path does not look like a MediaWiki installation root.
    ///
    /// Raised when the expected marker files/directories (index.php,
    /// api.php, includes/, extensions/, skins/) are missing.
    #[error("Directory does not appear to be a MediaWiki installation: {}\nExpected files/directories not found (index.php, api.php, includes/, extensions/, skins/)", path.display())]
    NotAnInstallation { path: PathBuf },

    /// The installation path is missing or is not a directory.
    #[error("Invalid MediaWiki installation path: {}", path.display())]
    InvalidPath { path: PathBuf },

    /// An unrecognized component kind token was given to `update`.
    #[error("Invalid type '{kind}'. Must be 'core', 'extension', or 'skin'")]
    InvalidKind { kind: String },

    /// `update extension`/`update skin` was invoked without a component name.
    #[error("Update type '{kind}' requires a component name")]
    MissingName { kind: String },

    /// The requested component does not exist under the installation.
    #[error("{} not found at: {}", component, path.display())]
    ComponentNotFound { component: String, path: PathBuf },

    /// The component path exists but is not a directory.
    #[error("Path exists but is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// A repository evaluation stopped before the pull decision in
    /// single-update mode (not a repo, unknown branch, fetch failure).
    #[error("{message}")]
    Evaluation { message: String },

    /// A pull was attempted in single-update mode and failed.
    #[error("Pull failed:\n{detail}")]
    PullFailed { detail: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
