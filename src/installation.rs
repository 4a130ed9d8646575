//! # Installation Layout
//!
//! Recognizes a MediaWiki installation root and resolves the paths of its
//! managed components. Validation happens once at the front of a run; the
//! scan and update flows assume a validated root afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::status::RepoKind;

/// Whether a directory looks like a MediaWiki installation.
///
/// The markers are the core entry points plus the three directories every
/// installation ships with. Checked together so a bare git clone of
/// something unrelated is not mistaken for a wiki.
pub fn is_installation_root(path: &Path) -> bool {
    path.join("index.php").is_file()
        && path.join("api.php").is_file()
        && path.join("includes").is_dir()
        && path.join("extensions").is_dir()
        && path.join("skins").is_dir()
}

/// Validate an installation path, returning it as owned on success.
///
/// Fails with a structural error (exit code 1) when the path is missing,
/// not a directory, or not recognized as an installation root.
pub fn validate_root(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(Error::InvalidPath {
            path: path.to_path_buf(),
        });
    }
    if !is_installation_root(path) {
        return Err(Error::NotAnInstallation {
            path: path.to_path_buf(),
        });
    }
    Ok(path.to_path_buf())
}

/// Directory holding all extension checkouts.
pub fn extensions_dir(root: &Path) -> PathBuf {
    root.join("extensions")
}

/// Directory holding all skin checkouts.
pub fn skins_dir(root: &Path) -> PathBuf {
    root.join("skins")
}

/// Resolve the repository path of one component for single-update mode.
///
/// Core resolves to the installation root itself; extensions and skins
/// resolve to their named subdirectory, which must exist and be a
/// directory.
pub fn component_path(root: &Path, kind: RepoKind, name: &str) -> Result<PathBuf> {
    let path = match kind {
        RepoKind::Core => root.to_path_buf(),
        RepoKind::Extension => extensions_dir(root).join(name),
        RepoKind::Skin => skins_dir(root).join(name),
    };

    if !path.exists() {
        return Err(Error::ComponentNotFound {
            component: kind.describe(name),
            path,
        });
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory { path });
    }
    Ok(path)
}

/// Count the immediate subdirectories of a path; zero when it is absent.
/// Hidden directories are excluded, matching what the scanner visits, so
/// the "Checking extensions (N)..." banner agrees with the record count.
pub fn count_subdirectories(path: &Path) -> usize {
    match fs::read_dir(path) {
        Ok(entries) => entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
            .count(),
        Err(_) => 0,
    }
}
