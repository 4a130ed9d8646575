//! # Version-Control Adapter
//!
//! Thin wrappers around single `git` invocations against one repository
//! path. Each operation is blocking, performs exactly one action, carries
//! no retry, and surfaces failures as-is for the caller to interpret.
//!
//! This uses the system git command, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! Success of `fetch` and `pull` is judged by the absence of the literal
//! substrings `error` / `fatal` (case-sensitive) in the combined output,
//! not by the exit code. This heuristic is kept deliberately for
//! compatibility with how these repositories have always been audited; git
//! as used here offers no structured exit-status contract worth trusting
//! more than its own wording.

use std::path::Path;
use std::process::Command;

use log::debug;

/// Captured output of one git invocation.
struct GitOutput {
    stdout: String,
    stderr: String,
}

impl GitOutput {
    /// stdout followed by stderr, the closest analogue of `2>&1` capture.
    fn combined(&self) -> String {
        let mut combined = self.stdout.clone();
        combined.push_str(&self.stderr);
        combined
    }
}

/// Run one git command in `path`, capturing stdout and stderr.
///
/// A spawn failure (git missing from PATH, unreadable directory) yields
/// empty output; every caller already treats empty output as the
/// corresponding failure state.
fn run_git(path: &Path, args: &[&str]) -> GitOutput {
    debug!("  [CMD] git {} (in {})", args.join(" "), path.display());

    let output = match Command::new("git").args(args).current_dir(path).output() {
        Ok(output) => output,
        Err(e) => {
            debug!("  [ERROR] Failed to execute git: {}", e);
            return GitOutput {
                stdout: String::new(),
                stderr: String::new(),
            };
        }
    };

    let result = GitOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if !result.stdout.is_empty() {
        debug!("  [OUTPUT] {}", result.stdout.trim_end());
    }
    result
}

/// Whether the combined output of a fetch/pull signals failure.
///
/// Case-sensitive on purpose: git's own diagnostics use lowercase
/// `error:` / `fatal:` prefixes.
pub fn output_indicates_failure(output: &str) -> bool {
    output.contains("error") || output.contains("fatal")
}

/// Parse a `rev-list --count` result; `-1` when no integer is present.
///
/// Covers "no such remote branch" and transient failures alike. The two
/// causes are indistinguishable from here and no attempt is made to
/// separate them.
pub fn parse_behind_count(output: &str) -> i32 {
    output.trim().parse().unwrap_or(-1)
}

/// Check whether a directory is a git repository (has a `.git` entry).
pub fn is_git_repo(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Current branch name, trimmed; empty on failure.
pub fn current_branch(path: &Path) -> String {
    let output = run_git(path, &["rev-parse", "--abbrev-ref", "HEAD"]);
    output.stdout.trim().to_string()
}

/// Fetch from the remote. Success is the absence of error/fatal markers
/// in the combined output.
pub fn fetch_remote(path: &Path) -> bool {
    let output = run_git(path, &["fetch"]);
    !output_indicates_failure(&output.combined())
}

/// Number of commits `origin/<branch>` has that HEAD lacks; `-1` when
/// undetermined.
pub fn commits_behind(path: &Path, branch: &str) -> i32 {
    let range = format!("HEAD..origin/{}", branch);
    let output = run_git(path, &["rev-list", "--count", &range]);
    parse_behind_count(&output.stdout)
}

/// Whether the working tree has any uncommitted change.
pub fn has_local_modifications(path: &Path) -> bool {
    let output = run_git(path, &["status", "--porcelain"]);
    !output.stdout.trim().is_empty()
}

/// Pull from the remote. On failure the combined output is returned so
/// the caller can surface the detail.
pub fn pull(path: &Path) -> Result<(), String> {
    let output = run_git(path, &["pull"]);
    let combined = output.combined();
    if output_indicates_failure(&combined) {
        Err(combined)
    } else {
        Ok(())
    }
}
