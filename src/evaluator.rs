//! # Repository Status Evaluator
//!
//! Drives one repository through the status state machine and produces a
//! [`RepoStatus`] record:
//!
//! ```text
//! not a repo ─▶ stop
//! branch? ──▶ unknown ─▶ stop
//! fetch ───▶ failed ──▶ stop
//! behind-count + dirty-check
//!   -1 ─▶ "no tracking branch or error checking", stop
//!    0 ─▶ up to date
//!   >0 ─▶ eligible? ─▶ confirm ─▶ pull ─▶ succeeded / failed
//! ```
//!
//! Steps within one evaluation are strictly sequential; concurrency exists
//! only across evaluations of different repositories (see the scanner).
//! The dirty-check always runs once the fetch succeeds; dirtiness is
//! orthogonal information surfaced regardless of the behind-count.

use std::path::Path;

use log::debug;

use crate::git;
use crate::policy::ScanPolicy;
use crate::prompt::{Confirmer, PullPrompt};
use crate::status::{RepoKind, RepoStatus};

/// Whether a full scan may attempt a pull for this branch/behind-count.
///
/// Only repositories behind on exactly `master` or `main` (case-sensitive)
/// qualify, and only when neither report-only nor the single-update flow
/// is in effect; the update command owns its own prompt and pull.
pub fn should_attempt_pull(policy: &ScanPolicy, branch: &str, behind_by: i32) -> bool {
    behind_by > 0
        && !policy.report_only
        && !policy.single_update
        && (branch == "master" || branch == "main")
}

/// Evaluate one repository, optionally pulling under policy.
///
/// Every failure mode is captured into the returned record; this function
/// never aborts the surrounding scan. The confirmation gate is consulted
/// at most once, and only when a pull is actually eligible.
pub fn evaluate_repository(
    path: &Path,
    kind: RepoKind,
    policy: &ScanPolicy,
    gate: &dyn Confirmer,
) -> RepoStatus {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!("[CHECKING] {} ({})", name, kind);
    debug!("  Path: {}", path.display());

    let mut status = RepoStatus::new(name, kind);
    status.is_repo = git::is_git_repo(path);

    if !status.is_repo {
        status.error = Some("Not a git repository".to_string());
        debug!("  [SKIP] Not a git repository");
        return status;
    }

    debug!("  [STEP] Getting current branch...");
    status.current_branch = git::current_branch(path);
    if status.current_branch.is_empty() {
        status.error = Some("Could not determine branch".to_string());
        debug!("  [ERROR] Could not determine branch");
        return status;
    }
    debug!("  [INFO] Current branch: {}", status.current_branch);

    debug!("  [STEP] Fetching updates from remote...");
    if !git::fetch_remote(path) {
        status.error = Some("Failed to fetch updates".to_string());
        debug!("  [ERROR] Failed to fetch updates");
        return status;
    }

    debug!("  [STEP] Checking commits behind remote...");
    status.behind_by = git::commits_behind(path, &status.current_branch);

    // Dirty-check runs on every repo that survived the fetch, regardless
    // of the behind-count.
    debug!("  [STEP] Checking for uncommitted changes...");
    status.has_uncommitted_changes = git::has_local_modifications(path);
    if status.has_uncommitted_changes {
        debug!("  [WARNING] Repository has uncommitted changes!");
    }

    if status.behind_by > 0 {
        debug!("  [RESULT] Behind by {} commit(s)", status.behind_by);

        if should_attempt_pull(policy, &status.current_branch, status.behind_by) {
            let prompt = PullPrompt {
                name: status.name.clone(),
                kind: status.kind,
                behind_by: status.behind_by,
                has_uncommitted_changes: status.has_uncommitted_changes,
            };

            if gate.confirm(&prompt) {
                debug!("  [STEP] Performing git pull...");
                match git::pull(path) {
                    Ok(()) => {
                        status.pulled = true;
                        debug!("  [SUCCESS] Git pull completed");
                    }
                    Err(detail) => {
                        debug!("  [ERROR] Git pull failed: {}", detail);
                        status.pull_error = Some(detail);
                    }
                }
            } else {
                // Declined: the record keeps reporting updates available.
                debug!("  [INFO] User declined pull");
            }
        }
    } else if status.behind_by < 0 {
        status.error = Some("No tracking branch or error checking".to_string());
        debug!("  [WARNING] No tracking branch or error checking");
    } else {
        debug!("  [RESULT] Up to date");
    }

    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Gate that answers from a script and counts how often it was asked.
    struct ScriptedGate {
        answer: bool,
        asked: AtomicUsize,
    }

    impl ScriptedGate {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                asked: AtomicUsize::new(0),
            }
        }

        fn times_asked(&self) -> usize {
            self.asked.load(Ordering::SeqCst)
        }
    }

    impl Confirmer for ScriptedGate {
        fn confirm(&self, _prompt: &PullPrompt) -> bool {
            self.asked.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    #[test]
    fn test_report_only_never_pulls() {
        let policy = ScanPolicy::scan(false, true, false);
        assert!(!should_attempt_pull(&policy, "master", 1));
        assert!(!should_attempt_pull(&policy, "main", 100));
    }

    #[test]
    fn test_single_update_mode_never_auto_pulls() {
        let policy = ScanPolicy::single_update(false, true);
        assert!(!should_attempt_pull(&policy, "master", 5));
    }

    #[test]
    fn test_only_master_or_main_are_eligible() {
        let policy = ScanPolicy::scan(false, false, true);
        assert!(should_attempt_pull(&policy, "master", 1));
        assert!(should_attempt_pull(&policy, "main", 1));
        assert!(!should_attempt_pull(&policy, "feature-x", 5));
        assert!(!should_attempt_pull(&policy, "Master", 5));
        assert!(!should_attempt_pull(&policy, "main ", 5));
    }

    #[test]
    fn test_never_eligible_when_not_behind() {
        let policy = ScanPolicy::scan(false, false, true);
        assert!(!should_attempt_pull(&policy, "master", 0));
        assert!(!should_attempt_pull(&policy, "master", -1));
    }

    #[test]
    fn test_non_repo_directory_short_circuits() {
        let temp = TempDir::new().unwrap();
        let policy = ScanPolicy::scan(false, false, true);
        let gate = ScriptedGate::new(true);

        let status = evaluate_repository(temp.path(), RepoKind::Extension, &policy, &gate);

        assert!(!status.is_repo);
        assert_eq!(status.error.as_deref(), Some("Not a git repository"));
        assert!(status.current_branch.is_empty());
        assert_eq!(status.behind_by, 0);
        assert!(!status.pulled);
        assert!(status.pull_error.is_none());
        // Evaluation stopped before the pull decision; no prompt issued.
        assert_eq!(gate.times_asked(), 0);
    }

    #[test]
    fn test_record_uses_directory_base_name() {
        let temp = TempDir::new().unwrap();
        let repo_dir = temp.path().join("WikimediaEvents");
        std::fs::create_dir(&repo_dir).unwrap();

        let policy = ScanPolicy::scan(false, true, false);
        let gate = ScriptedGate::new(false);
        let status = evaluate_repository(&repo_dir, RepoKind::Extension, &policy, &gate);

        assert_eq!(status.name, "WikimediaEvents");
        assert_eq!(status.kind, RepoKind::Extension);
    }

    #[test]
    fn test_pulled_and_pull_error_mutually_exclusive_invariant() {
        // The record construction paths can only set one of the two; this
        // guards the invariant on the terminal states reachable here.
        let temp = TempDir::new().unwrap();
        let policy = ScanPolicy::scan(false, false, true);
        let gate = ScriptedGate::new(true);

        let status = evaluate_repository(temp.path(), RepoKind::Skin, &policy, &gate);
        assert!(!(status.pulled && status.pull_error.is_some()));
    }
}
