//! # Scan Policy
//!
//! A single immutable value holding every run-wide behavior toggle. It is
//! constructed once from the parsed CLI arguments and passed by shared
//! reference into every scanner and evaluator call; nothing mutates it
//! after construction, so it is safe to share across scan workers.

/// Run-wide behavior toggles, fixed for the duration of one invocation.
#[derive(Debug, Clone, Default)]
pub struct ScanPolicy {
    /// Trace every evaluation step (wired to the log filter by the CLI).
    pub verbose: bool,
    /// Never attempt a pull, regardless of branch or behind-count.
    pub report_only: bool,
    /// Assume an affirmative answer to every pull prompt, without output.
    pub auto_yes: bool,
    /// Set while running the single-target `update` flow. The evaluator
    /// never auto-pulls in this mode; the update command owns the prompt
    /// and the pull.
    pub single_update: bool,
}

impl ScanPolicy {
    /// Policy for a full scan.
    pub fn scan(verbose: bool, report_only: bool, auto_yes: bool) -> Self {
        Self {
            verbose,
            report_only,
            auto_yes,
            single_update: false,
        }
    }

    /// Policy for the single-target update flow.
    pub fn single_update(verbose: bool, auto_yes: bool) -> Self {
        Self {
            verbose,
            report_only: false,
            auto_yes,
            single_update: true,
        }
    }
}
