//! # Confirmation Gate
//!
//! The single serialization point for operator interaction during a scan.
//! Evaluations run in parallel, but at most one pull prompt may be on the
//! terminal at a time and it must never interleave with the progress bar.
//!
//! The gate is a small trait so the evaluator can be exercised in tests
//! with scripted decisions instead of a terminal.

use std::sync::Mutex;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use indicatif::ProgressBar;
use log::debug;

use crate::status::RepoKind;

/// Context rendered into a pull confirmation prompt.
#[derive(Debug, Clone)]
pub struct PullPrompt {
    pub name: String,
    pub kind: RepoKind,
    pub behind_by: i32,
    pub has_uncommitted_changes: bool,
}

impl PullPrompt {
    /// The prompt text: repository, kind, behind-count, and a warning when
    /// the working tree is dirty.
    pub fn message(&self) -> String {
        let mut message = format!(
            "Pull updates for '{}' ({}, {} commit{} behind)",
            self.name,
            self.kind,
            self.behind_by,
            if self.behind_by > 1 { "s" } else { "" }
        );
        if self.has_uncommitted_changes {
            message.push_str("\n  ⚠️  WARNING: Has uncommitted changes!");
        }
        message
    }
}

/// Decides whether a proposed pull goes ahead.
pub trait Confirmer: Sync {
    fn confirm(&self, prompt: &PullPrompt) -> bool;
}

/// Production gate: auto-yes policy short-circuits silently, otherwise a
/// single interactive yes/no prompt (default No) is shown.
///
/// An internal mutex serializes concurrent callers; when a progress bar is
/// attached the prompt is rendered under [`ProgressBar::suspend`] so the
/// bar redraw never garbles the question. The lock is held only for the
/// duration of the prompt itself, never across a git invocation.
pub struct InteractiveGate {
    auto_yes: bool,
    progress: Option<ProgressBar>,
    prompt_lock: Mutex<()>,
}

impl InteractiveGate {
    pub fn new(auto_yes: bool) -> Self {
        Self {
            auto_yes,
            progress: None,
            prompt_lock: Mutex::new(()),
        }
    }

    /// Attach the progress bar whose redraws must pause during prompts.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    fn ask(&self, prompt: &PullPrompt) -> bool {
        // A poisoned lock means another prompt panicked; declining is the
        // safe answer either way.
        let Ok(_guard) = self.prompt_lock.lock() else {
            return false;
        };
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.message())
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

impl Confirmer for InteractiveGate {
    fn confirm(&self, prompt: &PullPrompt) -> bool {
        if self.auto_yes {
            debug!("  [INFO] Auto-confirming pull for '{}'", prompt.name);
            return true;
        }

        match &self.progress {
            Some(bar) => bar.suspend(|| self.ask(prompt)),
            None => self.ask(prompt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_message_singular_commit() {
        let prompt = PullPrompt {
            name: "Vector".to_string(),
            kind: RepoKind::Skin,
            behind_by: 1,
            has_uncommitted_changes: false,
        };
        let message = prompt.message();
        assert!(message.contains("Pull updates for 'Vector'"));
        assert!(message.contains("skin, 1 commit behind"));
        assert!(!message.contains("WARNING"));
    }

    #[test]
    fn test_prompt_message_plural_with_warning() {
        let prompt = PullPrompt {
            name: "Echo".to_string(),
            kind: RepoKind::Extension,
            behind_by: 5,
            has_uncommitted_changes: true,
        };
        let message = prompt.message();
        assert!(message.contains("extension, 5 commits behind"));
        assert!(message.contains("WARNING: Has uncommitted changes!"));
    }

    #[test]
    fn test_auto_yes_confirms_without_terminal() {
        // No TTY in the test environment; auto-yes must not touch one.
        let gate = InteractiveGate::new(true);
        let prompt = PullPrompt {
            name: "core".to_string(),
            kind: RepoKind::Core,
            behind_by: 2,
            has_uncommitted_changes: false,
        };
        assert!(gate.confirm(&prompt));
    }
}
