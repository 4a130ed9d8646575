//! Shared fixtures for the CLI end-to-end tests.
//!
//! Builds throwaway MediaWiki-shaped installation trees whose components
//! are real git repositories with filesystem-path remotes, so fetch and
//! pull work without any network access.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run one git command in `dir`, panicking on failure; fixture setup
/// must not fail silently.
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "fixture")
        .env("GIT_AUTHOR_EMAIL", "fixture@example.org")
        .env("GIT_COMMITTER_NAME", "fixture")
        .env("GIT_COMMITTER_EMAIL", "fixture@example.org")
        .output()
        .expect("git must be runnable for integration tests");
    assert!(
        output.status.success(),
        "git {:?} failed in {}: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Lay down the marker files that make a directory look like an
/// installation root.
pub fn make_installation_markers(root: &Path) {
    fs::write(root.join("index.php"), "<?php\n").unwrap();
    fs::write(root.join("api.php"), "<?php\n").unwrap();
    for dir in ["includes", "extensions", "skins"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
}

/// Create an upstream repository on `branch` with one initial commit.
pub fn make_upstream(path: &Path, branch: &str) {
    fs::create_dir_all(path).unwrap();
    git(path, &["init", "-b", branch]);
    fs::write(path.join("README.md"), "upstream\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "initial"]);
}

/// Add `count` commits to an upstream repository.
pub fn advance_upstream(path: &Path, count: usize) {
    for i in 0..count {
        fs::write(path.join("README.md"), format!("upstream rev {}\n", i + 2)).unwrap();
        git(path, &["add", "."]);
        git(path, &["commit", "-m", &format!("change {}", i + 1)]);
    }
}

/// Clone `upstream` into `target`; afterwards `target` tracks it as
/// `origin` over the filesystem.
pub fn clone_component(upstream: &Path, target: &Path) {
    let parent = target.parent().unwrap();
    fs::create_dir_all(parent).unwrap();
    git(
        parent,
        &[
            "clone",
            upstream.to_str().unwrap(),
            target.file_name().unwrap().to_str().unwrap(),
        ],
    );
}

/// A complete fixture: installation root plus upstream repositories.
pub struct Installation {
    pub root: PathBuf,
    upstreams: PathBuf,
}

impl Installation {
    /// An installation whose root directory is itself a cloned git
    /// repository (the core checkout), with marker files committed.
    pub fn new(base: &Path) -> Self {
        let upstreams = base.join("upstreams");
        let core_upstream = upstreams.join("core");
        fs::create_dir_all(&core_upstream).unwrap();
        git(&core_upstream, &["init", "-b", "master"]);
        make_installation_markers(&core_upstream);
        // Git does not track empty directories; keep the markers cloneable.
        for dir in ["includes", "extensions", "skins"] {
            fs::write(core_upstream.join(dir).join(".gitkeep"), "").unwrap();
        }
        git(&core_upstream, &["add", "."]);
        git(&core_upstream, &["commit", "-m", "initial core"]);

        let root = base.join("wiki");
        clone_component(&core_upstream, &root);

        Self { root, upstreams }
    }

    /// Add an extension clone that is `behind` commits behind its
    /// upstream on `branch`.
    pub fn add_extension(&self, name: &str, branch: &str, behind: usize) -> PathBuf {
        self.add_component("extensions", name, branch, behind)
    }

    /// Add a skin clone that is `behind` commits behind its upstream.
    pub fn add_skin(&self, name: &str, branch: &str, behind: usize) -> PathBuf {
        self.add_component("skins", name, branch, behind)
    }

    /// Path of this installation's upstream for `name`.
    pub fn upstream(&self, name: &str) -> PathBuf {
        self.upstreams.join(name)
    }

    fn add_component(&self, section: &str, name: &str, branch: &str, behind: usize) -> PathBuf {
        let upstream = self.upstreams.join(name);
        make_upstream(&upstream, branch);

        let target = self.root.join(section).join(name);
        clone_component(&upstream, &target);

        if behind > 0 {
            advance_upstream(&upstream, behind);
        }
        target
    }
}
