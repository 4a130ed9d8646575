//! End-to-end tests for the `update` command

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::Installation;

fn mw_sync() -> Command {
    Command::cargo_bin("mw-sync").unwrap()
}

/// Test that --help shows help information
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_update_help() {
    mw_sync()
        .arg("update")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Update a single component"));
}

/// An extension that is behind gets pulled with --yes and exits 0.
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_update_extension_pulls_when_behind() {
    let temp = assert_fs::TempDir::new().unwrap();
    let install = Installation::new(temp.path());
    let extension = install.add_extension("Cite", "master", 2);

    mw_sync()
        .arg("update")
        .arg("extension")
        .arg("Cite")
        .arg(&install.root)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commits behind: 2"))
        .stdout(predicate::str::contains("Successfully updated!"));

    let readme = std::fs::read_to_string(extension.join("README.md")).unwrap();
    assert_eq!(readme, "upstream rev 3\n");
}

/// A component with nothing to pull reports up to date and exits 0.
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_update_skin_already_up_to_date() {
    let temp = assert_fs::TempDir::new().unwrap();
    let install = Installation::new(temp.path());
    install.add_skin("Vector", "main", 0);

    mw_sync()
        .arg("update")
        .arg("skin")
        .arg("Vector")
        .arg(&install.root)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking skin 'Vector'"))
        .stdout(predicate::str::contains("Already up to date!"));
}

/// `update core` needs no name and targets the installation root itself.
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_update_core_targets_root() {
    let temp = assert_fs::TempDir::new().unwrap();
    let install = Installation::new(temp.path());

    mw_sync()
        .arg("update")
        .arg("core")
        .arg(&install.root)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking MediaWiki core"))
        .stdout(predicate::str::contains("Branch: master"));
}

/// Update mode never pulls a branch-ineligible repository on its own;
/// but unlike the scan it *does* offer the pull off master/main too,
/// mirroring the direct, operator-driven intent of the command.
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_update_pulls_feature_branch_on_request() {
    let temp = assert_fs::TempDir::new().unwrap();
    let install = Installation::new(temp.path());
    let extension = install.add_extension("Sandbox", "feature-x", 1);

    mw_sync()
        .arg("update")
        .arg("extension")
        .arg("Sandbox")
        .arg(&install.root)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully updated!"));

    let readme = std::fs::read_to_string(extension.join("README.md")).unwrap();
    assert_eq!(readme, "upstream rev 2\n");
}

/// A failing pull surfaces git's own output and exits 1.
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_update_pull_failure_exits_nonzero() {
    let temp = assert_fs::TempDir::new().unwrap();
    let install = Installation::new(temp.path());
    let extension = install.add_extension("Cite", "master", 1);

    // Uncommitted local edits to a file the incoming commit touches make
    // git refuse the pull ("error: Your local changes ...").
    std::fs::write(extension.join("README.md"), "local edit\n").unwrap();

    mw_sync()
        .arg("update")
        .arg("extension")
        .arg("Cite")
        .arg(&install.root)
        .arg("--yes")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Pull failed"));

    // Prior state retained.
    let readme = std::fs::read_to_string(extension.join("README.md")).unwrap();
    assert_eq!(readme, "local edit\n");
}
