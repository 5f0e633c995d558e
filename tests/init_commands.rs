mod common;

use assert_fs::TempDir;
use common::command::{head_commit_id, repository_dir, run_jot_command};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn test_init_creates_repository_layout(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    assert!(repository_dir.path().join(".jot").is_dir());
    assert!(repository_dir.path().join(".jot/blobs").is_dir());
    assert!(repository_dir.path().join(".jot/staging").is_dir());
    assert!(repository_dir.path().join(".jot/state.json").is_file());
}

#[rstest]
fn test_init_refuses_to_reinitialize(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "A jot version-control system already exists in the current directory.",
        ));
}

#[rstest]
fn test_initial_commit_is_deterministic(
    #[from(repository_dir)] first_dir: TempDir,
    #[from(repository_dir)] second_dir: TempDir,
) {
    run_jot_command(first_dir.path(), &["init"]).assert().success();
    run_jot_command(second_dir.path(), &["init"]).assert().success();

    assert_eq!(
        head_commit_id(first_dir.path()),
        head_commit_id(second_dir.path())
    );
}

#[rstest]
fn test_initial_commit_sits_on_master(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_jot_command(repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initial commit"));

    run_jot_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*master"));
}

#[rstest]
fn test_commands_require_an_initialized_repository(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Not in an initialized jot directory.",
        ));
}
