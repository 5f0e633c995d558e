mod common;

use assert_fs::TempDir;
use common::command::{init_repository_dir, run_jot_command};
use common::file::{FileSpec, write_file};
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn test_rm_untracked_unstaged_file_is_rejected(init_repository_dir: TempDir) {
    write_file(FileSpec::new(
        init_repository_dir.path().join("stray.txt"),
        "stray".to_string(),
    ));

    run_jot_command(init_repository_dir.path(), &["rm", "stray.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No reason to remove the file."));

    // the file itself is left alone
    assert!(init_repository_dir.path().join("stray.txt").is_file());
}

#[rstest]
fn test_rm_unstages_without_touching_an_untracked_file(init_repository_dir: TempDir) {
    write_file(FileSpec::new(
        init_repository_dir.path().join("c.txt"),
        "three".to_string(),
    ));
    run_jot_command(init_repository_dir.path(), &["add", "c.txt"])
        .assert()
        .success();

    run_jot_command(init_repository_dir.path(), &["rm", "c.txt"])
        .assert()
        .success();

    assert!(init_repository_dir.path().join("c.txt").is_file());
    run_jot_command(init_repository_dir.path(), &["commit", "nothing staged"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes added to the commit."));
}

#[rstest]
fn test_rm_tracked_file_deletes_and_marks_it(init_repository_dir: TempDir) {
    run_jot_command(init_repository_dir.path(), &["rm", "a.txt"])
        .assert()
        .success();

    assert!(!init_repository_dir.path().join("a.txt").exists());
    run_jot_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\na.txt"));
}
