use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one commit tracking `a.txt` ("one") and `b.txt` ("two")
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("b.txt"),
        "two".to_string(),
    ));

    run_jot_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_jot_command(repository_dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    run_jot_command(repository_dir.path(), &["commit", "Initial files"])
        .assert()
        .success();

    repository_dir
}

pub fn run_jot_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("jot").expect("Failed to find jot binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// The full id of the commit currently checked out, parsed from `log`
pub fn head_commit_id(dir: &Path) -> String {
    let output = run_jot_command(dir, &["log"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(output)
        .expect("log output is not valid UTF-8")
        .lines()
        .find_map(|line| line.strip_prefix("commit ").map(str::to_string))
        .expect("log output contains no commit line")
}
