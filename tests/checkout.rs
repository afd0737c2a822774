use crate::common::command::{
    gitlet_commit_files, gitlet_output, head_commit_id, init_repository_dir, run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

mod common;

/// master: a.txt = "v1" then "v2"; branch `other` at the first commit
/// additionally tracks only.txt
#[fixture]
fn branched_repository(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "v1".to_string()));
    gitlet_commit_files(dir, &["a.txt"], "v1");

    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "v2".to_string()));
    gitlet_commit_files(dir, &["a.txt"], "v2");

    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    write_file(FileSpec::new(dir.join("only.txt"), "other".to_string()));
    gitlet_commit_files(dir, &["only.txt"], "only on other");
    run_gitlet_command(dir, &["checkout", "master"]).assert().success();

    init_repository_dir
}

#[rstest]
fn checkout_file_restores_the_head_version(branched_repository: TempDir) {
    let dir = branched_repository.path();
    write_file(FileSpec::new(dir.join("a.txt"), "scratch".to_string()));

    run_gitlet_command(dir, &["checkout", "--", "a.txt"])
        .assert()
        .success()
        .stdout("");

    branched_repository.child("a.txt").assert("v2");
}

#[rstest]
fn checkout_file_from_an_abbreviated_commit_id(branched_repository: TempDir) {
    let dir = branched_repository.path();
    let v1 = gitlet_output(dir, &["find", "v1"]).trim().to_string();

    run_gitlet_command(dir, &["checkout", &v1[..8], "--", "a.txt"])
        .assert()
        .success();

    branched_repository.child("a.txt").assert("v1");
    assert!(gitlet_output(dir, &["status"]).contains("a.txt (modified)"));
}

#[rstest]
fn checkout_file_from_unknown_commit_is_refused(branched_repository: TempDir) {
    run_gitlet_command(branched_repository.path(), &["checkout", "deadbeef", "--", "a.txt"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
}

#[rstest]
fn checkout_branch_replaces_the_working_files(branched_repository: TempDir) {
    let dir = branched_repository.path();

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("a.txt")), "v1");
    assert_eq!(read_file(&dir.join("only.txt")), "other");
    assert!(gitlet_output(dir, &["status"]).contains("*other\n"));

    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    branched_repository
        .child("only.txt")
        .assert(predicate::path::missing());
}

#[rstest]
#[case::unknown("nope", "No such branch exists.\n")]
#[case::current("master", "No need to checkout the current branch.\n")]
fn checkout_branch_preconditions(
    branched_repository: TempDir,
    #[case] branch: &str,
    #[case] expected: &str,
) {
    run_gitlet_command(branched_repository.path(), &["checkout", branch])
        .assert()
        .success()
        .stdout(expected.to_string());
}

#[rstest]
fn checkout_branch_refuses_to_overwrite_untracked_files(branched_repository: TempDir) {
    let dir = branched_repository.path();
    write_file(FileSpec::new(dir.join("only.txt"), "precious".to_string()));

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    branched_repository.child("only.txt").assert("precious");
    branched_repository.child("a.txt").assert("v2");
    assert!(gitlet_output(dir, &["status"]).contains("*master\n"));
}

#[rstest]
fn checkout_branch_clears_the_staging_index(branched_repository: TempDir) {
    let dir = branched_repository.path();
    write_file(FileSpec::new(dir.join("a.txt"), "staged".to_string()));
    run_gitlet_command(dir, &["add", "a.txt"]).assert().success();

    run_gitlet_command(dir, &["checkout", "other"]).assert().success();

    assert!(gitlet_output(dir, &["status"]).contains("=== Staged Files ===\n\n"));
}

#[rstest]
fn reset_moves_the_branch_and_the_working_files(branched_repository: TempDir) {
    let dir = branched_repository.path();
    let v1 = gitlet_output(dir, &["find", "v1"]).trim().to_string();
    write_file(FileSpec::new(dir.join("b.txt"), "b".to_string()));
    gitlet_commit_files(dir, &["b.txt"], "add b");

    run_gitlet_command(dir, &["reset", &v1])
        .assert()
        .success()
        .stdout("");

    assert_eq!(head_commit_id(dir), v1);
    branched_repository.child("a.txt").assert("v1");
    branched_repository
        .child("b.txt")
        .assert(predicate::path::missing());
}

#[rstest]
fn reset_refuses_to_overwrite_untracked_files(branched_repository: TempDir) {
    let dir = branched_repository.path();
    let head = head_commit_id(dir);
    let other_tip = gitlet_output(dir, &["find", "only on other"])
        .trim()
        .to_string();
    write_file(FileSpec::new(dir.join("only.txt"), "precious".to_string()));

    run_gitlet_command(dir, &["reset", &other_tip])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    branched_repository.child("only.txt").assert("precious");
    branched_repository.child("a.txt").assert("v2");
    assert_eq!(head_commit_id(dir), head);
}

#[rstest]
fn reset_to_unknown_commit_is_refused(branched_repository: TempDir) {
    let dir = branched_repository.path();
    let head = head_commit_id(dir);

    run_gitlet_command(dir, &["reset", "0123456789"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");

    assert_eq!(head_commit_id(dir), head);
}
