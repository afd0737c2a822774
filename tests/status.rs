use crate::common::command::{gitlet_commit_files, gitlet_output, init_repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn status_of_a_fresh_repository(init_repository_dir: TempDir) {
    assert_eq!(
        gitlet_output(init_repository_dir.path(), &["status"]),
        "=== Branches ===\n\
         *master\n\
         \n\
         === Staged Files ===\n\
         \n\
         === Removed Files ===\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         \n\
         === Untracked Files ===\n\
         \n"
    );
}

#[rstest]
fn status_reports_every_section(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    for (name, content) in [("kept.txt", "k"), ("edited.txt", "e"), ("gone.txt", "g"), ("removed.txt", "r")] {
        write_file(FileSpec::new(dir.join(name), content.to_string()));
    }
    gitlet_commit_files(
        dir,
        &["kept.txt", "edited.txt", "gone.txt", "removed.txt"],
        "tracked",
    );
    run_gitlet_command(dir, &["branch", "other-branch"]).assert().success();

    write_file(FileSpec::new(dir.join("edited.txt"), "changed".to_string()));
    std::fs::remove_file(dir.join("gone.txt")).unwrap();
    run_gitlet_command(dir, &["rm", "removed.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("staged.txt"), "s".to_string()));
    run_gitlet_command(dir, &["add", "staged.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("staged.txt"), "s, edited".to_string()));
    write_file(FileSpec::new(dir.join("random.stuff"), "?".to_string()));

    assert_eq!(
        gitlet_output(dir, &["status"]),
        "=== Branches ===\n\
         *master\n\
         other-branch\n\
         \n\
         === Staged Files ===\n\
         staged.txt\n\
         \n\
         === Removed Files ===\n\
         removed.txt\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         edited.txt (modified)\n\
         gone.txt (deleted)\n\
         staged.txt (modified)\n\
         \n\
         === Untracked Files ===\n\
         random.stuff\n\
         \n"
    );
}

#[rstest]
fn status_ignores_subdirectories(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    std::fs::create_dir(dir.join("nested")).unwrap();
    write_file(FileSpec::new(dir.join("nested").join("inner.txt"), "x".to_string()));

    let status = gitlet_output(dir, &["status"]);

    assert!(status.ends_with("=== Untracked Files ===\n\n"));
}
