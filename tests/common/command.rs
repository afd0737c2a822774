use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Fixed commit timestamp so runs are reproducible
pub const FIXED_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("GITLET_DATE", FIXED_DATE)]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Run a command and return its stdout
pub fn gitlet_output(dir: &Path, args: &[&str]) -> String {
    let output = run_gitlet_command(dir, args)
        .output()
        .expect("Failed to run gitlet");
    assert!(output.status.success(), "gitlet {args:?} failed: {output:?}");

    String::from_utf8(output.stdout).expect("gitlet printed invalid UTF-8")
}

/// Stage `files` and commit them with `message`
pub fn gitlet_commit_files(dir: &Path, files: &[&str], message: &str) {
    for file in files {
        run_gitlet_command(dir, &["add", file])
            .assert()
            .success()
            .stdout("");
    }
    run_gitlet_command(dir, &["commit", message])
        .assert()
        .success()
        .stdout("");
}

/// Id of the commit the current branch points at
pub fn head_commit_id(dir: &Path) -> String {
    let metadata_dir = dir.join(".gitlet");
    let head = std::fs::read_to_string(metadata_dir.join("HEAD")).expect("Failed to read HEAD");
    let branch = head
        .trim()
        .strip_prefix("ref: ")
        .expect("HEAD is not a symbolic ref");

    std::fs::read_to_string(metadata_dir.join(branch))
        .expect("Failed to read branch ref")
        .trim()
        .to_string()
}

/// Every `commit <id>` line of a log listing, in order
pub fn logged_commit_ids(log: &str) -> Vec<String> {
    log.lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}
