//! Domain errors
//!
//! Every policy violation a command can hit is a variant of [`GitletError`].
//! The `Display` text is exactly what the user sees; the dispatcher prints it
//! and returns cleanly instead of aborting the process.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GitletError {
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("File does not exist.")]
    FileNotFound,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("No reason to remove the file.")]
    NoReasonToRemove,
    #[error("No changes added to the commit.")]
    NothingToCommit,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,
    #[error("No such branch exists.")]
    NoSuchBranch,
    #[error("A branch with that name does not exist.")]
    BranchNotFound,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("Invalid branch name.")]
    InvalidBranchName,
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    SelfMerge,
    #[error("A remote with that name already exists.")]
    RemoteExists,
    #[error("A remote with that name does not exist.")]
    NoSuchRemote,
    #[error("Remote directory not found.")]
    RemoteNotFound,
    #[error("That remote does not have that branch.")]
    RemoteBranchNotFound,
    #[error("Please pull down remote changes before pushing.")]
    NonFastForward,
    #[error("Incorrect operands.")]
    IncorrectOperands,
}

impl GitletError {
    /// Find a domain error anywhere in an `anyhow` error chain
    pub fn find_in(error: &anyhow::Error) -> Option<&GitletError> {
        error.chain().find_map(|cause| cause.downcast_ref::<GitletError>())
    }
}
