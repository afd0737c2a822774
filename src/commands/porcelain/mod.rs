//! User-facing commands
//!
//! Each command is an `impl Repository` block operating on the in-memory
//! state loaded by [`Repository::open`](crate::areas::repository::Repository::open).
//! The caller persists that state once the command returns successfully.
//!
//! ## Commands
//!
//! - `init`: Create a repository with its initial commit
//! - `add`, `rm`: Stage files for addition or removal
//! - `commit`: Record the staged snapshot
//! - `log`, `global-log`, `find`: Browse history
//! - `status`: Show branches, staging and working directory state
//! - `checkout`, `reset`: Restore files, switch branches, move the branch
//! - `branch`, `rm-branch`: Manage branch pointers
//! - `merge`: Three-way merge of another branch
//! - `add-remote`, `rm-remote`, `push`, `fetch`, `pull`: Exchange history
//!   with repositories on the same filesystem

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod remote;
pub mod reset;
pub mod rm;
pub mod status;
