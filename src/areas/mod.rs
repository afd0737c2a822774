//! Persistent areas of a repository
//!
//! - `database`: Content-addressed store for blobs and commits
//! - `index`: Staging area for the next commit
//! - `refs`: Branch tips and the current branch (HEAD)
//! - `remotes`: Registry of named remote repositories
//! - `repository`: Bundles the areas of one working directory
//! - `workspace`: The working directory's plain files

pub(crate) mod database;
pub(crate) mod index;
pub(crate) mod refs;
pub(crate) mod remotes;
pub mod repository;
pub(crate) mod workspace;
