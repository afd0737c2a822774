//! Checkout operations
//!
//! Switching the working directory to another commit's snapshot is planned
//! as a [`migration::Migration`] and only applied once the untracked-file
//! check has passed.

pub mod migration;
