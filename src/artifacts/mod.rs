//! Gitlet data structures and algorithms
//!
//! - `branch`: Branch names and the branch table
//! - `checkout`: Working directory migration between commits
//! - `core`: Terminal output helpers (pager)
//! - `index`: Staging index entry format and checksum
//! - `log`: Commit history records
//! - `merge`: Split point search and three-way file resolution
//! - `objects`: Object types (blob, commit) and their ids
//! - `status`: Status report

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
