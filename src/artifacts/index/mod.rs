//! Staging index file format
//!
//! ```text
//! add <blob-id> <file name>
//! rm <blob-id> <file name>
//! <sha1 of all preceding bytes>
//! ```
//!
//! Entries are sorted by file name, additions before removals. The trailing
//! checksum line guards against truncated or hand-edited index files.

pub mod checksum;
pub mod index_entry;

/// Length of the hex-encoded checksum line
pub const CHECKSUM_SIZE: usize = 40;
