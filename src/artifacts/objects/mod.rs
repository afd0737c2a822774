//! Gitlet object types and operations
//!
//! Gitlet stores two kinds of immutable objects, each identified by a SHA-1 hash:
//!
//! - **Blob**: one file's name and content at one point in time
//! - **Commit**: a snapshot (file name -> blob id mapping) with message, timestamp and parents
//!
//! All objects implement serialization/deserialization for the on-disk format:
//! `<type> <size>\0<content>`

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
