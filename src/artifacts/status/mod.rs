//! Working tree status
//!
//! - `file_change`: kinds of changes not yet staged
//! - `status_info`: the five-section status report and its rendering

pub mod file_change;
pub mod status_info;
