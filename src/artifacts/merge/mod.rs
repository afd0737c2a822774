//! Merge machinery
//!
//! - `split_finder`: locates the split point (merge base) of two commits and
//!   walks commit closures for remote transfer
//! - `resolution`: per-file three-way reconciliation and conflict text

/// Debug tracing enabled with the `debug_merge` feature flag
///
/// ```rust,ignore
/// debug_log!("Processing commit {}", commit_id);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

pub mod resolution;
pub mod split_finder;
