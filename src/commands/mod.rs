//! Command implementations
//!
//! - `porcelain`: The user-facing commands dispatched by the binary

pub mod porcelain;
