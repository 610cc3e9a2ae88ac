//! Application-level utilities.

pub mod statistics;

// Re-export public API
pub use statistics::{log_run_summary, print_error_statistics};
