//! Error handling and statistics.
//!
//! This module provides the error taxonomy for the hunt pipeline and the
//! thread-safe counters used to report per-domain failures at the end of a
//! run without ever aborting sibling lookups.

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{ErrorType, InfoType, InitializationError, LookupError};
