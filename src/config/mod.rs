//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, protocol fixtures, limits)
//! - Library configuration and logging types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
