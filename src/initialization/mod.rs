//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - HTTP client (with the fixed Autodiscover User-Agent and timeouts)
//! - DNS resolver for speculative-probe validation
//! - Logger

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
