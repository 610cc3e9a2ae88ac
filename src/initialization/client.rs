//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, AUTODISCOVER_USER_AGENT};

/// Initializes the shared HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - The fixed Autodiscover User-Agent (required by the federation endpoint)
/// - Per-request timeout from the configuration
/// - Rustls TLS backend
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(AUTODISCOVER_USER_AGENT)
        .build()?;
    Ok(Arc::new(client))
}
