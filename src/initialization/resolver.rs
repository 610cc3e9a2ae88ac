//! DNS resolver initialization.

use std::sync::Arc;

use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_TIMEOUT;

/// Initializes the DNS resolver used for speculative-probe validation.
///
/// Uses the default configuration (Google DNS) with a short timeout and
/// reduced retry attempts so unresolvable candidates fail fast; most
/// speculative candidates are expected not to resolve.
///
/// # Returns
///
/// A configured `TokioAsyncResolver` wrapped in `Arc` for sharing across tasks.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    use hickory_resolver::config::{ResolverConfig, ResolverOpts};

    let mut opts = ResolverOpts::default();
    opts.timeout = DNS_TIMEOUT;
    opts.attempts = 2;
    // Candidates are absolute hostnames; never append search domains.
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}
