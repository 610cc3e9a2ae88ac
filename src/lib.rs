//! mxhunt library: MSOL federated-domain and MX discovery.
//!
//! Given one or more seed domains, this library discovers every domain
//! federated under the same Microsoft 365 tenant, resolves the active MX
//! infrastructure for each discovered domain through DNS-over-HTTPS, and
//! folds in speculative Microsoft mail-protection hosts that resolve but are
//! not yet published in DNS.
//!
//! # Example
//!
//! ```no_run
//! use mxhunt::{run_hunt, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     seeds: vec!["contoso.com".to_string()],
//!     rate_limit: 10,
//!     ..Default::default()
//! };
//!
//! let report = run_hunt(config).await?;
//! for host in report.normalized_mx_hosts() {
//!     println!("{host}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod app;
pub mod config;
mod dns;
mod error_handling;
pub mod export;
mod federation;
pub mod initialization;
pub mod models;
mod probe;
mod transport;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use models::{HuntReport, MxRecord, SeedReport, TenantDomainReport};
pub use run::run_hunt;

// Internal run module (contains the resolution orchestrator)
mod run {
    use std::sync::Arc;

    use anyhow::{bail, Context, Result};
    use futures::future;
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use hickory_resolver::TokioAsyncResolver;
    use log::{info, warn};

    use crate::app::{log_run_summary, print_error_statistics};
    use crate::config::Config;
    use crate::dns;
    use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
    use crate::federation::discover_federated_domains;
    use crate::initialization::{init_client, init_resolver};
    use crate::models::{HuntReport, HuntState, MxRecord, SeedReport, TenantDomainReport};
    use crate::probe;
    use crate::transport::RateLimitedClient;

    /// Runs a hunt across the configured seed domains.
    ///
    /// Dispatches federation discovery concurrently for every seed; each seed
    /// task then fans out MX lookups over its discovered domains, with the
    /// speculative probe running after each successful lookup. Per-domain and
    /// per-seed failures are logged and counted but never abort the run.
    ///
    /// # Errors
    ///
    /// Returns an error only on caller-level misconfiguration (no seed
    /// domains) or if the HTTP client cannot be constructed.
    pub async fn run_hunt(config: Config) -> Result<HuntReport> {
        if config.seeds.is_empty() {
            bail!("no seed domains provided");
        }

        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let transport = Arc::new(RateLimitedClient::new(client, config.rate_limit));
        let resolver = init_resolver();
        let stats = Arc::new(ProcessingStats::new());
        let state = Arc::new(HuntState::default());

        let start_time = std::time::Instant::now();

        let mut tasks = FuturesUnordered::new();
        for seed in config.seeds.iter().cloned() {
            let transport = Arc::clone(&transport);
            let resolver = Arc::clone(&resolver);
            let state = Arc::clone(&state);
            let stats = Arc::clone(&stats);
            tasks.push(tokio::spawn(async move {
                hunt_seed(seed, &transport, &resolver, &state, &stats).await;
            }));
        }

        while let Some(task_result) = tasks.next().await {
            if let Err(join_error) = task_result {
                warn!("Seed task panicked: {join_error:?}");
            }
        }

        let state = Arc::into_inner(state)
            .context("hunt state still shared after all tasks completed")?;
        let report = state.into_report();

        print_error_statistics(&stats);
        log_run_summary(
            start_time,
            report.domains.len(),
            report.normalized_mx_hosts().len(),
        );

        Ok(report)
    }

    /// Resolves one seed: federation discovery, then concurrent MX lookups
    /// over every discovered domain.
    ///
    /// Discovery and MX resolution for a seed are a single unit of work; the
    /// seed's report entry is appended once all its lookups have completed.
    /// A seed that discovers no domains records nothing.
    async fn hunt_seed(
        seed: String,
        transport: &RateLimitedClient,
        resolver: &TokioAsyncResolver,
        state: &HuntState,
        stats: &ProcessingStats,
    ) {
        let discovery = match discover_federated_domains(transport, &seed).await {
            Ok(discovery) => discovery,
            Err(e) => {
                warn!("Federation discovery failed for {seed}: {e}");
                stats.increment_error(ErrorType::FederationRequestError);
                return;
            }
        };

        if discovery.domains.is_empty() {
            info!("No federated domains found for {seed}");
            return;
        }

        info!(
            "Found {} federated domain(s) for {seed}",
            discovery.domains.len()
        );
        for name in &discovery.tenant_names {
            info!("Tenant name recorded: {name}");
            stats.increment_info(InfoType::TenantNameRecorded);
        }
        state.record_domains(&discovery.domains);
        state.record_tenant_names(&discovery.tenant_names);

        let lookups = discovery
            .domains
            .iter()
            .map(|domain| resolve_domain(domain, transport, resolver, state, stats));
        let outcomes = future::join_all(lookups).await;

        let mut entry = SeedReport {
            initial_domain: seed,
            tenant_domains: Vec::new(),
        };
        for (domain, outcome) in discovery.domains.iter().zip(outcomes) {
            if let Some(records) = outcome {
                if !records.is_empty() {
                    entry.tenant_domains.push(TenantDomainReport {
                        domain: domain.clone(),
                        records,
                    });
                }
            }
        }
        state.record_seed_report(entry);
    }

    /// Looks up MX records for one discovered domain and runs the
    /// speculative probe on success.
    ///
    /// Any lookup failure is converted to `None` ("no records found") for
    /// this domain alone; sibling lookups keep running.
    async fn resolve_domain(
        domain: &str,
        transport: &RateLimitedClient,
        resolver: &TokioAsyncResolver,
        state: &HuntState,
        stats: &ProcessingStats,
    ) -> Option<Vec<MxRecord>> {
        match dns::lookup_mx(transport, domain).await {
            Ok(mut records) => {
                state.record_mx_hosts(records.iter().map(|record| record.mx.clone()));

                let added = probe::extend_with_speculative(resolver, domain, &mut records).await;
                for host in &added {
                    info!("Speculative MX host confirmed for {domain}: {host}");
                    stats.increment_info(InfoType::SpeculativeHostConfirmed);
                }
                state.record_mx_hosts(added);

                Some(records)
            }
            Err(e) => {
                warn!("No MX records for {domain}: {e}");
                stats.increment_error(e.error_type());
                None
            }
        }
    }
}
