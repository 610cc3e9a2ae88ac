//! Core data models and shared run state.
//!
//! The report structure is an explicit tagged hierarchy (seed domain → tenant
//! domains → MX records) that is only serialized to JSON at the output
//! boundary. The deduplicated, normalized MX host view is always derived
//! fresh from the raw accumulated host list so the two can never drift.

use std::collections::BTreeSet;
use std::sync::Mutex;

use serde::Serialize;

/// One MX record: a priority and the exchange host as returned by DNS.
///
/// Hosts keep their FQDN trailing dot here; normalization happens only in
/// the derived views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MxRecord {
    /// MX preference value (lower is preferred)
    pub priority: u16,
    /// Mail exchange host, FQDN form
    pub mx: String,
}

/// MX records found for one tenant domain.
#[derive(Debug, Clone, Serialize)]
pub struct TenantDomainReport {
    /// The discovered tenant domain
    pub domain: String,
    /// MX records for the domain, including confirmed speculative hosts
    pub records: Vec<MxRecord>,
}

/// Everything found for a single seed domain.
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    /// The seed domain the hunt started from
    pub initial_domain: String,
    /// Per-domain results for every federated domain with MX records
    pub tenant_domains: Vec<TenantDomainReport>,
}

/// Final result of a hunt across all seed domains.
#[derive(Debug, Clone)]
pub struct HuntReport {
    /// All federated domains discovered across seeds, sorted and deduplicated
    pub domains: Vec<String>,
    /// Tenant short-names extracted from `*.onmicrosoft.com` domains
    pub tenant_names: Vec<String>,
    /// One entry per seed domain that discovered at least one federated domain
    pub seeds: Vec<SeedReport>,
    /// Raw MX hosts as accumulated during the run, FQDN form, unordered
    pub raw_mx_hosts: Vec<String>,
}

impl HuntReport {
    /// Derives the sorted, deduplicated, lower-case, dot-stripped view over
    /// every MX host seen during the run.
    pub fn normalized_mx_hosts(&self) -> Vec<String> {
        normalized_hosts(&self.raw_mx_hosts)
    }
}

/// Normalizes one host to its canonical external form: lower-case with the
/// FQDN trailing dot stripped.
pub fn normalize_host(host: &str) -> String {
    host.trim_end_matches('.').to_ascii_lowercase()
}

/// Normalizes, deduplicates, and sorts a raw host list.
pub fn normalized_hosts(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|h| normalize_host(h))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Shared, append-only accumulator mutated by concurrent per-seed tasks.
///
/// Appends happen on a preemptive multi-threaded runtime, so each list sits
/// behind its own mutex. Critical sections are plain pushes and never cross
/// an await point.
#[derive(Default)]
pub struct HuntState {
    domains: Mutex<Vec<String>>,
    tenant_names: Mutex<Vec<String>>,
    seeds: Mutex<Vec<SeedReport>>,
    mx_hosts: Mutex<Vec<String>>,
}

impl HuntState {
    /// Records the federated domains discovered for one seed.
    pub fn record_domains(&self, domains: &[String]) {
        self.domains
            .lock()
            .expect("domain list lock poisoned")
            .extend_from_slice(domains);
    }

    /// Records tenant short-names extracted during discovery.
    pub fn record_tenant_names(&self, names: &[String]) {
        self.tenant_names
            .lock()
            .expect("tenant name lock poisoned")
            .extend_from_slice(names);
    }

    /// Appends a finalized per-seed report entry.
    pub fn record_seed_report(&self, report: SeedReport) {
        self.seeds
            .lock()
            .expect("seed report lock poisoned")
            .push(report);
    }

    /// Appends raw MX hosts to the global accumulator.
    pub fn record_mx_hosts<I: IntoIterator<Item = String>>(&self, hosts: I) {
        self.mx_hosts
            .lock()
            .expect("mx host lock poisoned")
            .extend(hosts);
    }

    /// Consumes the accumulator into the final report.
    ///
    /// The merged domain list is sorted and deduplicated here; the raw MX
    /// host list is handed over untouched so normalized views stay derived.
    pub fn into_report(self) -> HuntReport {
        let mut domains = self
            .domains
            .into_inner()
            .expect("domain list lock poisoned");
        domains.sort();
        domains.dedup();

        HuntReport {
            domains,
            tenant_names: self
                .tenant_names
                .into_inner()
                .expect("tenant name lock poisoned"),
            seeds: self.seeds.into_inner().expect("seed report lock poisoned"),
            raw_mx_hosts: self.mx_hosts.into_inner().expect("mx host lock poisoned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host_strips_dot_and_lowercases() {
        assert_eq!(normalize_host("MAIL.EXAMPLE.COM."), "mail.example.com");
        assert_eq!(normalize_host("mail.example.com"), "mail.example.com");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = vec![
            "MAIL.EXAMPLE.COM.".to_string(),
            "mail.example.com".to_string(),
            "mx2.example.org.".to_string(),
        ];
        let once = normalized_hosts(&raw);
        let twice = normalized_hosts(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_dedup_is_case_and_dot_insensitive() {
        let raw = vec![
            "MAIL.EXAMPLE.COM.".to_string(),
            "mail.example.com".to_string(),
        ];
        assert_eq!(normalized_hosts(&raw), vec!["mail.example.com"]);
    }

    #[test]
    fn test_normalized_hosts_sorted() {
        let raw = vec![
            "zz.example.com.".to_string(),
            "aa.example.com.".to_string(),
        ];
        assert_eq!(normalized_hosts(&raw), vec!["aa.example.com", "zz.example.com"]);
    }

    #[test]
    fn test_state_merges_and_dedupes_domains() {
        let state = HuntState::default();
        state.record_domains(&["b.com".to_string(), "a.com".to_string()]);
        state.record_domains(&["a.com".to_string()]);
        state.record_mx_hosts(["Mail.B.com.".to_string(), "mail.b.com".to_string()]);

        let report = state.into_report();
        assert_eq!(report.domains, vec!["a.com", "b.com"]);
        assert_eq!(report.normalized_mx_hosts(), vec!["mail.b.com"]);
        assert_eq!(report.raw_mx_hosts.len(), 2);
    }

    #[test]
    fn test_report_serializes_expected_shape() {
        let report = SeedReport {
            initial_domain: "contoso.com".to_string(),
            tenant_domains: vec![TenantDomainReport {
                domain: "fabrikam.onmicrosoft.com".to_string(),
                records: vec![MxRecord {
                    priority: 10,
                    mx: "fabrikam-com.mail.protection.outlook.com.".to_string(),
                }],
            }],
        };
        let json = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(json["initial_domain"], "contoso.com");
        assert_eq!(json["tenant_domains"][0]["records"][0]["priority"], 10);
    }
}
