//! Speculative mail-protection probing.
//!
//! Microsoft provisions a mail-protection endpoint named after the tenant's
//! domain (`contoso.com` → `contoso-com.mail.protection.outlook.com`) even
//! before an MX record pointing at it is published. This module synthesizes
//! those candidate hostnames and confirms them by direct name resolution.
//!
//! The naming heuristic is best-effort: it matches Microsoft's known
//! convention but is neither exhaustive nor guaranteed correct, so candidates
//! that fail to resolve are discarded silently. Resolution goes through the
//! shared system resolver, not the HTTP rate limiter.

use hickory_resolver::TokioAsyncResolver;
use log::debug;

use crate::config::{MAIL_PROTECTION_SUFFIX, SPECULATIVE_MX_PRIORITY, SPECULATIVE_TLDS};
use crate::models::MxRecord;

/// Generates the speculative mail-protection candidates for a domain.
///
/// Pure and deterministic: one trailing `.com`/`.org`/`.net` suffix is
/// stripped (case-insensitive), remaining dots become dashes, and the stem is
/// emitted bare plus once per TLD-suffix variant, each with the fixed
/// mail-protection suffix appended.
pub fn speculative_candidates(domain: &str) -> Vec<String> {
    let lower = domain.to_ascii_lowercase();
    let stem = SPECULATIVE_TLDS
        .iter()
        .find_map(|tld| lower.strip_suffix(&format!(".{tld}")))
        .unwrap_or(&lower)
        .replace('.', "-");

    let mut candidates = vec![format!("{stem}{MAIL_PROTECTION_SUFFIX}")];
    for tld in SPECULATIVE_TLDS {
        candidates.push(format!("{stem}-{tld}{MAIL_PROTECTION_SUFFIX}"));
    }
    candidates
}

/// Extends a domain's MX records with speculative hosts that resolve.
///
/// Candidates already present in the record list (substring containment
/// against the raw host values) are skipped without re-validation. Each
/// remaining candidate is resolved with its trailing dot stripped; a
/// successful resolution promotes it into the record list at the nominal
/// priority, while a failure discards it — the expected outcome for most
/// suffix variants.
///
/// Returns the hosts that were added, so the caller can feed the global
/// accumulator.
pub async fn extend_with_speculative(
    resolver: &TokioAsyncResolver,
    domain: &str,
    records: &mut Vec<MxRecord>,
) -> Vec<String> {
    let mut added = Vec::new();

    for candidate in speculative_candidates(domain) {
        if records.iter().any(|record| record.mx.contains(&candidate)) {
            continue;
        }

        match resolver.lookup_ip(candidate.trim_end_matches('.')).await {
            Ok(_) => {
                debug!("Speculative host {candidate} resolved for {domain}");
                records.push(MxRecord {
                    priority: SPECULATIVE_MX_PRIORITY,
                    mx: candidate.clone(),
                });
                added.push(candidate);
            }
            Err(e) => {
                debug!("Speculative host {candidate} did not resolve: {e}");
            }
        }
    }

    added
}
