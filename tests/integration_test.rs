//! Integration tests exercising the public library API without network access.

use mxhunt::models::{normalized_hosts, HuntState, MxRecord, SeedReport, TenantDomainReport};
use mxhunt::{run_hunt, Config};

#[tokio::test]
async fn test_run_hunt_rejects_empty_seed_list() {
    let config = Config {
        seeds: Vec::new(),
        ..Default::default()
    };
    let result = run_hunt(config).await;
    assert!(result.is_err(), "A run without seeds is a misconfiguration");
    let message = result.unwrap_err().to_string();
    assert!(
        message.contains("no seed domains"),
        "Unexpected error message: {message}"
    );
}

#[test]
fn test_empty_run_produces_empty_report() {
    // A run where no seed discovered anything yields an empty report and an
    // empty normalized host set.
    let report = HuntState::default().into_report();
    assert!(report.domains.is_empty());
    assert!(report.seeds.is_empty());
    assert!(report.normalized_mx_hosts().is_empty());
}

#[test]
fn test_fabrikam_scenario_normalization() {
    // Seed "contoso.com" discovers "fabrikam.onmicrosoft.com", whose MX
    // record comes back in FQDN form; the normalized set contains exactly
    // the dot-stripped host.
    let state = HuntState::default();
    state.record_domains(&[
        "contoso.com".to_string(),
        "fabrikam.onmicrosoft.com".to_string(),
    ]);
    state.record_tenant_names(&["fabrikam".to_string()]);
    state.record_mx_hosts(["fabrikam-com.mail.protection.outlook.com.".to_string()]);
    state.record_seed_report(SeedReport {
        initial_domain: "contoso.com".to_string(),
        tenant_domains: vec![TenantDomainReport {
            domain: "fabrikam.onmicrosoft.com".to_string(),
            records: vec![MxRecord {
                priority: 10,
                mx: "fabrikam-com.mail.protection.outlook.com.".to_string(),
            }],
        }],
    });

    let report = state.into_report();
    assert_eq!(report.tenant_names, vec!["fabrikam"]);
    assert_eq!(
        report.normalized_mx_hosts(),
        vec!["fabrikam-com.mail.protection.outlook.com"]
    );
    assert_eq!(report.seeds.len(), 1);
    assert_eq!(report.seeds[0].initial_domain, "contoso.com");
}

#[test]
fn test_failed_sibling_contributes_nothing() {
    // A domain whose lookup failed appends no hosts; siblings still do.
    let state = HuntState::default();
    state.record_domains(&["good.com".to_string(), "bad.com".to_string()]);
    state.record_mx_hosts(["mail.good.com.".to_string()]);

    let report = state.into_report();
    assert_eq!(report.normalized_mx_hosts(), vec!["mail.good.com"]);
}

#[test]
fn test_normalized_view_is_pure_over_raw_hosts() {
    let raw = vec![
        "MX2.Example.COM.".to_string(),
        "mx1.example.com.".to_string(),
        "mx2.example.com".to_string(),
    ];
    let view = normalized_hosts(&raw);
    assert_eq!(view, vec!["mx1.example.com", "mx2.example.com"]);
    // Deriving again from the same raw list gives the same view.
    assert_eq!(view, normalized_hosts(&raw));
}
