//! Result output: text file, JSON report, and console listing.
//!
//! These are thin I/O wrappers around the finished [`HuntReport`]; all
//! normalization and deduplication has already happened by the time anything
//! is written.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use log::info;

use crate::models::SeedReport;

/// Writes the normalized MX host list to `<base>.txt`, one host per line
/// without a trailing newline.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_mx_hosts(base: &str, hosts: &[String]) -> Result<()> {
    let path = format!("{base}.txt");
    info!("Writing mail servers to {path}");

    let mut file = File::create(Path::new(&path))
        .with_context(|| format!("Failed to create output file: {path}"))?;
    file.write_all(hosts.join("\n").as_bytes())
        .with_context(|| format!("Failed to write output file: {path}"))?;
    Ok(())
}

/// Writes the per-seed report to `<base>.json` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails.
pub fn write_json_report(base: &str, seeds: &[SeedReport]) -> Result<()> {
    let path = format!("{base}.json");
    info!("Writing JSON report to {path}");

    let file = File::create(Path::new(&path))
        .with_context(|| format!("Failed to create report file: {path}"))?;
    serde_json::to_writer_pretty(file, seeds)
        .with_context(|| format!("Failed to write report file: {path}"))?;
    Ok(())
}

/// Prints the normalized MX host list to the console.
pub fn print_mx_hosts(hosts: &[String]) {
    println!("{}", "MX Record".bold());
    for host in hosts {
        println!("{host}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MxRecord, TenantDomainReport};

    #[test]
    fn test_write_mx_hosts_no_trailing_newline() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let base = dir.path().join("mx_servers");
        let base = base.to_str().expect("temp path should be utf-8");

        let hosts = vec![
            "aa.mail.protection.outlook.com".to_string(),
            "bb.mail.protection.outlook.com".to_string(),
        ];
        write_mx_hosts(base, &hosts).expect("Should write hosts file");

        let contents =
            std::fs::read_to_string(format!("{base}.txt")).expect("Should read hosts file");
        assert_eq!(
            contents,
            "aa.mail.protection.outlook.com\nbb.mail.protection.outlook.com"
        );
    }

    #[test]
    fn test_write_mx_hosts_empty_list() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let base = dir.path().join("mx_servers");
        let base = base.to_str().expect("temp path should be utf-8");

        write_mx_hosts(base, &[]).expect("Should write empty file");
        let contents =
            std::fs::read_to_string(format!("{base}.txt")).expect("Should read hosts file");
        assert!(contents.is_empty());
    }

    #[test]
    fn test_write_json_report_round_trips() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let base = dir.path().join("mx_report");
        let base = base.to_str().expect("temp path should be utf-8");

        let seeds = vec![SeedReport {
            initial_domain: "contoso.com".to_string(),
            tenant_domains: vec![TenantDomainReport {
                domain: "fabrikam.onmicrosoft.com".to_string(),
                records: vec![MxRecord {
                    priority: 10,
                    mx: "fabrikam-com.mail.protection.outlook.com.".to_string(),
                }],
            }],
        }];
        write_json_report(base, &seeds).expect("Should write report");

        let contents =
            std::fs::read_to_string(format!("{base}.json")).expect("Should read report");
        let parsed: serde_json::Value =
            serde_json::from_str(&contents).expect("Report should be valid JSON");
        assert_eq!(parsed[0]["initial_domain"], "contoso.com");
        assert_eq!(
            parsed[0]["tenant_domains"][0]["records"][0]["mx"],
            "fabrikam-com.mail.protection.outlook.com."
        );
    }

    #[test]
    fn test_write_mx_hosts_invalid_path() {
        let result = write_mx_hosts("/nonexistent/dir/mx_servers", &[]);
        assert!(result.is_err(), "Should fail when file cannot be created");
    }
}
