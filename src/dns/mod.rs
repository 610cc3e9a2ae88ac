//! MX lookups over DNS-over-HTTPS.
//!
//! This module queries a public DNS-over-HTTPS resolver for MX records and
//! parses the JSON answer section. Each answer's `data` field is a
//! whitespace-separated `"<priority> <host>"` pair; hosts come back in FQDN
//! form with a trailing dot, which is preserved in the raw records.

use log::info;
use serde::Deserialize;

use crate::config::DOH_RESOLVE_URL;
use crate::error_handling::LookupError;
use crate::models::MxRecord;
use crate::transport::RateLimitedClient;

#[derive(Debug, Deserialize)]
struct DohResponse {
    #[serde(rename = "Answer")]
    answer: Option<Vec<DohAnswer>>,
}

#[derive(Debug, Deserialize)]
struct DohAnswer {
    data: String,
}

/// Looks up MX records for a domain via DNS-over-HTTPS.
///
/// Issues one GET through the rate-limited transport. Any failure — transport
/// error, unparseable JSON, missing `Answer` section, or malformed record
/// data — is returned as a [`LookupError`] for this domain only; the caller
/// treats it as "no records found" and sibling lookups are unaffected.
pub async fn lookup_mx(
    transport: &RateLimitedClient,
    domain: &str,
) -> Result<Vec<MxRecord>, LookupError> {
    info!("Checking MX records for {domain}");

    let response = transport
        .get(DOH_RESOLVE_URL, &[("name", domain), ("type", "MX")])
        .await?;
    let body: DohResponse = response
        .json()
        .await
        .map_err(|e| LookupError::Parse(e.to_string()))?;

    let answers = body.answer.ok_or(LookupError::MissingAnswer)?;
    answers
        .iter()
        .map(|answer| parse_mx_data(&answer.data))
        .collect()
}

/// Parses one `"<priority> <host>"` answer data field.
fn parse_mx_data(data: &str) -> Result<MxRecord, LookupError> {
    let mut tokens = data.split_whitespace();
    let priority = tokens
        .next()
        .and_then(|t| t.parse::<u16>().ok())
        .ok_or_else(|| LookupError::MalformedRecord(data.to_string()))?;
    let mx = tokens
        .next()
        .ok_or_else(|| LookupError::MalformedRecord(data.to_string()))?;

    Ok(MxRecord {
        priority,
        mx: mx.to_string(),
    })
}
