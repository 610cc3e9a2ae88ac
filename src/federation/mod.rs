//! Microsoft 365 federation discovery.
//!
//! This module issues the single SOAP operation the tool needs,
//! `GetFederationInformation`, and extracts the set of domains federated
//! with a seed domain. The response is scanned for `<Domain>` text nodes by
//! pattern match rather than parsed as XML; any response that pattern-matches
//! is accepted.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, CONTENT_TYPE, USER_AGENT};

use crate::config::{
    federation_request_body, AUTODISCOVER_SOAP_ACTION, AUTODISCOVER_URL, AUTODISCOVER_USER_AGENT,
};
use crate::error_handling::LookupError;
use crate::transport::RateLimitedClient;

/// Result of one federation-discovery request.
#[derive(Debug, Clone, Default)]
pub struct FederationDiscovery {
    /// Federated domains in first-seen order, deduplicated
    pub domains: Vec<String>,
    /// Short-names of `*.onmicrosoft.com` domains (label before the first dot)
    pub tenant_names: Vec<String>,
}

fn domain_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)<Domain>([^<>/]*)</Domain>").expect("domain pattern is valid")
    })
}

/// Discovers the domains federated with a seed domain.
///
/// Issues one `GetFederationInformation` request through the rate-limited
/// transport and extracts every `<Domain>` text node from the response body.
///
/// # Errors
///
/// Returns a [`LookupError`] on transport failure or an unreadable response
/// body. An empty domain set is not an error.
pub async fn discover_federated_domains(
    transport: &RateLimitedClient,
    seed_domain: &str,
) -> Result<FederationDiscovery, LookupError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/xml; charset=utf-8"),
    );
    headers.insert("SOAPAction", HeaderValue::from_static(AUTODISCOVER_SOAP_ACTION));
    headers.insert(USER_AGENT, HeaderValue::from_static(AUTODISCOVER_USER_AGENT));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    let body = federation_request_body(seed_domain);
    let response = transport.post(AUTODISCOVER_URL, headers, body).await?;
    let text = response.text().await?;

    let discovery = extract_domains(&text);
    debug!(
        "Federation discovery for {seed_domain}: {} domain(s), {} tenant name(s)",
        discovery.domains.len(),
        discovery.tenant_names.len()
    );
    Ok(discovery)
}

/// Extracts federated domains and tenant short-names from a response body.
///
/// Duplicate `<Domain>` matches collapse to the first occurrence, preserving
/// response order.
pub fn extract_domains(body: &str) -> FederationDiscovery {
    let mut discovery = FederationDiscovery::default();

    for capture in domain_pattern().captures_iter(body) {
        let domain = capture[1].to_string();
        if domain.is_empty() || discovery.domains.contains(&domain) {
            continue;
        }
        if domain.to_ascii_lowercase().ends_with(".onmicrosoft.com") {
            if let Some(name) = domain.split('.').next() {
                discovery.tenant_names.push(name.to_string());
            }
        }
        discovery.domains.push(domain);
    }

    discovery
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domains_dedupes_preserving_order() {
        let body = "<Domain>contoso.com</Domain><Domain>fabrikam.com</Domain>\
                    <Domain>contoso.com</Domain>";
        let discovery = extract_domains(body);
        assert_eq!(discovery.domains, vec!["contoso.com", "fabrikam.com"]);
        assert!(discovery.tenant_names.is_empty());
    }

    #[test]
    fn test_extract_domains_records_tenant_names() {
        let body = "<Domain>contoso.com</Domain><Domain>fabrikam.onmicrosoft.com</Domain>";
        let discovery = extract_domains(body);
        assert_eq!(
            discovery.domains,
            vec!["contoso.com", "fabrikam.onmicrosoft.com"]
        );
        assert_eq!(discovery.tenant_names, vec!["fabrikam"]);
    }

    #[test]
    fn test_extract_domains_case_insensitive_tags_and_suffix() {
        let body = "<domain>Fabrikam.OnMicrosoft.Com</domain>";
        let discovery = extract_domains(body);
        assert_eq!(discovery.domains, vec!["Fabrikam.OnMicrosoft.Com"]);
        assert_eq!(discovery.tenant_names, vec!["Fabrikam"]);
    }

    #[test]
    fn test_extract_domains_empty_response() {
        let discovery = extract_domains("<soap:Envelope></soap:Envelope>");
        assert!(discovery.domains.is_empty());
        assert!(discovery.tenant_names.is_empty());
    }

    #[test]
    fn test_extract_domains_ignores_empty_nodes() {
        let discovery = extract_domains("<Domain></Domain><Domain>contoso.com</Domain>");
        assert_eq!(discovery.domains, vec!["contoso.com"]);
    }

    #[test]
    fn test_extract_domains_skips_nested_markup() {
        // The pattern only accepts plain text nodes.
        let discovery = extract_domains("<Domain><b>contoso.com</b></Domain>");
        assert!(discovery.domains.is_empty());
    }
}
