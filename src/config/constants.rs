//! Configuration constants.
//!
//! Endpoints, protocol fixtures, and default limits used throughout the
//! application.

use std::time::Duration;

/// Autodiscover federation-discovery endpoint.
///
/// This is the fixed Exchange Online SOAP endpoint that answers
/// `GetFederationInformation` requests for any federated domain.
pub const AUTODISCOVER_URL: &str =
    "https://autodiscover-s.outlook.com/autodiscover/autodiscover.svc";

/// SOAPAction header value for the `GetFederationInformation` operation.
pub const AUTODISCOVER_SOAP_ACTION: &str =
    "\"http://schemas.microsoft.com/exchange/2010/Autodiscover/Autodiscover/GetFederationInformation\"";

/// User-Agent required by the Autodiscover endpoint.
///
/// Exchange Online rejects unfamiliar user agents on this endpoint, so the
/// client identifies itself the same way the official clients do.
pub const AUTODISCOVER_USER_AGENT: &str = "AutodiscoverClient";

/// DNS-over-HTTPS resolver endpoint used for MX lookups.
pub const DOH_RESOLVE_URL: &str = "https://dns.google/resolve";

/// Suffix shared by all Microsoft-hosted mail-protection hostnames.
pub const MAIL_PROTECTION_SUFFIX: &str = ".mail.protection.outlook.com.";

/// TLD suffixes folded into speculative mail-protection candidates.
pub const SPECULATIVE_TLDS: [&str; 3] = ["com", "org", "net"];

/// Priority assigned to speculative MX records confirmed by resolution.
///
/// The real priority is unknowable without a published MX record, so
/// confirmed candidates are reported at the value Microsoft conventionally
/// publishes for mail-protection hosts.
pub const SPECULATIVE_MX_PRIORITY: u16 = 10;

/// Default concurrent-connection / requests-per-second limit.
pub const DEFAULT_RATE_LIMIT: u32 = 10;

/// Default per-request HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Timeout for speculative-probe name resolution.
pub const DNS_TIMEOUT: Duration = Duration::from_secs(3);

/// Builds the `GetFederationInformation` SOAP envelope for a seed domain.
///
/// The envelope is fixed apart from the `<Domain>` element, which carries the
/// seed domain being discovered.
pub fn federation_request_body(seed_domain: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:exm="http://schemas.microsoft.com/exchange/services/2006/messages" xmlns:ext="http://schemas.microsoft.com/exchange/services/2006/types" xmlns:a="http://www.w3.org/2005/08/addressing" xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
    <soap:Header>
        <a:Action soap:mustUnderstand="1">http://schemas.microsoft.com/exchange/2010/Autodiscover/Autodiscover/GetFederationInformation</a:Action>
        <a:To soap:mustUnderstand="1">{AUTODISCOVER_URL}</a:To>
        <a:ReplyTo>
            <a:Address>http://www.w3.org/2005/08/addressing/anonymous</a:Address>
        </a:ReplyTo>
    </soap:Header>
    <soap:Body>
        <GetFederationInformationRequestMessage xmlns="http://schemas.microsoft.com/exchange/2010/Autodiscover">
            <Request>
                <Domain>{seed_domain}</Domain>
            </Request>
        </GetFederationInformationRequestMessage>
    </soap:Body>
</soap:Envelope>"#
    )
}
