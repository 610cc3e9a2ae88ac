//! Error type definitions.
//!
//! This module defines the error enums used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure of a single federation-discovery request or MX lookup.
///
/// These are per-domain failures: the orchestrator converts them to "no
/// records" for the affected domain and never propagates them to sibling
/// lookups.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Transport-level failure (connection, timeout, or non-2xx status).
    #[error("transport failure: {0}")]
    Transport(#[from] ReqwestError),

    /// The response body did not deserialize as expected.
    #[error("parse failure: {0}")]
    Parse(String),

    /// The DNS-over-HTTPS response carried no "Answer" section.
    #[error("no answer section in DNS response")]
    MissingAnswer,

    /// An answer's data field was not a "<priority> <host>" pair.
    #[error("malformed MX record data: {0:?}")]
    MalformedRecord(String),
}

/// Types of errors counted during a hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Federation-discovery request failed outright
    FederationRequestError,
    /// MX lookup failed at the transport layer
    MxLookupTransportError,
    /// MX lookup response was missing or malformed
    MxLookupParseError,
}

/// Types of informational events counted during a hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// A speculative mail-protection host resolved and was promoted
    SpeculativeHostConfirmed,
    /// A tenant short-name was recorded from an onmicrosoft.com domain
    TenantNameRecorded,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::FederationRequestError => "Federation discovery request error",
            ErrorType::MxLookupTransportError => "MX lookup transport error",
            ErrorType::MxLookupParseError => "MX lookup parse error",
        }
    }
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::SpeculativeHostConfirmed => "Speculative host confirmed",
            InfoType::TenantNameRecorded => "Tenant short-name recorded",
        }
    }
}

impl LookupError {
    /// Maps a lookup failure to its statistics bucket.
    pub fn error_type(&self) -> ErrorType {
        match self {
            LookupError::Transport(_) => ErrorType::MxLookupTransportError,
            LookupError::Parse(_)
            | LookupError::MissingAnswer
            | LookupError::MalformedRecord(_) => ErrorType::MxLookupParseError,
        }
    }
}
