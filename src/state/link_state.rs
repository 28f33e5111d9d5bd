/// Broken link definitions
///
/// This module defines why a link was classified as broken and the record
/// kept for each broken link.
use std::fmt;

/// Why a link was classified as broken
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BrokenReason {
    /// The server answered with a status outside the 2xx range
    HttpStatus(u16),

    /// The request did not complete within the configured timeout
    Timeout,

    /// DNS, connection, TLS or body read failure
    Network(String),
}

impl BrokenReason {
    /// Short machine-friendly label for the reason
    pub fn label(&self) -> &'static str {
        match self {
            Self::HttpStatus(_) => "http_status",
            Self::Timeout => "timeout",
            Self::Network(_) => "network_error",
        }
    }

    /// Returns the HTTP status code, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for BrokenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpStatus(code) => write!(f, "HTTP {}", code),
            Self::Timeout => write!(f, "request timed out"),
            Self::Network(error) => write!(f, "{}", error),
        }
    }
}

/// A broken link together with the page it was first found on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// The broken URL
    pub url: String,

    /// The page the link was discovered on
    pub source: String,

    /// Why the link is broken
    pub reason: BrokenReason,
}
