//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests to fetch page content
//! - Status-only checks for links that are never expanded
//! - Error classification into broken link reasons
//!
//! A single attempt decides a link's fate; there is no retry.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::state::BrokenReason;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered with a 2xx status
    Success {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a status outside the 2xx range
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (DNS failure, connection refused, timeout, ...)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the request hit the timeout
        timed_out: bool,
    },
}

impl FetchResult {
    /// Classifies a failed fetch, or returns `None` on success
    pub fn broken_reason(&self) -> Option<BrokenReason> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(BrokenReason::HttpStatus(*status_code)),
            Self::NetworkError {
                timed_out: true, ..
            } => Some(BrokenReason::Timeout),
            Self::NetworkError { error, .. } => Some(BrokenReason::Network(error.clone())),
        }
    }
}

/// The capability to fetch a URL
///
/// The crawler only needs "GET this URL, give me a status and a body or an
/// error". Production code uses [`HttpFetcher`]; tests can plug in canned
/// responses.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches a URL; never fails, errors are encoded in the result
    async fn fetch(&self, url: &Url) -> FetchResult;

    /// Checks that a URL answers with a 2xx status without using its body
    ///
    /// Used for links that are never expanded. Implementations may skip
    /// reading the body, in which case a success carries an empty one.
    async fn check(&self, url: &Url) -> FetchResult {
        self.fetch(url).await
    }
}

/// [`Fetch`] implementation backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from the crawler and user agent configuration
    pub fn from_config(
        crawler: &CrawlerConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, reqwest::Error> {
        build_http_client(crawler, user_agent).map(Self::new)
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        fetch_url(&self.client, url.as_str()).await
    }

    async fn check(&self, url: &Url) -> FetchResult {
        check_url(&self.client, url.as_str()).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `crawler` - Timeouts for each request
/// * `user_agent` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use deadlink_crawler::config::{CrawlerConfig, UserAgentConfig};
/// use deadlink_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// # Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx (after redirects) | Success |
/// | Any other status | HttpError |
/// | Timeout | NetworkError (timed out) |
/// | Connection refused / DNS / TLS | NetworkError |
/// | Too many redirects | NetworkError |
/// | Body read failure | NetworkError |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            body,
        },
        Err(e) => classify_error(&e),
    }
}

/// Requests a URL and classifies the outcome from the status alone
///
/// The body is never read, so a 2xx answer is a success even if the
/// connection drops while the body is streaming.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to check
pub async fn check_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    if status.is_success() {
        FetchResult::Success {
            status_code: status.as_u16(),
            body: String::new(),
        }
    } else {
        FetchResult::HttpError {
            status_code: status.as_u16(),
        }
    }
}

/// Maps a transport error onto a network failure
fn classify_error(e: &reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            timed_out: true,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: format!("Connection failed: {}", e),
            timed_out: false,
        }
    } else if e.is_redirect() {
        FetchResult::NetworkError {
            error: "Too many redirects".to_string(),
            timed_out: false,
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
            timed_out: false,
        }
    }
}
