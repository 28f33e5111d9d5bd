use serde::Deserialize;

/// Default start URL when neither the CLI nor the config file names one
pub const DEFAULT_START_URL: &str = "http://127.0.0.1:8000";

/// Default maximum crawl depth
pub const DEFAULT_MAX_DEPTH: u32 = 7;

/// Secondary domains checked when the config does not name any
pub const DEFAULT_SECONDARY_DOMAINS: [&str; 3] = [
    "data.justice.gov.uk",
    "www.gov.uk",
    "criminal-justice-delivery-data-dashboards.justice.gov.uk",
];

/// Main configuration structure
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub scope: ScopeConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// URL the crawl starts from; its host becomes the primary domain
    pub start_url: String,

    /// Maximum number of hops from the start URL
    pub max_depth: u32,

    /// Maximum number of fetches in flight at once
    pub max_concurrent_fetches: u32,

    /// Total time allowed for a single request (seconds)
    pub request_timeout_secs: u64,

    /// Time allowed for establishing a connection (seconds)
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_concurrent_fetches: 1,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: Option<String>,

    /// Email address for crawler-related contact
    pub contact_email: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
            contact_email: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`, with the
    /// parenthesised part reduced to whatever contact details are configured.
    pub fn header_value(&self) -> String {
        let base = format!("{}/{}", self.crawler_name, self.crawler_version);
        let contact: Vec<String> = [
            self.contact_url.as_ref().map(|u| format!("+{}", u)),
            self.contact_email.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if contact.is_empty() {
            base
        } else {
            format!("{} ({})", base, contact.join("; "))
        }
    }
}

/// Domain scope configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScopeConfig {
    /// Hosts that are checked for liveness but never expanded
    /// (e.g. "www.gov.uk" or "*.justice.gov.uk")
    ///
    /// Defaults to [`DEFAULT_SECONDARY_DOMAINS`]. A list in the config file
    /// replaces the defaults; `--secondary-domain` flags add to whichever
    /// list is in effect.
    pub secondary_domains: Vec<String>,

    /// Path prefixes that must never be fetched
    pub excluded_paths: Vec<String>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            secondary_domains: DEFAULT_SECONDARY_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            excluded_paths: vec!["/feedback/".to_string()],
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Print the page each broken link was found on
    pub show_sources: bool,

    /// Optional path of a markdown report to write after the crawl
    pub summary_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_sources: true,
            summary_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.crawler.start_url, "http://127.0.0.1:8000");
        assert_eq!(config.crawler.max_depth, 7);
        assert_eq!(config.crawler.max_concurrent_fetches, 1);
        assert_eq!(config.scope.excluded_paths, vec!["/feedback/".to_string()]);
        assert_eq!(
            config.scope.secondary_domains,
            vec![
                "data.justice.gov.uk",
                "www.gov.uk",
                "criminal-justice-delivery-data-dashboards.justice.gov.uk",
            ]
        );
        assert!(config.output.show_sources);
    }

    #[test]
    fn test_user_agent_without_contact() {
        let ua = UserAgentConfig {
            crawler_name: "LinkBot".to_string(),
            crawler_version: "2.1".to_string(),
            contact_url: None,
            contact_email: None,
        };
        assert_eq!(ua.header_value(), "LinkBot/2.1");
    }

    #[test]
    fn test_user_agent_with_contact() {
        let ua = UserAgentConfig {
            crawler_name: "LinkBot".to_string(),
            crawler_version: "2.1".to_string(),
            contact_url: Some("https://example.com/about".to_string()),
            contact_email: Some("ops@example.com".to_string()),
        };
        assert_eq!(
            ua.header_value(),
            "LinkBot/2.1 (+https://example.com/about; ops@example.com)"
        );
    }
}
