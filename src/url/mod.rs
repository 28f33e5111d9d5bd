//! URL handling module
//!
//! This module provides link resolution and normalization, domain extraction,
//! wildcard matching, and the per-host extraction policy used to keep a crawl
//! inside its primary and secondary domains.

mod domain;
mod matcher;
mod normalize;

use url::Url;

// Re-export main functions
pub use domain::extract_domain;
pub use matcher::matches_wildcard;
pub use normalize::{canonicalize_query, resolve_link};

/// What the crawler does with a link, decided from its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionPolicy {
    /// Primary domain - fetch, check, and follow its links
    Expand,
    /// Secondary domain - fetch and check, but never follow its links
    CheckOnly,
    /// Out of scope - neither fetched nor reported
    Skip,
}

impl ExtractionPolicy {
    /// Returns true if links with this policy are fetched
    pub fn should_fetch(&self) -> bool {
        matches!(self, Self::Expand | Self::CheckOnly)
    }

    /// Returns true if the fetched body is scanned for more links
    pub fn should_expand(&self) -> bool {
        matches!(self, Self::Expand)
    }
}

/// Classifies a host against the crawl's domain scope
///
/// Priority order:
/// 1. Primary domain → `Expand`
/// 2. Any secondary pattern (see [`matches_wildcard`]) → `CheckOnly`
/// 3. Anything else → `Skip`
///
/// # Examples
///
/// ```
/// use deadlink_crawler::url::{classify_host, ExtractionPolicy};
///
/// let secondary = vec!["*.gov.uk".to_string()];
/// assert_eq!(classify_host("x.test", "x.test", &secondary), ExtractionPolicy::Expand);
/// assert_eq!(classify_host("www.gov.uk", "x.test", &secondary), ExtractionPolicy::CheckOnly);
/// assert_eq!(classify_host("other.org", "x.test", &secondary), ExtractionPolicy::Skip);
/// ```
pub fn classify_host(host: &str, primary: &str, secondary: &[String]) -> ExtractionPolicy {
    if host == primary {
        return ExtractionPolicy::Expand;
    }

    if secondary
        .iter()
        .any(|pattern| matches_wildcard(pattern, host))
    {
        return ExtractionPolicy::CheckOnly;
    }

    ExtractionPolicy::Skip
}

/// Checks whether a URL falls under one of the excluded path prefixes
///
/// A prefix matches its own path with or without the trailing slash, so
/// `/feedback/` excludes `/feedback`, `/feedback/` and `/feedback/form`, but
/// not `/feedbacks`.
pub fn is_excluded_path(url: &Url, excluded: &[String]) -> bool {
    let path = url.path();
    excluded.iter().any(|prefix| {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return true;
        }
        path == prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}
