/// Checks if a domain matches a wildcard pattern
///
/// Two kinds of patterns are supported:
/// 1. Exact match: "example.com" matches only "example.com"
/// 2. Wildcard match: "*.example.com" matches "example.com" itself and any
///    subdomain, however deeply nested
///
/// Both sides are expected in lowercase; ports are part of the compared text.
///
/// # Examples
///
/// ```
/// use deadlink_crawler::url::matches_wildcard;
///
/// assert!(matches_wildcard("www.gov.uk", "www.gov.uk"));
/// assert!(!matches_wildcard("www.gov.uk", "gov.uk"));
///
/// assert!(matches_wildcard("*.justice.gov.uk", "justice.gov.uk"));
/// assert!(matches_wildcard("*.justice.gov.uk", "data.justice.gov.uk"));
/// assert!(!matches_wildcard("*.justice.gov.uk", "injustice.gov.uk"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => {
            candidate == base
                || candidate
                    .strip_suffix(base)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        }
        None => candidate == pattern,
    }
}
