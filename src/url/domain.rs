use url::Url;

/// Extracts the domain (host plus any explicit port) from a URL
///
/// The port is kept because a crawl seeded at `http://127.0.0.1:8000` must
/// treat `127.0.0.1:9000` as a different site. Default ports are never
/// included, since the `url` crate drops them during parsing.
///
/// # Arguments
///
/// * `url` - The URL to extract the domain from
///
/// # Returns
///
/// * `Some(String)` - The lowercase host, with `:port` when one is explicit
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use deadlink_crawler::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8000/").unwrap();
/// assert_eq!(extract_domain(&url), Some("127.0.0.1:8000".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
