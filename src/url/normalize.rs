use url::Url;

/// Resolves a raw `href` value into an absolute, canonical URL
///
/// # Resolution Steps
///
/// 1. Trim surrounding whitespace and parse the reference against the owning
///    domain's root (`http://<domain>/`); reject if malformed
/// 2. Drop any scheme other than `http`/`https` (`mailto:`, `javascript:`,
///    `tel:`, `data:`, `ftp:` ...)
/// 3. Scheme-less references default to `http`, host-less references to the
///    owning domain
/// 4. Remove the fragment (everything after `#`)
/// 5. Remove exactly one trailing slash, unless the path is the root `/`
/// 6. Re-encode the query string canonically (see [`canonicalize_query`])
///
/// Off-domain links are returned as-is; scope is decided by the crawler.
/// Applying the function to its own output yields the same URL, except for
/// paths that ended in more than one slash.
///
/// # Arguments
///
/// * `href` - The raw attribute value
/// * `domain` - The owning page's domain (host with optional port)
///
/// # Returns
///
/// * `Some(Url)` - The resolved link
/// * `None` - The link should be dropped
///
/// # Examples
///
/// ```
/// use deadlink_crawler::url::resolve_link;
///
/// let url = resolve_link("/page/", "x.test").unwrap();
/// assert_eq!(url.as_str(), "http://x.test/page");
///
/// assert!(resolve_link("mailto:a@b.com", "x.test").is_none());
/// ```
pub fn resolve_link(href: &str, domain: &str) -> Option<Url> {
    let base = Url::parse(&format!("http://{}/", domain)).ok()?;
    let mut url = base.join(href.trim()).ok()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    // "http:" with no authority can leave an empty host behind
    if url.host_str().map_or(true, str::is_empty) {
        return None;
    }

    url.set_fragment(None);

    let path = normalize_path(url.path());
    url.set_path(&path);

    canonicalize_query(&mut url);

    Some(url)
}

/// Removes one trailing slash from paths longer than the root
fn normalize_path(path: &str) -> String {
    match path.strip_suffix('/') {
        Some(trimmed) if path.len() > 1 => trimmed.to_string(),
        _ => path.to_string(),
    }
}

/// Re-encodes the query string in a canonical form
///
/// Parameters are decoded, stably sorted by key (values of a repeated key
/// keep their relative order) and re-serialized with form encoding, so two
/// spellings of the same query such as `?b=2&a=%31` and `?a=1&b=2` compare
/// equal. An empty query is removed together with its `?`.
///
/// # Examples
///
/// ```
/// use deadlink_crawler::url::canonicalize_query;
/// use url::Url;
///
/// let mut url = Url::parse("http://x.test/search?q=rust%20lang&b=2&a=1").unwrap();
/// canonicalize_query(&mut url);
/// assert_eq!(url.as_str(), "http://x.test/search?a=1&b=2&q=rust+lang");
/// ```
pub fn canonicalize_query(url: &mut Url) {
    if url.query().is_none() {
        return;
    }

    let mut params: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    if params.is_empty() {
        url.set_query(None);
        return;
    }

    params.sort_by(|a, b| a.0.cmp(&b.0));
    url.query_pairs_mut().clear().extend_pairs(params);
}
