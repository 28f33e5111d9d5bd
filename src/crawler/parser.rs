//! HTML link extraction
//!
//! Pages are handed to html5ever (through `scraper`), which recovers from
//! malformed or truncated markup the way browsers do. Extraction therefore
//! never fails: a broken page simply yields the anchors that could be
//! recognised.

use crate::url::resolve_link;
use scraper::{Html, Selector};

/// Extracts the resolved targets of every `<a href>` on a page
///
/// Each `href` is resolved with [`resolve_link`] against the owning domain;
/// links that resolve to nothing (`mailto:`, `javascript:`, malformed) are
/// dropped. Results keep document order and may contain duplicates, which
/// the crawler's visited set absorbs.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `domain` - The owning page's domain (host with optional port)
///
/// # Example
///
/// ```
/// use deadlink_crawler::crawler::extract_links;
///
/// let html = r#"<a href="/p">ok</a><a href="http://x.test/q">bad</a><a href="mailto:a@b.com">mail</a>"#;
/// let links = extract_links(html, "x.test");
/// assert_eq!(links, vec!["http://x.test/p", "http://x.test/q"]);
/// ```
pub fn extract_links(html: &str, domain: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, domain))
        .map(|url| url.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_relative_and_absolute() {
        let html = r#"<html><body>
            <a href="/p">ok</a>
            <a href="http://x.test/q">bad</a>
        </body></html>"#;
        let links = extract_links(html, "x.test");
        assert_eq!(links, vec!["http://x.test/p", "http://x.test/q"]);
    }

    #[test]
    fn test_off_domain_links_are_kept() {
        let html = r#"<a href="https://www.gov.uk/guidance/">gov</a>"#;
        let links = extract_links(html, "x.test");
        assert_eq!(links, vec!["https://www.gov.uk/guidance"]);
    }

    #[test]
    fn test_skip_non_http_links() {
        let html = r#"
            <a href="mailto:test@example.com">Email</a>
            <a href="javascript:void(0)">JS</a>
            <a href="tel:+1234567890">Call</a>
            <a href="/valid">Valid</a>
        "#;
        let links = extract_links(html, "x.test");
        assert_eq!(links, vec!["http://x.test/valid"]);
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<a name="top">Top</a><a href="/here">Here</a>"#;
        let links = extract_links(html, "x.test");
        assert_eq!(links, vec!["http://x.test/here"]);
    }

    #[test]
    fn test_non_anchor_elements_ignored() {
        let html = r#"
            <link rel="stylesheet" href="/style.css">
            <script src="/app.js"></script>
            <img src="/logo.png">
            <area href="/map-area">
        "#;
        assert!(extract_links(html, "x.test").is_empty());
    }

    #[test]
    fn test_truncated_html_yields_partial_links() {
        let html = r#"<html><body><a href="/first">1</a><div><a href="/second">2</a><a hr"#;
        let links = extract_links(html, "x.test");
        assert_eq!(links, vec!["http://x.test/first", "http://x.test/second"]);
    }

    #[test]
    fn test_unclosed_tags() {
        let html = r#"<p><a href="/one">one<p><a href="/two/">two"#;
        let links = extract_links(html, "x.test");
        assert_eq!(links, vec!["http://x.test/one", "http://x.test/two"]);
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let html = r#"<a href="/a">1</a><a href="/b">2</a><a href="/a#frag">3</a>"#;
        let links = extract_links(html, "x.test");
        assert_eq!(
            links,
            vec!["http://x.test/a", "http://x.test/b", "http://x.test/a"]
        );
    }

    #[test]
    fn test_empty_document() {
        assert!(extract_links("", "x.test").is_empty());
    }
}
