//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use deadlink_crawler::config::Config;
use deadlink_crawler::crawler::{run_crawl, Crawler};
use deadlink_crawler::output::{format_markdown_report, format_report};
use deadlink_crawler::state::BrokenReason;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns the host:port a mock server listens on
fn domain_of(server: &MockServer) -> String {
    let url = url::Url::parse(&server.uri()).expect("Failed to parse mock server URL");
    format!(
        "{}:{}",
        url.host_str().expect("Mock server URL has no host"),
        url.port().expect("Mock server URL has no port")
    )
}

/// Creates a test configuration crawling the given start URL
fn create_test_config(start_url: &str, max_depth: u32) -> Config {
    let mut config = Config::default();
    config.crawler.start_url = start_url.to_string();
    config.crawler.max_depth = max_depth;
    config.crawler.request_timeout_secs = 5;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config
}

/// Mounts an HTML page expected to be fetched exactly `times` times
async fn mount_page(server: &MockServer, page: &str, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_reports_broken_link_with_source() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &format!(
            r#"<html><body>
            <a href="/p">ok</a>
            <a href="{}/q">bad</a>
            </body></html>"#,
            base_url
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/p", "<html><body>fine</body></html>", 1).await;

    Mock::given(method("GET"))
        .and(path("/q"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 2);
    let report = run_crawl(&config).await.expect("Crawl failed");

    let seed = format!("{}/", base_url);
    assert_eq!(report.broken_count(), 1);
    assert_eq!(report.broken[0].url, format!("{}/q", base_url));
    assert_eq!(report.broken[0].source, seed);
    assert_eq!(report.broken[0].reason, BrokenReason::HttpStatus(404));
    assert_eq!(report.run.domain, domain_of(&mock_server));

    let text = format_report(&report, true);
    assert_eq!(
        text,
        format!(
            "Broken links encountered: 1\n\
             Broken links and their sources:\n\
             - {}/q (found on: {})\n",
            base_url, seed
        )
    );
}

#[tokio::test]
async fn test_zero_depth_makes_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 0);
    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.pages_visited, 0);
    assert_eq!(report.broken_count(), 0);
}

#[tokio::test]
async fn test_cycle_fetched_once_per_page() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/a", r#"<a href="/b">to b</a>"#, 1).await;
    mount_page(&mock_server, "/b", r#"<a href="/a/">to a</a>"#, 1).await;

    let config = create_test_config(&format!("{}/a", mock_server.uri()), 5);
    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.pages_visited, 2);
    assert_eq!(report.broken_count(), 0);
}

#[tokio::test]
async fn test_secondary_domain_checked_not_followed() {
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;

    mount_page(
        &primary,
        "/",
        &format!(
            r#"<a href="{0}/guide">guide</a><a href="{0}/gone">gone</a>"#,
            secondary.uri()
        ),
        1,
    )
    .await;
    mount_page(
        &secondary,
        "/guide",
        &format!(r#"<a href="{}/deeper">deeper</a>"#, secondary.uri()),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .expect(1)
        .mount(&secondary)
        .await;
    Mock::given(method("GET"))
        .and(path("/deeper"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&secondary)
        .await;

    let mut config = create_test_config(&primary.uri(), 5);
    config.scope.secondary_domains = vec![domain_of(&secondary)];

    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.broken_count(), 1);
    assert_eq!(report.broken[0].url, format!("{}/gone", secondary.uri()));
    assert_eq!(report.broken[0].reason, BrokenReason::HttpStatus(410));
}

#[tokio::test]
async fn test_out_of_scope_domain_never_contacted() {
    let primary = MockServer::start().await;
    let elsewhere = MockServer::start().await;

    mount_page(
        &primary,
        "/",
        &format!(r#"<a href="{}/missing">external</a>"#, elsewhere.uri()),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&elsewhere)
        .await;

    let config = create_test_config(&primary.uri(), 5);
    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.broken_count(), 0);
}

#[tokio::test]
async fn test_excluded_paths_never_fetched() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/feedback/form">feedback</a><a href="/admin/panel">admin</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/feedback/form"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/panel"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), 3);
    config.scope.excluded_paths.push("/admin".to_string());

    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.broken_count(), 0);
}

#[tokio::test]
async fn test_slow_response_reported_as_timeout() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/slow">slow</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), 2);
    config.crawler.request_timeout_secs = 1;

    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.broken_count(), 1);
    assert_eq!(report.broken[0].reason, BrokenReason::Timeout);
}

#[tokio::test]
async fn test_redirect_to_live_page_is_not_broken() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/old">old</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/new", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/new", "<p>moved here</p>", 1).await;

    let config = create_test_config(&mock_server.uri(), 2);
    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.broken_count(), 0);
}

#[tokio::test]
async fn test_concurrent_crawl_fetches_each_page_once() {
    let mock_server = MockServer::start().await;

    let hub: String = (0..10)
        .map(|i| format!(r#"<a href="/page{}">page {}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/", &hub, 1).await;
    for i in 0..10 {
        mount_page(&mock_server, &format!("/page{}", i), &hub, 1).await;
    }

    let mut config = create_test_config(&mock_server.uri(), 4);
    config.crawler.max_concurrent_fetches = 4;

    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.pages_visited, 11);
    assert_eq!(report.broken_count(), 0);
}

#[tokio::test]
async fn test_markdown_report_from_real_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/missing">missing</a>"#, 1).await;

    let config = create_test_config(&mock_server.uri(), 2);
    let crawler = Crawler::from_config(&config).expect("Failed to create crawler");
    let report = crawler
        .run(&config.crawler.start_url, config.crawler.max_depth)
        .await
        .expect("Crawl failed");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let summary_path = dir.path().join("broken-links.md");
    deadlink_crawler::output::generate_markdown_report(&report, &summary_path)
        .expect("Failed to write report");

    let written = std::fs::read_to_string(&summary_path).expect("Failed to read report");
    assert_eq!(written, format_markdown_report(&report));
    assert!(written.contains(&format!("| {}/missing |", mock_server.uri())));
    assert!(written.contains("HTTP 404"));
}

#[tokio::test]
async fn test_invalid_start_url_rejected() {
    let config = create_test_config("not a url", 3);
    let result = run_crawl(&config).await;
    assert!(matches!(
        result,
        Err(deadlink_crawler::CrawlError::InvalidSeed { .. })
    ));
}
