//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives the traversal:
//! - Validating the seed and deriving the primary domain
//! - Pulling tasks from the frontier and running them, one or several at a time
//! - Enforcing depth, excluded paths, deduplication and domain scope
//! - Fetching pages, recording broken links and expanding primary-domain pages

use crate::config::Config;
use crate::crawler::fetcher::{Fetch, FetchResult, HttpFetcher};
use crate::crawler::parser::extract_links;
use crate::crawler::scheduler::{CrawlTask, Frontier};
use crate::output::{CrawlReport, RunInfo};
use crate::state::{BrokenReason, CrawlState};
use crate::url::{canonicalize_query, extract_domain, is_excluded_path, resolve_link};
use crate::{CrawlError, UrlError};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use url::Url;

/// Main crawler structure
///
/// Cloning a `Crawler` is cheap and yields a handle to the same crawl state,
/// which is how concurrent branches share the visited set and the report.
pub struct Crawler<F = HttpFetcher> {
    fetcher: Arc<F>,
    state: Arc<CrawlState>,
    excluded_paths: Arc<[String]>,
    max_concurrent: usize,
}

impl<F> Clone for Crawler<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            state: Arc::clone(&self.state),
            excluded_paths: Arc::clone(&self.excluded_paths),
            max_concurrent: self.max_concurrent,
        }
    }
}

impl Crawler<HttpFetcher> {
    /// Creates a crawler backed by a real HTTP client
    ///
    /// # Arguments
    ///
    /// * `config` - The validated crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Successfully created crawler
    /// * `Err(CrawlError)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let fetcher = HttpFetcher::from_config(&config.crawler, &config.user_agent)?;
        Ok(Self::new(
            fetcher,
            config.scope.secondary_domains.clone(),
            config.scope.excluded_paths.clone(),
        )
        .with_concurrency(config.crawler.max_concurrent_fetches as usize))
    }
}

impl<F: Fetch + 'static> Crawler<F> {
    /// Creates a sequential crawler around any fetch capability
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The fetch capability
    /// * `secondary_domains` - Hosts checked for liveness but never expanded
    /// * `excluded_paths` - Path prefixes that are never fetched
    pub fn new(fetcher: F, secondary_domains: Vec<String>, excluded_paths: Vec<String>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            state: Arc::new(CrawlState::new(secondary_domains)),
            excluded_paths: excluded_paths.into(),
            max_concurrent: 1,
        }
    }

    /// Sets how many fetches may be in flight at once (minimum 1)
    pub fn with_concurrency(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// The shared crawl state
    pub fn state(&self) -> &Arc<CrawlState> {
        &self.state
    }

    /// The fetch capability
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Marks a URL as visited; true only the first time
    pub fn visit(&self, url: &str) -> bool {
        self.state.visit(url)
    }

    /// Records a broken link and the page it was found on
    pub fn report_broken(&self, url: &str, source: &str, reason: BrokenReason) -> bool {
        self.state.report_broken(url, source, reason)
    }

    /// Runs a complete crawl from a start URL
    ///
    /// The seed is validated first; its domain becomes the primary domain.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl ran to completion
    /// * `Err(CrawlError::InvalidSeed)` - The start URL is unusable
    ///
    /// # Example
    ///
    /// ```no_run
    /// use deadlink_crawler::{Config, Crawler};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let crawler = Crawler::from_config(&Config::default())?;
    /// let report = crawler.run("http://127.0.0.1:8000", 7).await?;
    /// println!("Broken links encountered: {}", report.broken_count());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(&self, start_url: &str, depth: u32) -> crate::Result<CrawlReport> {
        let (seed, domain) = resolve_seed(start_url)?;
        let run = RunInfo::new(seed.as_str(), &domain, depth);
        let timer = Instant::now();

        self.crawl(&domain, seed.as_str(), depth).await;

        Ok(CrawlReport::collect(&self.state, run, timer.elapsed(), true))
    }

    /// Crawls depth-first from `start_url`, staying within `domain`
    ///
    /// Tasks come off the frontier and run as tokio tasks, at most
    /// `max_concurrent` at a time. With a single slot the visit order is the
    /// pre-order of a recursive depth-first descent. Dropping the returned
    /// future aborts all in-flight fetches; state gathered so far stays valid.
    pub async fn crawl(&self, domain: &str, start_url: &str, depth: u32) {
        let domain: Arc<str> = Arc::from(domain);
        let mut frontier = Frontier::new(CrawlTask::seed(start_url, depth));
        let mut in_flight: JoinSet<Vec<CrawlTask>> = JoinSet::new();

        loop {
            while in_flight.len() < self.max_concurrent {
                let Some(task) = frontier.next_task() else {
                    break;
                };
                let crawler = self.clone();
                let domain = Arc::clone(&domain);
                in_flight.spawn(async move { crawler.step(&domain, task).await });
            }

            match in_flight.join_next().await {
                Some(Ok(children)) => frontier.push_children(children),
                Some(Err(e)) => tracing::error!("Crawl task failed: {}", e),
                None => break,
            }
        }

        tracing::debug!(
            "Crawl of {} finished: {} URLs visited, {} broken",
            domain,
            self.state.visited_count(),
            self.state.broken_count()
        );
    }

    /// Processes a single task and returns the tasks for its outbound links
    async fn step(&self, domain: &str, task: CrawlTask) -> Vec<CrawlTask> {
        if task.remaining_depth == 0 {
            return Vec::new();
        }

        let parsed = Url::parse(&task.target);

        if let Ok(url) = &parsed {
            if is_excluded_path(url, &self.excluded_paths) {
                tracing::debug!("Skipping excluded path: {}", task.target);
                return Vec::new();
            }
        }

        if !self.state.visit(&task.target) {
            tracing::trace!("Already visited: {}", task.target);
            return Vec::new();
        }

        let mut url = match parsed {
            Ok(url) => url,
            Err(source) => {
                let err = CrawlError::UrlParse {
                    url: task.target.clone(),
                    source,
                };
                tracing::warn!("{}", err);
                return Vec::new();
            }
        };

        let Some(host) = extract_domain(&url) else {
            tracing::debug!("Skipping link without host: {}", task.target);
            return Vec::new();
        };

        let policy = self.state.extraction_policy(&host, domain);
        if !policy.should_fetch() {
            tracing::debug!("Skipping out-of-scope link: {}", task.target);
            return Vec::new();
        }

        tracing::info!("Visiting: {}", task.target);

        canonicalize_query(&mut url);
        let result = if policy.should_expand() {
            self.fetcher.fetch(&url).await
        } else {
            self.fetcher.check(&url).await
        };

        if let Some(reason) = result.broken_reason() {
            tracing::warn!("{}", broken_link_error(&task.target, &reason));
            self.state.report_broken(&task.target, &task.source, reason);
            return Vec::new();
        }

        if !policy.should_expand() {
            tracing::info!("Checked link within secondary domain: {}", task.target);
            return Vec::new();
        }

        let FetchResult::Success { body, .. } = result else {
            return Vec::new();
        };

        let links = extract_links(&body, domain);
        tracing::debug!("Found {} links on {}", links.len(), task.target);

        task.children(links)
    }
}

/// Validates a start URL and derives the primary domain from it
///
/// The seed goes through the same resolution as discovered links, so
/// `http://127.0.0.1:8000` and `http://127.0.0.1:8000/` are the same page.
///
/// # Returns
///
/// * `Ok((Url, String))` - The resolved seed and its domain
/// * `Err(CrawlError::InvalidSeed)` - Unparseable, hostless or non-HTTP URL
pub fn resolve_seed(start_url: &str) -> crate::Result<(Url, String)> {
    let invalid = |reason: UrlError| CrawlError::InvalidSeed {
        url: start_url.to_string(),
        reason: reason.to_string(),
    };

    let parsed =
        Url::parse(start_url.trim()).map_err(|e| invalid(UrlError::Parse(e.to_string())))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(invalid(UrlError::InvalidScheme(parsed.scheme().to_string())));
    }

    let domain = extract_domain(&parsed).ok_or_else(|| invalid(UrlError::MissingDomain))?;

    let seed = resolve_link(parsed.as_str(), &domain)
        .ok_or_else(|| invalid(UrlError::Parse(parsed.to_string())))?;

    Ok((seed, domain))
}

/// Describes a broken link as an error for logging
fn broken_link_error(url: &str, reason: &BrokenReason) -> CrawlError {
    match reason {
        BrokenReason::HttpStatus(status) => CrawlError::HttpStatus {
            url: url.to_string(),
            status: *status,
        },
        BrokenReason::Timeout => CrawlError::Timeout {
            url: url.to_string(),
        },
        BrokenReason::Network(message) => CrawlError::Fetch {
            url: url.to_string(),
            message: message.clone(),
        },
    }
}

/// Runs a complete crawl operation from configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration; the start URL and depth come
///   from its `[crawler]` section
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(CrawlError)` - The client could not be built or the seed is invalid
///
/// # Example
///
/// ```no_run
/// use deadlink_crawler::config::load_config;
/// use deadlink_crawler::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("crawler.toml"))?;
/// let report = run_crawl(&config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> crate::Result<CrawlReport> {
    let crawler = Crawler::from_config(config)?;
    crawler
        .run(&config.crawler.start_url, config.crawler.max_depth)
        .await
}
