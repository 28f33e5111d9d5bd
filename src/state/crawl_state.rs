use crate::state::link_state::{BrokenLink, BrokenReason};
use crate::url::{classify_host, ExtractionPolicy};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Broken link bookkeeping, always updated under a single lock
#[derive(Debug, Default)]
struct BrokenLedger {
    count: usize,
    links: Vec<String>,
    sources: HashMap<String, String>,
    reasons: HashMap<String, BrokenReason>,
}

/// Shared state of a single crawl invocation
///
/// One `CrawlState` lives for the duration of one crawl and is shared by
/// handle between concurrently running branches. The visited set and the
/// broken link ledger each sit behind their own mutex, so `visit` and
/// `report_broken` are atomic check-and-set operations.
///
/// Secondary domains are fixed at construction.
#[derive(Debug)]
pub struct CrawlState {
    visited: Mutex<HashSet<String>>,
    broken: Mutex<BrokenLedger>,
    secondary_domains: Vec<String>,
}

impl CrawlState {
    /// Creates an empty state with the given secondary domain patterns
    pub fn new(secondary_domains: Vec<String>) -> Self {
        Self {
            visited: Mutex::new(HashSet::new()),
            broken: Mutex::new(BrokenLedger::default()),
            secondary_domains: secondary_domains
                .into_iter()
                .map(|d| d.to_lowercase())
                .collect(),
        }
    }

    /// Marks a URL as visited
    ///
    /// # Returns
    ///
    /// * `true` - The URL was not seen before and is now recorded
    /// * `false` - The URL was already visited
    pub fn visit(&self, url: &str) -> bool {
        lock(&self.visited).insert(url.to_string())
    }

    /// Returns true if the URL has been visited
    pub fn is_visited(&self, url: &str) -> bool {
        lock(&self.visited).contains(url)
    }

    /// Number of URLs dispatched so far
    pub fn visited_count(&self) -> usize {
        lock(&self.visited).len()
    }

    /// Records a broken link and the page it was found on
    ///
    /// The first report of a URL wins: later reports of the same URL leave
    /// the count, the order and the recorded source untouched.
    ///
    /// # Returns
    ///
    /// * `true` - The link was recorded
    /// * `false` - The link had already been reported
    pub fn report_broken(&self, url: &str, source: &str, reason: BrokenReason) -> bool {
        let mut ledger = lock(&self.broken);
        if ledger.sources.contains_key(url) {
            return false;
        }

        ledger.count += 1;
        ledger.links.push(url.to_string());
        ledger.sources.insert(url.to_string(), source.to_string());
        ledger.reasons.insert(url.to_string(), reason);
        true
    }

    /// Number of broken links recorded
    pub fn broken_count(&self) -> usize {
        lock(&self.broken).count
    }

    /// Broken URLs in discovery order
    pub fn broken_links(&self) -> Vec<String> {
        lock(&self.broken).links.clone()
    }

    /// The page a broken URL was first found on
    pub fn broken_source(&self, url: &str) -> Option<String> {
        lock(&self.broken).sources.get(url).cloned()
    }

    /// Full broken link records in discovery order
    pub fn broken_entries(&self) -> Vec<BrokenLink> {
        let ledger = lock(&self.broken);
        ledger
            .links
            .iter()
            .filter_map(|url| {
                Some(BrokenLink {
                    url: url.clone(),
                    source: ledger.sources.get(url)?.clone(),
                    reason: ledger.reasons.get(url)?.clone(),
                })
            })
            .collect()
    }

    /// Secondary domain patterns for this crawl
    pub fn secondary_domains(&self) -> &[String] {
        &self.secondary_domains
    }

    /// Decides how a host is treated relative to the primary domain
    pub fn extraction_policy(&self, host: &str, primary: &str) -> ExtractionPolicy {
        classify_host(host, primary, &self.secondary_domains)
    }
}

/// Acquires a lock, recovering the data if another branch panicked
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
