//! Output module for crawl reports
//!
//! This module handles:
//! - Snapshotting the crawl state into a `CrawlReport`
//! - Printing the broken link report to stdout
//! - Writing an optional markdown report

mod markdown;
mod report;

pub use markdown::{format_markdown_report, generate_markdown_report};
pub use report::{format_report, print_report};

use crate::state::{BrokenLink, CrawlState};
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// What a crawl was started with
#[derive(Debug, Clone)]
pub struct RunInfo {
    /// The resolved seed URL
    pub start_url: String,

    /// The primary domain
    pub domain: String,

    /// Maximum traversal depth
    pub max_depth: u32,

    /// When the crawl started
    pub started_at: DateTime<Utc>,
}

impl RunInfo {
    /// Describes a run starting now
    pub fn new(start_url: &str, domain: &str, max_depth: u32) -> Self {
        Self {
            start_url: start_url.to_string(),
            domain: domain.to_string(),
            max_depth,
            started_at: Utc::now(),
        }
    }
}

/// Snapshot of a crawl's results
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// What the crawl was started with
    pub run: RunInfo,

    /// Wall-clock time spent crawling
    pub duration: Duration,

    /// False when the crawl was interrupted before the frontier drained
    pub completed: bool,

    /// URLs that passed the dedup gate
    pub pages_visited: usize,

    /// Broken links in discovery order
    pub broken: Vec<BrokenLink>,
}

impl CrawlReport {
    /// Takes a snapshot of the crawl state
    ///
    /// # Arguments
    ///
    /// * `state` - The crawl state to read
    /// * `run` - What the crawl was started with
    /// * `duration` - How long the crawl ran
    /// * `completed` - Whether the frontier drained
    pub fn collect(state: &CrawlState, run: RunInfo, duration: Duration, completed: bool) -> Self {
        Self {
            run,
            duration,
            completed,
            pages_visited: state.visited_count(),
            broken: state.broken_entries(),
        }
    }

    /// Returns the number of broken links
    pub fn broken_count(&self) -> usize {
        self.broken.len()
    }

    /// Returns whether any broken link was found
    pub fn has_broken_links(&self) -> bool {
        !self.broken.is_empty()
    }

    /// Returns the crawl status label
    pub fn status(&self) -> &'static str {
        if self.completed {
            "completed"
        } else {
            "interrupted"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BrokenReason;

    #[test]
    fn test_collect_from_state() {
        let state = CrawlState::new(vec![]);
        state.visit("http://x.test/");
        state.visit("http://x.test/q");
        state.report_broken(
            "http://x.test/q",
            "http://x.test/",
            BrokenReason::HttpStatus(404),
        );

        let run = RunInfo::new("http://x.test/", "x.test", 2);
        let report = CrawlReport::collect(&state, run, Duration::from_millis(1500), true);

        assert_eq!(report.pages_visited, 2);
        assert_eq!(report.broken_count(), 1);
        assert!(report.has_broken_links());
        assert_eq!(report.broken[0].url, "http://x.test/q");
        assert_eq!(report.status(), "completed");
    }

    #[test]
    fn test_interrupted_status() {
        let state = CrawlState::new(vec![]);
        let run = RunInfo::new("http://x.test/", "x.test", 2);
        let report = CrawlReport::collect(&state, run, Duration::ZERO, false);

        assert_eq!(report.status(), "interrupted");
        assert!(!report.has_broken_links());
    }
}
