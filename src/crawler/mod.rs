//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetch` capability
//! - HTML parsing and link extraction
//! - The depth-first work stack
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{resolve_seed, run_crawl, Crawler};
pub use fetcher::{build_http_client, check_url, fetch_url, Fetch, FetchResult, HttpFetcher};
pub use parser::extract_links;
pub use scheduler::{CrawlTask, Frontier};
