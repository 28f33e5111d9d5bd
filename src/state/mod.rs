//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: visited set and broken link ledger shared by one crawl
//! - `BrokenReason`: why a link was classified as broken
//! - `BrokenLink`: a broken URL with the page it was found on

mod crawl_state;
mod link_state;

// Re-export main types
pub use crawl_state::CrawlState;
pub use link_state::{BrokenLink, BrokenReason};
