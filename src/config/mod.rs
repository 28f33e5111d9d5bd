//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every key is optional; command-line flags are layered on top by the
//! binary and the merged result is re-validated with [`validate`].
//!
//! # Example
//!
//! ```no_run
//! use deadlink_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, ScopeConfig, UserAgentConfig, DEFAULT_MAX_DEPTH,
    DEFAULT_SECONDARY_DOMAINS, DEFAULT_START_URL,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
