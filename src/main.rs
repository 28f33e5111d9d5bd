//! deadlink-crawler main entry point
//!
//! This is the command-line interface for the broken link crawler.

use anyhow::Context;
use clap::Parser;
use deadlink_crawler::config::{load_config, validate, Config};
use deadlink_crawler::crawler::{resolve_seed, Crawler};
use deadlink_crawler::output::{generate_markdown_report, print_report, CrawlReport, RunInfo};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// deadlink-crawler: find broken links on a website
///
/// Crawls a site depth-first from a start URL, follows links within the start
/// URL's domain, checks links into secondary domains without following them,
/// and reports every link that fails together with the page it was found on.
#[derive(Parser, Debug)]
#[command(name = "deadlink-crawler")]
#[command(version)]
#[command(about = "Find broken links on a website", long_about = None)]
struct Cli {
    /// The URL to start crawling from [default: http://127.0.0.1:8000]
    #[arg(short, long)]
    url: Option<String>,

    /// The maximum depth to crawl; zero or less fetches nothing [default: 7]
    #[arg(short, long, allow_negative_numbers = true)]
    depth: Option<i64>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Domain whose links are checked but not followed (repeatable, `*.` wildcards allowed)
    #[arg(long = "secondary-domain", value_name = "HOST")]
    secondary_domains: Vec<String>,

    /// Path prefix that is never fetched (repeatable)
    #[arg(long = "exclude", value_name = "PATH")]
    excluded_paths: Vec<String>,

    /// Maximum number of fetches in flight
    #[arg(short = 'j', long)]
    concurrency: Option<u32>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Print only the broken URLs, without the pages they were found on
    #[arg(long)]
    no_sources: bool,

    /// Also write a markdown report to this file
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    handle_crawl(&config).await
}

/// Accepts the single-dash long flags `-url` and `-depth`
///
/// Clap would read `-url` as `-u rl`, so these two spellings are rewritten
/// to their double-dash forms, including the `-url=<value>` variants.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            for flag in ["-url", "-depth"] {
                if text == flag || text.starts_with(&format!("{}=", flag)) {
                    return OsString::from(format!("-{}", text));
                }
            }
            arg
        })
        .collect()
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("deadlink_crawler=info,warn"),
            1 => EnvFilter::new("deadlink_crawler=debug,info"),
            2 => EnvFilter::new("deadlink_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file and layers command-line flags on top
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(url) = &cli.url {
        config.crawler.start_url = url.clone();
    }
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = u32::try_from(depth.max(0)).unwrap_or(u32::MAX);
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout_secs = timeout;
    }
    config
        .scope
        .secondary_domains
        .extend(cli.secondary_domains.iter().cloned());
    config
        .scope
        .excluded_paths
        .extend(cli.excluded_paths.iter().cloned());
    if cli.no_sources {
        config.output.show_sources = false;
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = Some(summary.display().to_string());
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Handles the main crawl operation
///
/// Ctrl-C stops the crawl early; the links gathered so far are still reported.
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let (seed, domain) = resolve_seed(&config.crawler.start_url)?;
    let crawler = Crawler::from_config(config)?;

    tracing::info!(
        "Crawling {} (domain {}, depth {}, {} secondary domains)",
        seed,
        domain,
        config.crawler.max_depth,
        config.scope.secondary_domains.len()
    );

    let run = RunInfo::new(seed.as_str(), &domain, config.crawler.max_depth);
    let timer = Instant::now();

    let completed = tokio::select! {
        _ = crawler.crawl(&domain, seed.as_str(), config.crawler.max_depth) => true,
        _ = shutdown_signal() => {
            tracing::warn!("Interrupted, reporting links checked so far");
            false
        }
    };

    let report = CrawlReport::collect(crawler.state(), run, timer.elapsed(), completed);
    tracing::info!(
        "Crawl {} in {:.1}s: {} URLs visited",
        report.status(),
        report.duration.as_secs_f64(),
        report.pages_visited
    );

    print_report(&report, config.output.show_sources);

    if let Some(path) = &config.output.summary_path {
        generate_markdown_report(&report, Path::new(path))
            .with_context(|| format!("failed to write report to {}", path))?;
    }

    Ok(())
}

/// Resolves on Ctrl-C
///
/// If the handler cannot be installed the crawl runs to completion instead.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
