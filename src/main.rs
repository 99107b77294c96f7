//! Sumi-Crawl main entry point
//!
//! This is the command-line interface for the Sumi-Crawl web crawler.

use clap::error::ErrorKind;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use sumi_crawl::config::{load_config_with_hash, Config};
use sumi_crawl::crawler::{crawl, CrawlMode};
use sumi_crawl::url::parse_crawl_url;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "USAGE: sumi-crawl {-c|-s} [Start URL] [Number of URLs to find]\n\
    \tUse options '-c' and '-s' to run the concurrent and sequential crawlers respectively.";

/// Sumi-Crawl: a robots-aware breadth-first web crawler
///
/// Discovers up to LIMIT URLs reachable from SEED_URL and prints them,
/// one per line.
#[derive(Parser, Debug)]
#[command(name = "sumi-crawl")]
#[command(version = "1.0.0")]
#[command(about = "A robots-aware breadth-first web crawler", long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["concurrent", "sequential"])))]
struct Cli {
    /// Crawl with many pages in flight
    #[arg(short = 'c', long)]
    concurrent: bool,

    /// Crawl one page at a time
    #[arg(short = 's', long)]
    sequential: bool,

    /// URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Number of URLs to find
    #[arg(value_name = "LIMIT", allow_negative_numbers = true)]
    limit: String,

    /// Optional TOML configuration file
    ///
    /// Its SHA-256 is logged at startup, so a run's output can be traced
    /// back to the exact settings file that produced it.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(_) => {
            println!("{}", USAGE);
            return Ok(());
        }
    };

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if parse_crawl_url(&cli.seed).is_err() {
        println!("{} is not a valid URL.", cli.seed);
        return Ok(());
    }

    let limit: usize = match cli.limit.parse() {
        Ok(limit) => limit,
        Err(_) => {
            println!("Limit needs to be a valid integer.");
            return Ok(());
        }
    };

    let mode = if cli.concurrent {
        CrawlMode::Concurrent
    } else {
        CrawlMode::Sequential
    };

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    tracing::info!(
        "Crawling {} in {:?} mode as {} with {} workers",
        cli.seed,
        mode,
        config.user_agent.agent_name(mode),
        config.crawler.worker_count
    );

    let urls = match crawl(&config, mode, &cli.seed, limit).await {
        Ok(urls) => urls,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    for url in &urls {
        println!("{}", url);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the discovered URLs.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_crawl=info,warn"),
            1 => EnvFilter::new("sumi_crawl=debug,info"),
            2 => EnvFilter::new("sumi_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
