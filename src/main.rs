//! Mpn-Scout main entry point
//!
//! Command-line interface for resolving a list of manufacturer part
//! numbers against the catalog.

use clap::Parser;
use mpn_scout::config::ScraperConfig;
use mpn_scout::input::read_mpn_list;
use mpn_scout::output::{load_resume_set, print_summary, summarize, write_snapshot, IncrementalLog};
use mpn_scout::parser::HtmlParser;
use mpn_scout::scrape::Scheduler;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Scrape product information from the McKesson medical supplies catalog
#[derive(Parser, Debug)]
#[command(name = "mpn-scout")]
#[command(version = "1.0.0")]
#[command(about = "Resolve manufacturer part numbers against the catalog", long_about = None)]
struct Cli {
    /// Input file containing the MPN list (one per line)
    #[arg(short, long, value_name = "FILE", default_value = "mpn_list.txt")]
    input: PathBuf,

    /// Output JSON file path
    #[arg(short, long, value_name = "FILE", default_value = "output/products.json")]
    output: PathBuf,

    /// Number of concurrent workers
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    workers: u32,

    /// Delay between requests in milliseconds
    #[arg(short, long, default_value_t = 1500)]
    delay: u64,

    /// Maximum retry attempts per request
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    retries: u32,

    /// Request timeout in milliseconds
    #[arg(short, long, default_value_t = 30_000)]
    timeout: u64,

    /// Resume from a previous run (skip already scraped MPNs)
    #[arg(long)]
    resume: bool,

    /// Limit the number of MPNs to process
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Start at this 0-based index in the MPN list
    #[arg(long, value_name = "N")]
    start: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> ScraperConfig {
        ScraperConfig {
            input_file: self.input,
            output_file: self.output,
            workers: self.workers,
            delay_ms: self.delay,
            max_retries: self.retries,
            timeout_ms: self.timeout,
            resume: self.resume,
            limit: self.limit,
            start_index: self.start,
            verbose: self.verbose,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = cli.into_config();
    run(config).await?;
    Ok(())
}

/// Sets up the tracing subscriber based on verbosity
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("mpn_scout=debug,info")
    } else {
        EnvFilter::new("mpn_scout=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Runs a complete scrape: input, resume filtering, scheduling, snapshot
async fn run(config: ScraperConfig) -> mpn_scout::Result<()> {
    tracing::info!("Mpn-Scout catalog scraper");
    tracing::info!("Input file: {}", config.input_file.display());
    tracing::info!("Output file: {}", config.output_file.display());
    tracing::info!("Workers: {}", config.workers);
    tracing::info!("Request delay: {}ms", config.delay_ms);
    tracing::info!("Max retries: {}", config.max_retries);
    tracing::info!("Timeout: {}ms", config.timeout_ms);

    // Fatal if unreadable or empty after comment/blank filtering
    let mut mpns = read_mpn_list(&config.input_file)?;

    if config.resume {
        let scraped = load_resume_set(&config.jsonl_path())?;
        let original_count = mpns.len();
        mpns.retain(|mpn| !scraped.contains(mpn));
        tracing::info!(
            "Resuming: {} MPNs already scraped, {} remaining",
            original_count - mpns.len(),
            mpns.len()
        );
    }

    if let Some(start) = config.start_index {
        mpns = mpns.split_off(start.min(mpns.len()));
        tracing::info!("Starting from index {}, {} MPNs to process", start, mpns.len());
    }

    if let Some(limit) = config.limit {
        mpns.truncate(limit);
        tracing::info!("Limited to {} MPNs", limit);
    }

    if mpns.is_empty() {
        tracing::info!("No MPNs to process");
        return Ok(());
    }

    let log = Arc::new(IncrementalLog::open(&config.jsonl_path())?);
    let snapshot_config = config.snapshot();
    let output_file = config.output_file.clone();

    let scheduler = Scheduler::new(config, Arc::new(HtmlParser))?;

    // Graceful drain on Ctrl-C: stop starting tasks, let in-flight ones
    // finish and persist
    let shutdown = scheduler.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received interrupt, finishing in-flight tasks...");
            shutdown.store(true, Ordering::SeqCst);
        }
    });

    let started_at = chrono::Utc::now();
    let results = scheduler.run_all(mpns, log, None).await;
    let completed_at = chrono::Utc::now();

    let summary = summarize(results, started_at, completed_at, snapshot_config);
    write_snapshot(&output_file, &summary)?;
    print_summary(&summary);

    tracing::info!("Output saved to: {}", output_file.display());
    Ok(())
}
