use crate::model::ConfigSnapshot;
use std::path::PathBuf;
use std::time::Duration;

/// Scraper configuration, read-only after startup
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Base URL of the catalog site
    pub base_url: String,

    /// Input file containing one MPN per line
    pub input_file: PathBuf,

    /// Output path for the final JSON snapshot; the incremental JSONL log
    /// path is derived from this by swapping the extension
    pub output_file: PathBuf,

    /// Number of concurrent workers (minimum 1)
    pub workers: u32,

    /// Delay between task starts in milliseconds (global pacing, shared
    /// across all workers)
    pub delay_ms: u64,

    /// Maximum attempts per HTTP request (minimum 1)
    pub max_retries: u32,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Skip MPNs already present in the incremental log
    pub resume: bool,

    /// Process at most this many MPNs
    pub limit: Option<usize>,

    /// Start at this 0-based index in the MPN list
    pub start_index: Option<usize>,

    /// Enable debug logging
    pub verbose: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://mms.mckesson.com".to_string(),
            input_file: PathBuf::from("mpn_list.txt"),
            output_file: PathBuf::from("output/products.json"),
            workers: 1,
            delay_ms: 1500,
            max_retries: 3,
            timeout_ms: 30_000,
            resume: false,
            limit: None,
            start_index: None,
            verbose: false,
        }
    }
}

impl ScraperConfig {
    /// Per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Path of the incremental JSONL log derived from the output path
    pub fn jsonl_path(&self) -> PathBuf {
        self.output_file.with_extension("jsonl")
    }

    /// The subset of configuration recorded in the final summary
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            base_url: self.base_url.clone(),
            workers: self.workers,
            delay_ms: self.delay_ms,
            max_retries: self.max_retries,
        }
    }
}
