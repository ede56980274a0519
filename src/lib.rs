//! Mpn-Scout: a catalog part-number resolver
//!
//! This crate resolves manufacturer part numbers (MPNs) against a remote
//! product catalog: each MPN is searched, the best-matching candidate is
//! selected, and the candidate's product page is fetched and parsed.
//! Results are appended to a JSONL log as they complete so an interrupted
//! run can be resumed, and a final JSON summary is written at the end.

pub mod config;
pub mod input;
pub mod model;
pub mod output;
pub mod parser;
pub mod scrape;

use thiserror::Error;

/// Main error type for Mpn-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read MPN list from {path}: {source}")]
    InputUnreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("No MPNs found in input file {path}")]
    EmptyInput { path: String },
}

/// Result type alias for Mpn-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::ScraperConfig;
pub use model::{Candidate, MatchType, ProductDetails, RunSummary, ScrapedProduct, SearchPage};
pub use parser::{CatalogParser, HtmlParser};
