//! Scraping engine
//!
//! This module contains the concurrent resolution core:
//! - HTTP fetching with per-request timeout and linear-backoff retry
//! - Two-stage MPN resolution (search page, then product page)
//! - The worker pool with global request pacing and incremental
//!   persistence

mod fetcher;
mod resolver;
mod scheduler;

pub use fetcher::{build_http_client, fetch_with_retry, FetchError};
pub use resolver::{resolve_mpn, select_best_match};
pub use scheduler::{Pacer, ProgressCallback, Scheduler};
