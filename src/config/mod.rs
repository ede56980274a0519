//! Configuration for the scraper
//!
//! Configuration is built once at startup from CLI options and threaded
//! into each component by reference; it is never mutated during a run.

mod types;
mod urls;

pub use types::ScraperConfig;
pub use urls::{product_url, search_url, REQUEST_HEADERS, USER_AGENT};
