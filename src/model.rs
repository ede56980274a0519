//! Core data types shared across the scraper
//!
//! These mirror the on-disk JSON formats: `ScrapedProduct` is the JSONL
//! line format of the incremental log, `RunSummary` is the final snapshot.
//! Wire names are camelCase for compatibility with existing output files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quality of the match between an MPN query and the chosen candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// A candidate's product ID or manufacturer number equals the query
    /// (case-insensitive)
    Exact,

    /// Candidates were found but none matched exactly; the first search
    /// result was used
    Partial,

    /// The search returned zero candidates
    None,
}

/// One entry from the catalog search results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Catalog product ID
    pub product_id: String,

    /// Product title/name
    pub title: String,

    /// URL path to the product page (may be relative)
    pub product_url: String,

    /// Manufacturer part number, when shown in the result header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_number: Option<String>,

    /// Manufacturer name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

/// Parsed search results page
#[derive(Debug, Clone)]
pub struct SearchPage {
    /// The MPN query that produced this page
    pub query: String,

    /// Total result count reported by the page, falling back to the
    /// number of parsed items
    pub total_results: u32,

    /// Candidates in search-result order
    pub items: Vec<Candidate>,
}

impl SearchPage {
    /// Returns true when the search produced at least one candidate
    pub fn has_results(&self) -> bool {
        !self.items.is_empty()
    }
}

/// A single specification row from the product page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub key: String,
    pub value: String,
}

/// Full product details parsed from a product page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    /// Catalog product ID
    pub mckesson_id: String,

    /// Manufacturer part number
    pub manufacturer_number: String,

    /// Product title
    pub title: String,

    /// Invoice title, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_title: Option<String>,

    /// Brand name (from the specifications table)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Manufacturer name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    /// Main product image (first high-res image, or a placeholder)
    pub image_url: Option<String>,

    /// All high-res product images
    pub images: Vec<String>,

    /// All original/full-size product images
    pub original_images: Vec<String>,

    /// Specification key/value rows
    pub specifications: Vec<Specification>,

    /// Full feature list
    pub features: Vec<String>,

    /// Absolute product page URL
    pub product_url: String,
}

/// Final result for one MPN — one JSONL line in the incremental log
///
/// Exactly one of these is produced per MPN and it is never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedProduct {
    /// Original MPN query
    pub mpn: String,

    /// Quality of the match
    pub match_type: MatchType,

    /// Product details when the detail page was fetched and parsed
    pub product: Option<ProductDetails>,

    /// Error message when any stage failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Completion timestamp
    pub scraped_at: DateTime<Utc>,
}

impl ScrapedProduct {
    /// Builds a failure result carrying whatever match classification was
    /// established before the failure
    pub fn failed(mpn: impl Into<String>, match_type: MatchType, error: impl Into<String>) -> Self {
        Self {
            mpn: mpn.into(),
            match_type,
            product: None,
            error: Some(error.into()),
            scraped_at: Utc::now(),
        }
    }
}

/// Configuration snapshot embedded in the final summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    pub base_url: String,
    pub workers: u32,
    pub delay_ms: u64,
    pub max_retries: u32,
}

/// Aggregate output of a complete run — the final JSON snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub total_processed: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub exact_matches: usize,
    pub partial_matches: usize,
    pub no_results: usize,
    pub config: ConfigSnapshot,
    pub results: Vec<ScrapedProduct>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_type_wire_names() {
        assert_eq!(serde_json::to_string(&MatchType::Exact).unwrap(), "\"exact\"");
        assert_eq!(
            serde_json::to_string(&MatchType::Partial).unwrap(),
            "\"partial\""
        );
        assert_eq!(serde_json::to_string(&MatchType::None).unwrap(), "\"none\"");
    }

    #[test]
    fn test_scraped_product_round_trip() {
        let result = ScrapedProduct {
            mpn: "ABC-123".to_string(),
            match_type: MatchType::Exact,
            product: None,
            error: None,
            scraped_at: Utc::now(),
        };

        let line = serde_json::to_string(&result).unwrap();
        assert!(line.contains("\"mpn\":\"ABC-123\""));
        assert!(line.contains("\"matchType\":\"exact\""));
        // Absent error is omitted entirely, not serialized as null
        assert!(!line.contains("\"error\""));

        let back: ScrapedProduct = serde_json::from_str(&line).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_failed_result_keeps_match_type() {
        let result = ScrapedProduct::failed("X1", MatchType::Partial, "HTTP 500");
        assert_eq!(result.match_type, MatchType::Partial);
        assert!(result.product.is_none());
        assert_eq!(result.error.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn test_search_page_has_results() {
        let empty = SearchPage {
            query: "Q".to_string(),
            total_results: 0,
            items: vec![],
        };
        assert!(!empty.has_results());
    }
}
