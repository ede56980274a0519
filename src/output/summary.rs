//! Run summary aggregation
//!
//! A pure fold over the completed result sequence into the final counts,
//! plus the console report printed at the end of a run.

use crate::model::{ConfigSnapshot, MatchType, RunSummary, ScrapedProduct};
use chrono::{DateTime, Utc};

/// Folds the completed results into a [`RunSummary`]
///
/// Success means a product record is present; failure means an error is
/// present. The two are not complementary: an MPN with zero search
/// results has neither.
pub fn summarize(
    results: Vec<ScrapedProduct>,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    config: ConfigSnapshot,
) -> RunSummary {
    let success_count = results.iter().filter(|r| r.product.is_some()).count();
    let failure_count = results.iter().filter(|r| r.error.is_some()).count();
    let exact_matches = results
        .iter()
        .filter(|r| r.match_type == MatchType::Exact)
        .count();
    let partial_matches = results
        .iter()
        .filter(|r| r.match_type == MatchType::Partial)
        .count();
    let no_results = results
        .iter()
        .filter(|r| r.match_type == MatchType::None)
        .count();

    RunSummary {
        started_at,
        completed_at,
        total_processed: results.len(),
        success_count,
        failure_count,
        exact_matches,
        partial_matches,
        no_results,
        config,
        results,
    }
}

/// Prints the end-of-run report to stdout
pub fn print_summary(summary: &RunSummary) {
    let duration = summary
        .completed_at
        .signed_duration_since(summary.started_at);
    let seconds = duration.num_milliseconds() as f64 / 1000.0;

    println!();
    println!("=== Scraping Complete ===");
    println!("Duration: {:.2} seconds", seconds);
    println!("Total processed: {}", summary.total_processed);
    println!("Successful: {}", summary.success_count);
    println!("Failed: {}", summary.failure_count);
    println!("Exact matches: {}", summary.exact_matches);
    println!("Partial matches: {}", summary.partial_matches);
    println!("No results: {}", summary.no_results);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductDetails;

    fn config() -> ConfigSnapshot {
        ConfigSnapshot {
            base_url: "https://mms.mckesson.com".to_string(),
            workers: 1,
            delay_ms: 0,
            max_retries: 1,
        }
    }

    fn product() -> ProductDetails {
        ProductDetails {
            mckesson_id: "123".to_string(),
            manufacturer_number: "AC-100".to_string(),
            title: "Gauze".to_string(),
            invoice_title: None,
            brand: None,
            manufacturer: None,
            image_url: None,
            images: vec![],
            original_images: vec![],
            specifications: vec![],
            features: vec![],
            product_url: "u".to_string(),
        }
    }

    fn result(mpn: &str, match_type: MatchType, with_product: bool, error: Option<&str>) -> ScrapedProduct {
        ScrapedProduct {
            mpn: mpn.to_string(),
            match_type,
            product: with_product.then(product),
            error: error.map(str::to_string),
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn test_summarize_counts() {
        let results = vec![
            result("A1", MatchType::Exact, true, None),
            result("A2", MatchType::Partial, true, None),
            result("A3", MatchType::None, false, None),
            result("A4", MatchType::None, false, Some("HTTP 500")),
            result("A5", MatchType::Exact, false, Some("Request timeout")),
        ];

        let now = Utc::now();
        let summary = summarize(results, now, now, config());

        assert_eq!(summary.total_processed, 5);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failure_count, 2);
        assert_eq!(summary.exact_matches, 2);
        assert_eq!(summary.partial_matches, 1);
        assert_eq!(summary.no_results, 2);
    }

    #[test]
    fn test_summarize_empty() {
        let now = Utc::now();
        let summary = summarize(vec![], now, now, config());
        assert_eq!(summary.total_processed, 0);
        assert_eq!(summary.success_count, 0);
        assert_eq!(summary.failure_count, 0);
    }

    #[test]
    fn test_detail_fetch_failure_keeps_match_but_counts_as_failure() {
        // Classification came from the search stage; the error came from
        // the detail stage
        let results = vec![result("A1", MatchType::Exact, false, Some("HTTP 503"))];
        let now = Utc::now();
        let summary = summarize(results, now, now, config());

        assert_eq!(summary.exact_matches, 1);
        assert_eq!(summary.failure_count, 1);
        assert_eq!(summary.success_count, 0);
    }
}
