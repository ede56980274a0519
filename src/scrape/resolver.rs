//! Two-stage MPN resolution
//!
//! Resolving one MPN means fetching its search page, picking the best
//! candidate, then fetching and parsing that candidate's product page.
//! Every MPN produces exactly one [`ScrapedProduct`]; per-stage failures
//! are captured in it rather than propagated.

use crate::config::{product_url, search_url, ScraperConfig};
use crate::model::{Candidate, MatchType, ScrapedProduct};
use crate::parser::CatalogParser;
use crate::scrape::fetcher::{fetch_with_retry, FetchError};
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;

/// Cooldown before the one-shot escalation retry after a rate-limit error
const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(10);

/// A resolution failure carrying the match classification established
/// before the failing fetch
struct ResolveFailure {
    match_type: MatchType,
    error: FetchError,
}

impl ResolveFailure {
    fn into_result(self, mpn: &str) -> ScrapedProduct {
        tracing::error!("Failed to scrape {}: {}", mpn, self.error);
        ScrapedProduct::failed(mpn, self.match_type, self.error.to_string())
    }
}

/// Resolves a single MPN against the catalog
///
/// If a stage fails with a rate-limit error (HTTP 429/503 after retries),
/// waits a fixed 10-second cooldown and re-runs the full resolution
/// exactly once. A rate-limited failure on that second pass is final; the
/// escalation never fires twice for one MPN.
pub async fn resolve_mpn(
    client: &Client,
    parser: &dyn CatalogParser,
    config: &ScraperConfig,
    mpn: &str,
) -> ScrapedProduct {
    match resolve_once(client, parser, config, mpn).await {
        Ok(result) => result,
        Err(failure) if failure.error.is_rate_limited() => {
            tracing::warn!(
                "Rate limited on {}, waiting {:?} before one more attempt",
                mpn,
                RATE_LIMIT_COOLDOWN
            );
            tokio::time::sleep(RATE_LIMIT_COOLDOWN).await;

            match resolve_once(client, parser, config, mpn).await {
                Ok(result) => result,
                Err(second_failure) => second_failure.into_result(mpn),
            }
        }
        Err(failure) => failure.into_result(mpn),
    }
}

/// One full resolution pass: search, match selection, detail fetch, parse
async fn resolve_once(
    client: &Client,
    parser: &dyn CatalogParser,
    config: &ScraperConfig,
    mpn: &str,
) -> Result<ScrapedProduct, ResolveFailure> {
    let search = search_url(&config.base_url, mpn);
    tracing::debug!("Fetching search page: {}", search);

    let search_html = fetch_with_retry(client, &search, config.timeout(), config.max_retries)
        .await
        .map_err(|error| ResolveFailure {
            match_type: MatchType::None,
            error,
        })?;

    let search_page = parser.parse_search(&search_html, mpn);

    let Some((candidate, match_type)) = select_best_match(&search_page.items, mpn) else {
        return Ok(ScrapedProduct {
            mpn: mpn.to_string(),
            match_type: MatchType::None,
            product: None,
            error: None,
            scraped_at: Utc::now(),
        });
    };

    let detail = product_url(&config.base_url, &candidate.product_url);
    tracing::debug!("Fetching product page: {}", detail);

    // The match classification stands even if the detail fetch fails; it
    // came from the search stage
    let detail_html = fetch_with_retry(client, &detail, config.timeout(), config.max_retries)
        .await
        .map_err(|error| ResolveFailure { match_type, error })?;

    let details = parser.parse_detail(&detail_html, &detail);

    Ok(ScrapedProduct {
        mpn: mpn.to_string(),
        match_type,
        product: Some(details),
        error: None,
        scraped_at: Utc::now(),
    })
}

/// Selects the best candidate for an MPN query
///
/// Candidates are scanned in search-result order, first for a
/// case-insensitive product-ID match, then (across the whole list, not
/// interleaved) for a manufacturer-number match; either counts as Exact.
/// With no exact match the first candidate is a Partial match. Returns
/// None only for an empty candidate list.
pub fn select_best_match<'a>(
    items: &'a [Candidate],
    mpn: &str,
) -> Option<(&'a Candidate, MatchType)> {
    if items.is_empty() {
        return None;
    }

    let query = mpn.trim().to_lowercase();

    if let Some(item) = items.iter().find(|i| i.product_id.to_lowercase() == query) {
        tracing::debug!("Exact match for {}: {}", mpn, item.product_id);
        return Some((item, MatchType::Exact));
    }

    if let Some(item) = items.iter().find(|i| {
        i.manufacturer_number
            .as_deref()
            .is_some_and(|n| n.to_lowercase() == query)
    }) {
        tracing::debug!(
            "Exact manufacturer-number match for {}: {:?}",
            mpn,
            item.manufacturer_number
        );
        return Some((item, MatchType::Exact));
    }

    tracing::debug!(
        "No exact match for {}, using first result: {}",
        mpn,
        items[0].product_id
    );
    Some((&items[0], MatchType::Partial))
}
