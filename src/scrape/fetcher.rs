//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building an HTTP client with browser-like headers
//! - GET requests with a per-attempt timeout
//! - Retry with linear backoff for transient failures
//! - Error classification, including the rate-limit tag read by the
//!   resolver

use crate::config::{REQUEST_HEADERS, USER_AGENT};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Base delay for retry backoff; attempt N waits N times this
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// A classified fetch failure
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },
}

impl FetchError {
    /// True for HTTP 429 and 503, the statuses the catalog uses when
    /// throttling. The resolver reacts to this tag; the fetcher itself
    /// treats these like any other failed attempt.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            FetchError::Status {
                status: 429 | 503,
                ..
            }
        )
    }
}

/// Builds the HTTP client shared by all workers
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    for &(name, value) in REQUEST_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with retry logic, returning the response body
///
/// Each attempt is bounded by `timeout`; exceeding it aborts the in-flight
/// request and counts as a failed attempt. Failed attempts are retried
/// after `RETRY_BASE_DELAY * attempt_number` (linear backoff). After
/// `max_retries` failed attempts the last error is returned.
///
/// No retry state is shared across separate calls.
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    timeout: Duration,
    max_retries: u32,
) -> Result<String, FetchError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match fetch_once(client, url, timeout).await {
            Ok(body) => return Ok(body),
            Err(error) if attempt < max_retries => {
                let wait = RETRY_BASE_DELAY * attempt;
                tracing::warn!(
                    "Attempt {}/{} failed for {}: {}. Retrying in {:?}",
                    attempt,
                    max_retries,
                    url,
                    error,
                    wait
                );
                tokio::time::sleep(wait).await;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Performs a single GET attempt, bounded by `timeout` including the body
/// read
async fn fetch_once(client: &Client, url: &str, timeout: Duration) -> Result<String, FetchError> {
    let request = async {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify_error(url, e))
    };

    match tokio::time::timeout(timeout, request).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            url: url.to_string(),
        }),
    }
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(Duration::from_secs(30));
        assert!(client.is_ok());
    }

    #[test]
    fn test_rate_limited_statuses() {
        for status in [429, 503] {
            let error = FetchError::Status {
                url: "https://example.com".to_string(),
                status,
            };
            assert!(error.is_rate_limited(), "status {} should be tagged", status);
        }
    }

    #[test]
    fn test_other_errors_not_rate_limited() {
        let server_error = FetchError::Status {
            url: "https://example.com".to_string(),
            status: 500,
        };
        assert!(!server_error.is_rate_limited());

        let timeout = FetchError::Timeout {
            url: "https://example.com".to_string(),
        };
        assert!(!timeout.is_rate_limited());

        let network = FetchError::Network {
            url: "https://example.com".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(!network.is_rate_limited());
    }

    #[test]
    fn test_error_messages_carry_url() {
        let error = FetchError::Status {
            url: "https://example.com/catalog".to_string(),
            status: 404,
        };
        let message = error.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("https://example.com/catalog"));
    }
}
