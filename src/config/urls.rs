//! Catalog URL construction and request headers

use url::form_urlencoded;

/// Browser-like user agent; the catalog serves a reduced page to obvious bots
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Common request headers sent with every fetch
pub const REQUEST_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.5"),
    ("Connection", "keep-alive"),
    ("Upgrade-Insecure-Requests", "1"),
];

/// Builds the catalog search URL for an MPN query
///
/// The `sort=Mf` parameter orders results by manufacturer number, which
/// puts exact matches first in practice.
pub fn search_url(base_url: &str, mpn: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(mpn.as_bytes()).collect();
    format!("{}/catalog?query={}&sort=Mf", base_url, encoded)
}

/// Resolves a product page locator to an absolute URL
///
/// Absolute URLs pass through unchanged; relative paths are joined to the
/// base with exactly one separating slash.
pub fn product_url(base_url: &str, relative_path: &str) -> String {
    let clean = relative_path.trim();
    if clean.starts_with("http") {
        return clean.to_string();
    }
    if clean.starts_with('/') {
        format!("{}{}", base_url, clean)
    } else {
        format!("{}/{}", base_url, clean)
    }
}
