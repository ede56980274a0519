//! Catalog page parsing
//!
//! Page-structure extraction is kept behind the [`CatalogParser`] trait so
//! the concurrent core can be driven by deterministic stubs in tests.
//! Parsing is best-effort by design: malformed or unexpected page
//! structure degrades to empty fields, never to an error.

mod detail;
mod search;

pub use detail::parse_product_page;
pub use search::parse_search_page;

use crate::model::{ProductDetails, SearchPage};

/// Extraction capability for the two catalog page types
pub trait CatalogParser: Send + Sync {
    /// Parses a search results page into candidates, in result order
    fn parse_search(&self, html: &str, query: &str) -> SearchPage;

    /// Parses a product detail page
    fn parse_detail(&self, html: &str, product_url: &str) -> ProductDetails;
}

/// Production parser backed by the real catalog page structure
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlParser;

impl CatalogParser for HtmlParser {
    fn parse_search(&self, html: &str, query: &str) -> SearchPage {
        parse_search_page(html, query)
    }

    fn parse_detail(&self, html: &str, product_url: &str) -> ProductDetails {
        parse_product_page(html, product_url)
    }
}

/// Splits a product-header line of the form `Manufacturer Name #MFR123`
/// into (manufacturer, manufacturer_number)
pub(crate) fn split_header_line(text: &str) -> Option<(String, String)> {
    let hash = text.find('#')?;
    let manufacturer = text[..hash].replace('\u{a0}', " ").trim().to_string();
    let number = text[hash + 1..].trim().to_string();
    if manufacturer.is_empty() || number.is_empty() {
        return None;
    }
    Some((manufacturer, number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_header_line() {
        let (mfr, num) = split_header_line("Acme Medical #AC-100").unwrap();
        assert_eq!(mfr, "Acme Medical");
        assert_eq!(num, "AC-100");
    }

    #[test]
    fn test_split_header_line_nbsp() {
        let (mfr, num) = split_header_line("Acme\u{a0}Medical #AC-100").unwrap();
        assert_eq!(mfr, "Acme Medical");
        assert_eq!(num, "AC-100");
    }

    #[test]
    fn test_split_header_line_no_hash() {
        assert!(split_header_line("Acme Medical").is_none());
    }
}
