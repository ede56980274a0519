//! Search results page parser
//!
//! Extracts product candidates from the catalog search page. The page
//! renders results as `.product-item` blocks inside a
//! `.product-item-list` container; each block carries the catalog product
//! ID and a `Manufacturer Name #MFR123` header line.

use super::split_header_line;
use crate::model::{Candidate, SearchPage};
use scraper::{ElementRef, Html, Selector};

/// Parses the search results page HTML and extracts candidates
pub fn parse_search_page(html: &str, query: &str) -> SearchPage {
    let document = Html::parse_document(html);

    let Ok(list_selector) = Selector::parse(".product-item-list.js-product-item-list") else {
        return empty_page(query);
    };

    let Some(product_list) = document.select(&list_selector).next() else {
        tracing::debug!("No product list found for query: {}", query);
        return empty_page(query);
    };

    let mut items = Vec::new();
    if let Ok(item_selector) = Selector::parse(".product-item") {
        for element in product_list.select(&item_selector) {
            if let Some(candidate) = parse_item(element) {
                items.push(candidate);
            }
        }
    }

    // The paging container reports the full result count across pages
    let total_results = Selector::parse("#catalog")
        .ok()
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .and_then(|el| el.value().attr("data-total-elements"))
                .and_then(|v| v.parse::<u32>().ok())
        })
        .filter(|&n| n > 0)
        .unwrap_or(items.len() as u32);

    tracing::debug!("Found {} products for query: {}", items.len(), query);

    SearchPage {
        query: query.to_string(),
        total_results,
        items,
    }
}

fn empty_page(query: &str) -> SearchPage {
    SearchPage {
        query: query.to_string(),
        total_results: 0,
        items: Vec::new(),
    }
}

/// Parses one `.product-item` block into a Candidate
///
/// Returns None when the block has no product ID.
fn parse_item(element: ElementRef) -> Option<Candidate> {
    let product_id = extract_product_id(element)?;

    let (title, product_url) = Selector::parse(".item-title a")
        .ok()
        .and_then(|sel| {
            element.select(&sel).next().map(|link| {
                let title = link.text().collect::<String>().trim().to_string();
                let href = link.value().attr("href").unwrap_or("").trim().to_string();
                (title, href)
            })
        })
        .unwrap_or_default();

    let (manufacturer, manufacturer_number) = extract_manufacturer(element);

    Some(Candidate {
        product_id,
        title,
        product_url,
        manufacturer_number,
        manufacturer,
    })
}

/// Extracts the catalog product ID from the `.product-header-id` element,
/// preferring the `id` attribute over the `#`-prefixed display text
fn extract_product_id(element: ElementRef) -> Option<String> {
    let selector = Selector::parse(".product-header-id").ok()?;
    let id_element = element.select(&selector).next()?;

    if let Some(id) = id_element.value().attr("id") {
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }

    let text = id_element
        .text()
        .collect::<String>()
        .replace('#', "")
        .trim()
        .to_string();

    (!text.is_empty()).then_some(text)
}

/// Scans the `.product-header li` items for the `Manufacturer #Number` line
fn extract_manufacturer(element: ElementRef) -> (Option<String>, Option<String>) {
    let Ok(selector) = Selector::parse(".product-header li") else {
        return (None, None);
    };

    for li in element.select(&selector) {
        // The product ID item also contains a '#'; skip it by class
        if li.value().classes().any(|c| c == "product-header-id") {
            continue;
        }

        let text = li.text().collect::<String>();
        if let Some((manufacturer, number)) = split_header_line(text.trim()) {
            return (Some(manufacturer), Some(number));
        }
    }

    (None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r##"
        <html><body>
        <div id="catalog" data-total-elements="12">
        <div class="product-item-list js-product-item-list">
            <div class="product-item">
                <ul class="product-header">
                    <li class="product-header-id" id="123456">#123456</li>
                    <li>Acme Medical&nbsp;#AC-100</li>
                </ul>
                <div class="item-title"><a href="/catalog/product/123456">Acme Gauze Pads</a></div>
            </div>
            <div class="product-item">
                <ul class="product-header">
                    <li class="product-header-id" id="789012">#789012</li>
                    <li>Baxter #BX-55</li>
                </ul>
                <div class="item-title"><a href="/catalog/product/789012">Baxter Saline</a></div>
            </div>
        </div>
        </div>
        </body></html>
    "##;

    #[test]
    fn test_parse_search_page_items() {
        let page = parse_search_page(SEARCH_PAGE, "AC-100");

        assert!(page.has_results());
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_results, 12);

        let first = &page.items[0];
        assert_eq!(first.product_id, "123456");
        assert_eq!(first.title, "Acme Gauze Pads");
        assert_eq!(first.product_url, "/catalog/product/123456");
        assert_eq!(first.manufacturer.as_deref(), Some("Acme Medical"));
        assert_eq!(first.manufacturer_number.as_deref(), Some("AC-100"));
    }

    #[test]
    fn test_parse_search_page_preserves_order() {
        let page = parse_search_page(SEARCH_PAGE, "anything");
        assert_eq!(page.items[0].product_id, "123456");
        assert_eq!(page.items[1].product_id, "789012");
    }

    #[test]
    fn test_parse_search_page_no_container() {
        let page = parse_search_page("<html><body><p>No results</p></body></html>", "X1");
        assert!(!page.has_results());
        assert_eq!(page.total_results, 0);
        assert_eq!(page.query, "X1");
    }

    #[test]
    fn test_parse_search_page_empty_list() {
        let html = r#"<div class="product-item-list js-product-item-list"></div>"#;
        let page = parse_search_page(html, "X1");
        assert!(!page.has_results());
    }

    #[test]
    fn test_item_without_product_id_is_skipped() {
        let html = r##"
            <div class="product-item-list js-product-item-list">
                <div class="product-item">
                    <div class="item-title"><a href="/p/1">No ID here</a></div>
                </div>
            </div>
        "##;
        let page = parse_search_page(html, "X1");
        assert!(!page.has_results());
    }

    #[test]
    fn test_product_id_from_text_when_attr_missing() {
        let html = r##"
            <div class="product-item-list js-product-item-list">
                <div class="product-item">
                    <ul class="product-header">
                        <li class="product-header-id">#555</li>
                    </ul>
                    <div class="item-title"><a href="/p/555">Item</a></div>
                </div>
            </div>
        "##;
        let page = parse_search_page(html, "X1");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].product_id, "555");
    }

    #[test]
    fn test_total_falls_back_to_item_count() {
        let html = r##"
            <div class="product-item-list js-product-item-list">
                <div class="product-item">
                    <ul class="product-header">
                        <li class="product-header-id" id="1">#1</li>
                    </ul>
                </div>
            </div>
        "##;
        let page = parse_search_page(html, "X1");
        assert_eq!(page.total_results, 1);
    }
}
