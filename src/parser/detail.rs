//! Product detail page parser
//!
//! Extracts the full product record from a catalog product page: header
//! identifiers, titles, the image gallery, the specifications table, and
//! the feature list. Missing sections produce empty fields.

use super::split_header_line;
use crate::model::{ProductDetails, Specification};
use scraper::{Html, Selector};

/// Image shown when the product page has no gallery images
const PLACEHOLDER_IMAGE: &str = "https://cdn.prod.website-files.com/68af9060d585e89323ce4b59/6993fffa8ae6f351bcbe96fe_ndr_placeholder_white.png";

/// CDN host that distinguishes product images from page furniture
const IMAGE_CDN: &str = "imgcdn.mckesson.com";

/// Parses the product detail page HTML into a full product record
pub fn parse_product_page(html: &str, product_url: &str) -> ProductDetails {
    let document = Html::parse_document(html);

    let mckesson_id = extract_header_id(&document).unwrap_or_default();
    let title = select_first_text(&document, ".prod-title").unwrap_or_default();
    let invoice_title = select_first_text(&document, ".prod-invoice-title");

    let (mut manufacturer, mut manufacturer_number) = extract_manufacturer(&document);

    let (mut images, original_images) = extract_gallery(&document);
    if images.is_empty() {
        images.push(PLACEHOLDER_IMAGE.to_string());
    }
    let image_url = images.first().cloned();

    let specifications = extract_specifications(&document);
    let features = extract_features(&document);

    // Fall back to the specifications table for header fields the page
    // sometimes omits
    let brand = spec_value(&specifications, "Brand");
    if manufacturer.is_none() {
        manufacturer = spec_value(&specifications, "Manufacturer");
    }
    if manufacturer_number.is_none() {
        manufacturer_number = spec_value(&specifications, "Manufacturer #");
    }

    tracing::debug!(
        "Parsed product {}: {}, {} specs, {} features, {} images",
        mckesson_id,
        title,
        specifications.len(),
        features.len(),
        images.len()
    );

    ProductDetails {
        mckesson_id,
        manufacturer_number: manufacturer_number.unwrap_or_default(),
        title,
        invoice_title,
        brand,
        manufacturer,
        image_url,
        images,
        original_images,
        specifications,
        features,
        product_url: product_url.to_string(),
    }
}

/// Trimmed text of the first element matching `selector`, None if absent
/// or empty
fn select_first_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Catalog product ID from the page header, preferring the `id` attribute
fn extract_header_id(document: &Html) -> Option<String> {
    let sel = Selector::parse(".product-header-id").ok()?;
    let element = document.select(&sel).next()?;

    if let Some(id) = element.value().attr("id") {
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }

    let text = element.text().collect::<String>();
    let text = text.replace('#', "").trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn extract_manufacturer(document: &Html) -> (Option<String>, Option<String>) {
    let Ok(sel) = Selector::parse(".product-header li") else {
        return (None, None);
    };

    for li in document.select(&sel) {
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

/// Collects (high-res, original) image URL lists from the gallery carousel
///
/// Each `.image-zoom` block pairs an `<img src>` high-res image with an
/// `<a href>` full-size original. Only CDN-hosted images count; duplicates
/// from carousel cloning are dropped.
fn extract_gallery(document: &Html) -> (Vec<String>, Vec<String>) {
    let mut images = Vec::new();
    let mut original_images = Vec::new();

    let Ok(zoom_sel) = Selector::parse(".image-gallery.gallery .image-zoom") else {
        return (images, original_images);
    };
    let (Ok(img_sel), Ok(a_sel)) = (Selector::parse("img"), Selector::parse("a")) else {
        return (images, original_images);
    };

    for zoom in document.select(&zoom_sel) {
        if let Some(src) = zoom
            .select(&img_sel)
            .next()
            .and_then(|img| img.value().attr("src"))
        {
            if src.contains(IMAGE_CDN) && !images.iter().any(|i| i == src) {
                images.push(src.to_string());
            }
        }

        if let Some(href) = zoom
            .select(&a_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            if href.contains(IMAGE_CDN) && !original_images.iter().any(|i| i == href) {
                original_images.push(href.to_string());
            }
        }
    }

    (images, original_images)
}

/// Specification rows from the `#specifications` table, falling back to
/// any `table.table` when the section is missing
fn extract_specifications(document: &Html) -> Vec<Specification> {
    let mut specs = collect_spec_rows(document, "#specifications table tr");
    if specs.is_empty() {
        specs = collect_spec_rows(document, "table.table tr");
    }
    specs
}

fn collect_spec_rows(document: &Html, row_selector: &str) -> Vec<Specification> {
    let mut specs = Vec::new();

    let Ok(row_sel) = Selector::parse(row_selector) else {
        return specs;
    };
    let (Ok(th_sel), Ok(td_sel)) = (Selector::parse("th"), Selector::parse("td")) else {
        return specs;
    };

    for row in document.select(&row_sel) {
        let key = row
            .select(&th_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let value = row
            .select(&td_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        if !key.is_empty() && !value.is_empty() {
            specs.push(Specification { key, value });
        }
    }

    specs
}

/// Full feature list from the specifications section, skipping the
/// truncated "More …" expander rows
fn extract_features(document: &Html) -> Vec<String> {
    let mut features = Vec::new();

    let Ok(sel) = Selector::parse("#specifications .product-features li") else {
        return features;
    };

    for li in document.select(&sel) {
        if li.value().classes().any(|c| c == "more") {
            continue;
        }
        let text = li.text().collect::<String>().trim().to_string();
        if !text.is_empty() && !text.starts_with("More") {
            features.push(text);
        }
    }

    features
}

fn spec_value(specs: &[Specification], key: &str) -> Option<String> {
    specs
        .iter()
        .find(|s| s.key == key)
        .map(|s| s.value.clone())
}
