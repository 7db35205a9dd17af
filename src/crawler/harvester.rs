//! Link harvester for listing pages
//!
//! Collects every `<a href>` whose visible text is long enough to carry a
//! product label, resolving hrefs against the page the anchor was found on.
//! Anchors whose href cannot be resolved are skipped.

use crate::output::HarvestedLink;
use crate::url::resolve_href;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Anchors whose trimmed text has at most this many characters are skipped
pub const MIN_LINK_TEXT_CHARS: usize = 5;

/// Harvests content links from a parsed page
///
/// Output keeps document order and is not deduplicated.
///
/// # Arguments
///
/// * `document` - The parsed page
/// * `base_url` - URL of the page, used to resolve relative hrefs
///
/// # Returns
///
/// Links in document order. An anchor whose href cannot be resolved to an
/// absolute URL is logged and left out.
///
/// # Example
///
/// ```
/// use listing_trawler::crawler::harvest_links;
/// use scraper::Html;
/// use url::Url;
///
/// let html = r#"<a href="/p/1">Linen Shirt 29.99 USD</a><a href="/">Home</a>"#;
/// let document = Html::parse_document(html);
/// let base = Url::parse("https://shop.example/men").unwrap();
/// let links = harvest_links(&document, &base);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].href, "https://shop.example/p/1");
/// ```
pub fn harvest_links(document: &Html, base_url: &Url) -> Vec<HarvestedLink> {
    let mut links = Vec::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        let text = visible_text(&element);
        if text.chars().count() <= MIN_LINK_TEXT_CHARS {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match resolve_href(href, base_url) {
            Ok(absolute) => links.push(HarvestedLink::new(text, absolute.as_str())),
            Err(e) => tracing::debug!("Skipping link '{}': {}", text, e),
        }
    }

    links
}

/// Returns the trimmed concatenation of all text beneath an element
pub(crate) fn visible_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
