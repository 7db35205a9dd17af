//! "Next page" discovery
//!
//! The cursor is discovered on each page rather than predicted: the first
//! anchor that looks like a pagination control wins.

use crate::crawler::harvester::visible_text;
use crate::url::resolve_href;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Locates the next listing page
///
/// An anchor qualifies when its visible text or `aria-label` contains
/// "next" (case-insensitive), or its href contains `page=` or `pg=`. Anchors
/// are not filtered by text length here.
///
/// # Returns
///
/// The absolute URL of the first qualifying anchor, or `None` when there is
/// no candidate or the candidate has no resolvable href.
///
/// # Example
///
/// ```
/// use listing_trawler::crawler::locate_next_page;
/// use scraper::Html;
/// use url::Url;
///
/// let document = Html::parse_document(r#"<a href="/listing?page=2">Next →</a>"#);
/// let current = Url::parse("https://site.example/listing?page=1").unwrap();
/// let next = locate_next_page(&document, &current).unwrap();
/// assert_eq!(next.as_str(), "https://site.example/listing?page=2");
/// ```
pub fn locate_next_page(document: &Html, current_url: &Url) -> Option<Url> {
    let selector = Selector::parse("a").ok()?;

    let candidate = document.select(&selector).find(is_next_link)?;
    let href = candidate.value().attr("href")?;

    match resolve_href(href, current_url) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Ignoring unresolvable next link: {}", e);
            None
        }
    }
}

fn is_next_link(anchor: &ElementRef<'_>) -> bool {
    if visible_text(anchor).to_lowercase().contains("next") {
        return true;
    }

    let element = anchor.value();

    if element
        .attr("aria-label")
        .is_some_and(|label| label.to_lowercase().contains("next"))
    {
        return true;
    }

    element
        .attr("href")
        .is_some_and(|href| href.contains("page=") || href.contains("pg="))
}
