//! Price heuristic for anchor text
//!
//! Listing markup commonly puts the price after the product name inside the
//! same clickable label. The first price-like number in the text splits it:
//! everything before is the name, the number is the price and an adjacent
//! symbol or short code is the currency.

use crate::output::{ExtractedItem, HarvestedLink, UNKNOWN_CURRENCY};
use regex::Regex;
use std::sync::LazyLock;

/// Optional leading symbol, an amount with optional thousands groups and a
/// 1-2 digit fraction, then an optional trailing symbol or 2-4 letter code.
static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:(?P<lead>[$€£¥])\s*)?(?P<amount>[0-9]{1,3}(?:[.,][0-9]{3})+(?:[.,][0-9]{1,2})?|[0-9]+(?:[.,][0-9]{1,2})?)(?:\s*(?P<trail>[$€£¥]|[A-Za-z]{2,4}\b))?",
    )
    .expect("price pattern is valid")
});

/// Name, price and currency split out of a piece of text
#[derive(Debug, Clone, PartialEq)]
pub struct PricedText {
    pub name: String,
    pub price: f64,
    pub currency: String,
}

/// Applies the price heuristic to free text
///
/// Returns `None` when the text holds no price-like number, when nothing
/// precedes the number, or when the number does not parse to a finite value.
///
/// # Examples
///
/// ```
/// use listing_trawler::crawler::parse_priced_text;
///
/// let priced = parse_priced_text("Men's T-Shirt 19.99 USD").unwrap();
/// assert_eq!(priced.name, "Men's T-Shirt");
/// assert_eq!(priced.price, 19.99);
/// assert_eq!(priced.currency, "USD");
///
/// assert!(parse_priced_text("Home").is_none());
/// ```
pub fn parse_priced_text(text: &str) -> Option<PricedText> {
    let captures = PRICE_PATTERN.captures(text)?;
    let whole = captures.get(0)?;
    let amount = captures.name("amount")?.as_str();

    let currency = captures
        .name("lead")
        .or_else(|| captures.name("trail"))
        .map(|m| m.as_str())
        .filter(|c| !c.is_empty())
        .unwrap_or(UNKNOWN_CURRENCY)
        .to_string();

    let name = text[..whole.start()].trim().to_string();
    let price = parse_amount(amount)?;

    if name.is_empty() {
        return None;
    }

    Some(PricedText {
        name,
        price,
        currency,
    })
}

/// Turns a harvested link into an item if its text carries a price
pub fn extract_item(link: &HarvestedLink) -> Option<ExtractedItem> {
    let priced = parse_priced_text(&link.text)?;

    Some(ExtractedItem {
        name: priced.name,
        price: priced.price,
        currency: priced.currency,
        url: link.href.clone(),
    })
}

/// Parses a matched amount into a number
///
/// The last `.` or `,` is the decimal separator when one or two digits follow
/// it; every other separator groups thousands and is dropped. Commas are not
/// the only grouping mark: a lone `.` before three digits also groups, so
/// `1.299` reads as 1299, not 1.299.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let is_separator = |c: char| c == '.' || c == ',';

    let normalized = match raw.rfind(is_separator) {
        Some(idx) if (1..=2).contains(&(raw.len() - idx - 1)) => {
            let whole: String = raw[..idx].chars().filter(|c| !is_separator(*c)).collect();
            format!("{}.{}", whole, &raw[idx + 1..])
        }
        _ => raw.chars().filter(|c| !is_separator(*c)).collect(),
    };

    normalized.parse::<f64>().ok().filter(|p| p.is_finite())
}
