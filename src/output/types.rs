//! Data carried between crawl stages and handed to exporters

use serde::{Deserialize, Serialize};

/// Sentinel currency used when no symbol or code follows a price
pub const UNKNOWN_CURRENCY: &str = "Unknown";

/// An anchor harvested from a listing page
///
/// Lives only for the processing of the page it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestedLink {
    /// Trimmed visible text, always longer than the harvest threshold
    pub text: String,

    /// Absolute URL, resolved against the page's own URL
    pub href: String,
}

impl HarvestedLink {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// A priced item recognised in anchor text
///
/// `name` is never empty and `price` is always finite; candidates failing
/// either check are never constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedItem {
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub url: String,
}

/// The aggregated output of one crawl
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlResult {
    /// Items in page order, then link order within each page
    pub items: Vec<ExtractedItem>,

    /// Always equal to `items.len()`
    pub total: usize,
}

impl CrawlResult {
    pub fn from_items(items: Vec<ExtractedItem>) -> Self {
        let total = items.len();
        Self { items, total }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
