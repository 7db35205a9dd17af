//! Crawler module for listing-page item extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with relay fallback
//! - Link harvesting from parsed pages
//! - Price heuristics over link text
//! - Next-page discovery
//! - The bounded page loop

mod coordinator;
mod extract;
mod fetcher;
mod harvester;
mod pagination;

pub use coordinator::{process_page, Coordinator, PageOutcome, MAX_PAGES};
pub use extract::{extract_item, parse_amount, parse_priced_text, PricedText};
pub use fetcher::{
    build_http_client, fetch_once, FetchOutcome, FetchSource, FetchedPage, PageFetcher,
};
pub use harvester::{harvest_links, MIN_LINK_TEXT_CHARS};
pub use pagination::locate_next_page;

use crate::config::Config;
use crate::output::CrawlResult;
use crate::TrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and relay list
/// 2. Fetch up to `MAX_PAGES` pages, following next-page links
/// 3. Extract priced items from each page's links
/// 4. Return the aggregated result
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `start_url` - Page to begin crawling from
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl completed, possibly with no items
/// * `Err(TrawlError)` - Crawl was rejected or aborted
pub async fn crawl(config: &Config, start_url: &str) -> Result<CrawlResult, TrawlError> {
    Coordinator::new(config)?.crawl(start_url).await
}
