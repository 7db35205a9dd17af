//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives the page loop:
//! - Fetching each page (direct, then relays)
//! - Harvesting links and extracting priced items
//! - Locating the next page and deciding termination
//!
//! Pages are processed strictly one after another; the only suspension points
//! are the network requests made by the fetcher.

use crate::config::Config;
use crate::crawler::extract::extract_item;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::harvester::harvest_links;
use crate::crawler::pagination::locate_next_page;
use crate::output::{CrawlResult, ExtractedItem};
use crate::state::CrawlState;
use crate::url::parse_start_url;
use crate::TrawlError;
use scraper::Html;
use url::Url;

/// Hard ceiling on page iterations per crawl
pub const MAX_PAGES: usize = 5;

/// Items and pagination cursor found on one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutcome {
    pub items: Vec<ExtractedItem>,
    pub next_page: Option<Url>,
}

/// Parses one page body and runs harvesting, extraction and pagination on it
///
/// # Arguments
///
/// * `html` - The page body
/// * `page_url` - URL the body was fetched for; relative hrefs resolve against it
pub fn process_page(html: &str, page_url: &Url) -> PageOutcome {
    let document = Html::parse_document(html);

    let items = harvest_links(&document, page_url)
        .iter()
        .filter_map(extract_item)
        .collect();

    let next_page = locate_next_page(&document, page_url);

    PageOutcome { items, next_page }
}

/// Main crawler coordinator structure
///
/// A coordinator runs a single crawl; start a new one for every crawl so the
/// previous result is replaced rather than extended.
pub struct Coordinator {
    fetcher: PageFetcher,
    state: CrawlState,
    pages_fetched: usize,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(TrawlError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, TrawlError> {
        Ok(Self::with_fetcher(PageFetcher::new(config)?))
    }

    pub fn with_fetcher(fetcher: PageFetcher) -> Self {
        Self {
            fetcher,
            state: CrawlState::Idle,
            pages_fetched: 0,
        }
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Number of page iterations that reached the fetch step
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    fn transition(&mut self, next: CrawlState) -> Result<(), TrawlError> {
        if !self.state.can_transition_to(next) {
            return Err(TrawlError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!("Crawl state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Runs the crawl from `start_url`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - The page loop finished; the result may be empty
    /// * `Err(TrawlError::Validation)` - The starting URL was empty
    /// * `Err(TrawlError)` - The crawl aborted; accumulated items are discarded
    pub async fn crawl(&mut self, start_url: &str) -> Result<CrawlResult, TrawlError> {
        let start_url = start_url.trim();

        if start_url.is_empty() {
            self.transition(CrawlState::Failed)?;
            return Err(TrawlError::Validation("Enter a valid URL".to_string()));
        }

        self.transition(CrawlState::Running)?;
        tracing::info!("Starting crawl at {}", start_url);

        match self.run_pages(start_url).await {
            Ok(items) => {
                self.transition(CrawlState::Succeeded)?;
                let result = CrawlResult::from_items(items);
                tracing::info!(
                    "Crawl completed: {} items from {} pages",
                    result.total,
                    self.pages_fetched
                );
                Ok(result)
            }
            Err(e) => {
                tracing::error!("Crawl aborted: {}", e);
                self.transition(CrawlState::Failed)?;
                Err(e)
            }
        }
    }

    /// The page loop
    ///
    /// Stops after `MAX_PAGES` iterations, when every fetch source fails for a
    /// page, or when a page has no next link.
    async fn run_pages(&mut self, start_url: &str) -> Result<Vec<ExtractedItem>, TrawlError> {
        let mut current_url = parse_start_url(start_url)?;
        let mut items = Vec::new();

        for page in 1..=MAX_PAGES {
            self.pages_fetched += 1;

            // Suspends here until the direct fetch and any relay attempts finish
            let Some(fetched) = self.fetcher.fetch(&current_url).await? else {
                tracing::warn!("Page {} unavailable, stopping at {}", page, current_url);
                break;
            };

            let outcome = process_page(&fetched.body, &current_url);
            tracing::info!(
                "Page {}: {} items from {} ({})",
                page,
                outcome.items.len(),
                current_url,
                fetched.source
            );
            items.extend(outcome.items);

            match outcome.next_page {
                Some(next) => {
                    tracing::debug!("Next page: {}", next);
                    current_url = next;
                }
                None => {
                    tracing::debug!("No next link on page {}", page);
                    break;
                }
            }
        }

        Ok(items)
    }
}
