//! URL handling module for Listing-Trawler
//!
//! This module provides starting-URL parsing, href resolution against the
//! page a link was found on, and relay request URL construction.

mod relay;
mod resolve;

// Re-export main functions
pub use relay::build_relay_url;
pub use resolve::{parse_start_url, resolve_href};

/// Returns true if the URL uses a scheme we can fetch
pub fn is_http(url: &::url::Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
