//! Output module for crawl results
//!
//! This module handles:
//! - The data model passed between crawl stages
//! - JSON and CSV export of crawl results
//! - Substring filtering of extracted items

mod csv;
mod filter;
mod json;
mod types;

pub use csv::{to_csv, CSV_HEADER};
pub use filter::filter_items;
pub use json::to_json;
pub use types::{CrawlResult, ExtractedItem, HarvestedLink, UNKNOWN_CURRENCY};

use crate::TrawlError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes an exported document to disk
///
/// # Arguments
///
/// * `path` - Destination file, created or truncated
/// * `contents` - The formatted export
pub fn write_output(path: &Path, contents: &str) -> Result<(), TrawlError> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    tracing::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
