use crate::output::types::CrawlResult;
use crate::TrawlError;

/// Serializes the full crawl result as pretty-printed JSON
pub fn to_json(result: &CrawlResult) -> Result<String, TrawlError> {
    Ok(serde_json::to_string_pretty(result)?)
}
