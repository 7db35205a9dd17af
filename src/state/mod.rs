//! State module for tracking crawl progress
//!
//! A crawl moves through `Idle -> Running -> (Succeeded | Failed)`; a missing
//! starting URL short-circuits `Idle -> Failed`.

mod crawl_state;

pub use crawl_state::CrawlState;
