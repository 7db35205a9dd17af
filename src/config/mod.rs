//! Configuration module for Listing-Trawler
//!
//! Configuration is optional: `Config::default()` carries the built-in user
//! agent and the fixed relay list. A TOML file can override either.
//!
//! # Example
//!
//! ```no_run
//! use listing_trawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("trawler.toml")).unwrap();
//! println!("Relays configured: {}", config.relays.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{default_relays, Config, FetcherConfig, RelayEntry, URL_PLACEHOLDER};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
