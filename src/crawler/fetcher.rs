//! HTTP fetcher implementation
//!
//! This module retrieves raw HTML for a page:
//! - A direct GET request is tried first
//! - On any failure, each configured relay is tried in order
//! - The first source returning a success status with a non-empty body wins
//!
//! Fetch failures are soft: they are logged and reported as `None`, never as
//! errors. Only a relay URL that cannot be constructed is an error.

use crate::config::{Config, FetcherConfig, RelayEntry};
use crate::url::build_relay_url;
use crate::TrawlError;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Result of a single request to one source
#[derive(Debug)]
pub enum FetchOutcome {
    /// Success status and a non-empty body
    Success {
        /// Page body content
        body: String,
    },

    /// Response status outside the 2xx range
    HttpStatus {
        /// The HTTP status code
        status_code: u16,
    },

    /// Success status but nothing in the body
    EmptyBody,

    /// Connection, TLS, timeout or body-decoding failure
    Network {
        /// Error description
        error: String,
    },
}

/// Which source produced a page body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchSource {
    Direct,
    Relay(String),
}

impl fmt::Display for FetchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Relay(name) => write!(f, "relay '{}'", name),
        }
    }
}

/// A successfully fetched page body
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: String,
    pub source: FetchSource,
}

/// Builds an HTTP client with proper configuration
///
/// No timeout is set unless the configuration asks for one; redirects use
/// the client's default policy.
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Sends one GET request and classifies the response
pub async fn fetch_once(client: &Client, url: &Url) -> FetchOutcome {
    let response = match client.get(url.as_str()).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchOutcome::Network {
                error: e.to_string(),
            }
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::HttpStatus {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) if body.is_empty() => FetchOutcome::EmptyBody,
        Ok(body) => FetchOutcome::Success { body },
        Err(e) => FetchOutcome::Network {
            error: e.to_string(),
        },
    }
}

/// Retrieves page HTML with relay fallback
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    relays: Vec<RelayEntry>,
}

impl PageFetcher {
    /// Creates a fetcher from the crawl configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(
            build_http_client(&config.fetcher)?,
            config.relays.clone(),
        ))
    }

    pub fn with_client(client: Client, relays: Vec<RelayEntry>) -> Self {
        Self { client, relays }
    }

    /// Fetches `url`, falling back through the relays in order
    ///
    /// # Returns
    ///
    /// * `Ok(Some(FetchedPage))` - Some source returned a usable body
    /// * `Ok(None)` - Direct fetch and every relay failed
    /// * `Err(TrawlError)` - A relay request URL could not be built
    pub async fn fetch(&self, url: &Url) -> Result<Option<FetchedPage>, TrawlError> {
        tracing::debug!("Fetching {} directly", url);
        match fetch_once(&self.client, url).await {
            FetchOutcome::Success { body } => {
                return Ok(Some(FetchedPage {
                    body,
                    source: FetchSource::Direct,
                }))
            }
            failure => {
                tracing::warn!("Direct fetch of {} failed: {}", url, describe(&failure));
            }
        }

        for relay in &self.relays {
            let relay_url = build_relay_url(&relay.template, url)?;
            tracing::debug!("Trying relay '{}': {}", relay.name, relay_url);

            match fetch_once(&self.client, &relay_url).await {
                FetchOutcome::Success { body } => {
                    tracing::info!("Fetched {} via relay '{}'", url, relay.name);
                    return Ok(Some(FetchedPage {
                        body,
                        source: FetchSource::Relay(relay.name.clone()),
                    }));
                }
                failure => {
                    tracing::debug!("Relay '{}' failed: {}", relay.name, describe(&failure));
                }
            }
        }

        tracing::warn!(
            "All sources failed for {} (direct + {} relays)",
            url,
            self.relays.len()
        );
        Ok(None)
    }
}

fn describe(outcome: &FetchOutcome) -> String {
    match outcome {
        FetchOutcome::Success { body } => format!("{} bytes", body.len()),
        FetchOutcome::HttpStatus { status_code } => format!("HTTP {}", status_code),
        FetchOutcome::EmptyBody => "empty body".to_string(),
        FetchOutcome::Network { error } => error.clone(),
    }
}
