use serde::Deserialize;

/// Placeholder substituted with the percent-encoded target URL in relay templates
pub const URL_PLACEHOLDER: &str = "{url}";

/// Main configuration structure for Listing-Trawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Relay endpoints, tried top-to-bottom after a failed direct fetch
    #[serde(rename = "relay", default = "default_relays")]
    pub relays: Vec<RelayEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetcher: FetcherConfig::default(),
            relays: default_relays(),
        }
    }
}

/// HTTP fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds; `None` keeps the transport default
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("listing-trawler/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
        }
    }
}

/// A third-party relay that fetches a target URL server-side
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelayEntry {
    /// Short label used in log output
    pub name: String,

    /// Request pattern containing `{url}` exactly once
    pub template: String,
}

impl RelayEntry {
    pub fn new(name: &str, template: &str) -> Self {
        Self {
            name: name.to_string(),
            template: template.to_string(),
        }
    }
}

/// The fixed relay list used when no configuration overrides it
pub fn default_relays() -> Vec<RelayEntry> {
    vec![
        RelayEntry::new("allorigins", "https://api.allorigins.win/raw?url={url}"),
        RelayEntry::new("corsproxy", "https://corsproxy.io/?{url}"),
    ]
}
