//! Listing-Trawler main entry point
//!
//! This is the command-line interface for the Listing-Trawler item extractor.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use listing_trawler::config::{load_config, Config};
use listing_trawler::crawler::crawl;
use listing_trawler::output::{filter_items, to_csv, to_json, write_output, CrawlResult};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Listing-Trawler: extract priced items from listing pages
///
/// Fetches the given page (falling back to relay endpoints if a direct fetch
/// fails), extracts name/price/currency from link text and follows "next"
/// links for up to five pages.
#[derive(Parser, Debug)]
#[command(name = "listing-trawler")]
#[command(version)]
#[command(about = "Extract priced items from listing pages", long_about = None)]
struct Cli {
    /// Listing page to start from
    #[arg(value_name = "URL")]
    url: String,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// Write the export to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Keep only items whose name or price contains this text
    #[arg(long, value_name = "QUERY")]
    filter: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
    Summary,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Config::default(),
    };

    let result = match crawl(&config, &cli.url).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let result = match &cli.filter {
        Some(query) => {
            let kept = filter_items(&result.items, query)
                .into_iter()
                .cloned()
                .collect();
            CrawlResult::from_items(kept)
        }
        None => result,
    };

    let rendered = match cli.format {
        Format::Json => to_json(&result)?,
        Format::Csv => to_csv(&result),
        Format::Summary => format_summary(&result),
    };

    match &cli.output {
        Some(path) => {
            write_output(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote {} items to {}", result.total, path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so that stdout carries only the export.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_trawler=info,warn"),
            1 => EnvFilter::new("listing_trawler=debug,info"),
            2 => EnvFilter::new("listing_trawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn format_summary(result: &CrawlResult) -> String {
    let mut out = format!("{} Items Found\n", result.total);
    for item in &result.items {
        out.push_str(&format!(
            "- {} | {} {} | {}\n",
            item.name, item.price, item.currency, item.url
        ));
    }
    out
}
