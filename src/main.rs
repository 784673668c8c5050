use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use forum_scraper::PageFetcher;
use fretwatch_core::{parse_search_terms, run_pass, WatchConfig};
use notifier::DesktopNotifier;
use seen_store::SqliteSeenStore;

/// Scans guitar sale forums for new listings matching your search terms and
/// sends a one-time desktop notification per match. Meant to be re-run from
/// cron; already-alerted listings are remembered in a local SQLite file.
#[derive(Parser, Debug)]
#[command(name = "fretwatch", version)]
struct Cli {
    /// Comma-delimited search terms, e.g. "Martin D-18, Gibson J-45"
    terms: String,

    /// SQLite file recording already-alerted listing URLs
    #[arg(long, default_value = "listings.db")]
    store_path: PathBuf,

    /// Icon shown on desktop notifications
    #[arg(long)]
    icon: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("fretwatch=info,fretwatch_core=info,forum_scraper=info,seen_store=info")
        .init();

    let cli = Cli::parse();

    // Usage errors must produce no side effects: validate the terms before
    // the store is opened or any request goes out.
    let config = WatchConfig {
        search_terms: parse_search_terms(&cli.terms)?,
        store_path: cli.store_path,
        icon_path: cli.icon,
    };

    tracing::info!(terms = ?config.search_terms, "starting discovery pass");

    let fetcher = PageFetcher::new().context("failed to build HTTP client")?;
    let adapters = forum_scraper::default_adapters(fetcher);
    let store = SqliteSeenStore::open(&config.store_path)
        .await
        .with_context(|| format!("failed to open store at {}", config.store_path.display()))?;
    let desktop = DesktopNotifier::new(config.icon_path);

    let summary = run_pass(&adapters, &config.search_terms, &store, &desktop).await?;

    tracing::info!(
        listings = summary.listings_found,
        matches = summary.matches,
        notified = summary.notifications_sent,
        "discovery pass complete"
    );
    Ok(())
}
