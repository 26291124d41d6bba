//! Command-line entry point: scrape an Ad Library endpoint and export the
//! normalized records.
//!
//! Flags override the `ADLIB_*` environment configuration; anything not
//! given on the command line falls back to the configured default.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "adlib-cli")]
#[command(about = "Ad Library scraper - collect and export normalized ad records")]
struct Cli {
    /// Search query (advertiser name, domain, keyword).
    #[arg(long, default_value = "")]
    query: String,

    /// Region / country code to filter ads (e.g. GB, US).
    #[arg(long)]
    region: Option<String>,

    /// Number of pages to scrape.
    #[arg(long)]
    pages: Option<u32>,

    /// Output format: json, csv, or xml.
    #[arg(long)]
    format: Option<String>,

    /// Output file path. Generated under the configured output dir when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = adlib_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let region = cli.region.unwrap_or_else(|| config.default_region.clone());
    let pages = cli.pages.unwrap_or(config.default_pages);
    let format = cli
        .format
        .unwrap_or_else(|| config.default_output_format.clone())
        .to_ascii_lowercase();

    let output_path = cli.output.unwrap_or_else(|| {
        let stamp = chrono::Utc::now().timestamp();
        config.output_dir.join(format!("ads_{stamp}.{format}"))
    });

    let client = adlib_scraper::AdLibraryClient::new(
        &config.base_url,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Ad Library client: {e}"))?;

    tracing::info!(
        query = %cli.query,
        region = %region,
        pages,
        format = %format,
        "starting ad library scrape"
    );

    let ads = adlib_scraper::scrape(
        &client,
        &cli.query,
        &region,
        pages,
        config.inter_request_delay_ms,
    )
    .await;

    if ads.is_empty() {
        tracing::warn!("no ads were scraped; nothing to export");
        return Ok(());
    }

    tracing::info!(count = ads.len(), output = %output_path.display(), "exporting ads");
    adlib_export::export_ads(&ads, &format, &output_path)
        .map_err(|e| anyhow::anyhow!("export failed: {e}"))?;

    tracing::info!("done");
    Ok(())
}
