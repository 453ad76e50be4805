use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sincity_collector::pacing::MinIntervalGate;
use sincity_collector::persist::Persister;
use sincity_collector::search::RateLimitedSearchClient;
use sincity_collector::summary::summarize;
use sincity_collector::{AnchorSet, CategorySelector, CollectionRunner, Config};
use yelp_client::YelpClient;

#[derive(Parser)]
#[command(name = "sincity-collector")]
#[command(about = "Collect Las Vegas POIs from Yelp around every casino property")]
struct Cli {
    /// Category to collect
    #[arg(value_enum, default_value_t = CategorySelector::Restaurants)]
    category: CategorySelector,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    // Unknown selectors exit here with a usage error, before any network I/O.
    let cli = Cli::parse();

    if let Err(e) = run(cli.category).await {
        eprintln!("Error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run(selector: CategorySelector) -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("sincity_collector=info".parse()?),
        )
        .init();

    info!("Sin City Travels POI collector starting...");

    let config = Config::from_env()?;
    config.log_redacted();

    let yelp = YelpClient::with_base_url(
        config.yelp_api_key.clone(),
        &config.yelp_api_base,
        config.request_timeout,
    )
    .context("Failed to build Yelp HTTP client")?;

    let client = RateLimitedSearchClient::new(
        Arc::new(yelp),
        Box::new(MinIntervalGate::new(config.pacing_interval)),
        config.search_settings(),
    );
    let mut runner = CollectionRunner::new(client, AnchorSet::las_vegas_casinos());

    let run = runner.run(selector).await;
    if !run.failures.is_empty() {
        warn!(
            failed = run.failures.len(),
            anchors = runner.anchors().len(),
            "Some anchors returned no data"
        );
    }

    let dataset = run.into_dataset();
    let summary = summarize(&dataset, runner.anchors(), config.top_anchors);

    let persister = Persister::new(&config.data_dir, Utc::now().date_naive());
    let path = persister.save(&dataset, selector)?;

    info!("\n{summary}");

    if dataset.is_empty() {
        warn!("No POIs collected. Check your API key and network connection.");
    } else {
        info!(
            path = %path.display(),
            "Review the collected POIs, curate the best ones, then import them into PostgreSQL"
        );
    }

    Ok(())
}
