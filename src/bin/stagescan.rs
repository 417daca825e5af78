//! Stage 2 Screener
//!
//! One-shot batch run: screens the configured universe against the benchmark
//! and writes the ranked candidate table.

use dotenvy::dotenv;
use stagescan::config::{get_environment, RunConfig, ScreenerConfig};
use stagescan::core::{BatchOptions, Screener};
use stagescan::logging;
use stagescan::metrics::Metrics;
use stagescan::output::write_candidates;
use stagescan::services::{
    FileUniverse, StaticUniverse, UniverseProvider, YahooClient, YahooMarketDataProvider,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let env = get_environment();
    info!("Starting Weinstein Stage 2 screener");
    info!(environment = %env, "Environment");

    let config = ScreenerConfig::from_env()?;
    let run = RunConfig::from_env()?;
    info!(
        trend_weeks = config.trend_window,
        base_weeks = config.base_lookback_weeks,
        volume_weeks = config.volume_window,
        volume_multiplier = config.volume_multiplier,
        rs_required = config.rs_required,
        rs_lag = config.rs_lag,
        history_start = %config.history_start,
        "Screener configuration"
    );

    let universe: Box<dyn UniverseProvider> = match run.symbols.clone() {
        Some(symbols) => Box::new(StaticUniverse::new(symbols)),
        None => Box::new(FileUniverse::new(run.universe_file.clone())),
    };
    let symbols = universe
        .symbols()
        .await
        .map_err(stagescan::core::ScreenerError::Universe)?;
    info!(count = symbols.len(), "Loaded {} symbols", symbols.len());

    let metrics = Arc::new(Metrics::new().map_err(|e| format!("Failed to initialize metrics: {}", e))?);
    let client = YahooClient::new(run.yahoo_base_url.clone())?;
    let provider = Arc::new(YahooMarketDataProvider::new(client).with_retries(run.fetch_retries));

    let screener = Screener::new(config, provider.clone())
        .with_batch_options(BatchOptions::from(&run))
        .with_capitalization(provider)
        .with_metrics(metrics.clone());

    // Ctrl-C stops the run between instruments; results so far are kept.
    let shutdown = screener.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Shutdown requested, finishing current instruments...");
            shutdown.store(true, Ordering::Relaxed);
        }
    });

    let report = screener.run(&run.benchmark, &symbols).await?;

    write_candidates(&run.output_path, &report.candidates)?;
    if report.candidates.is_empty() {
        info!("No candidates found meeting the criteria.");
    } else {
        info!(
            path = %run.output_path.display(),
            "Saved {} candidates to {} (sorted by market cap)",
            report.candidates.len(),
            run.output_path.display()
        );
    }

    if !report.skipped.is_empty() {
        warn!(
            skipped = ?report.skipped_symbols(),
            "Skipped {} instruments due to data problems",
            report.skipped.len()
        );
    }
    if report.interrupted {
        warn!("Run interrupted before the whole universe was screened");
    }

    if let Some(ref path) = run.metrics_path {
        match metrics.export() {
            Ok(text) => {
                if let Err(e) = std::fs::write(path, text) {
                    warn!(error = %e, path = %path.display(), "Failed to write metrics file");
                }
            }
            Err(e) => warn!(error = %e, "Failed to export metrics"),
        }
    }

    info!(
        candidates = report.candidates.len(),
        elapsed_secs = report.duration.as_secs(),
        "Done in {}s. Found {} candidates.",
        report.duration.as_secs(),
        report.candidates.len()
    );

    Ok(())
}
