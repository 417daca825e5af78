//! Batch screening orchestrator
//!
//! Fetches the benchmark once, then walks the universe in batches. Each
//! instrument goes through fetch -> validate -> aggregate -> indicators ->
//! evaluation. Passing instruments are enriched with market cap and ranked.

use futures_util::stream::{self, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::{RunConfig, ScreenerConfig};
use crate::core::pipeline::evaluate_daily_series;
use crate::core::ranking::rank_candidates;
use crate::core::report::{ScreenReport, ScreenerError, SkippedInstrument};
use crate::indicators::aggregate;
use crate::metrics::Metrics;
use crate::models::bars::{validate_daily_series, WeeklyBar};
use crate::models::candidate::CandidateRecord;
use crate::services::error::ProviderError;
use crate::services::market_data::{CapitalizationProvider, PriceHistoryProvider};
use crate::signals::{DecisionKind, SignalCondition};

/// Batching and throttling of provider calls.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub batch_size: usize,
    pub request_pause: Duration,
    pub concurrency: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::from(&RunConfig::default())
    }
}

impl From<&RunConfig> for BatchOptions {
    fn from(run: &RunConfig) -> Self {
        Self {
            batch_size: run.batch_size.max(1),
            request_pause: run.request_pause,
            concurrency: run.concurrency.max(1),
        }
    }
}

enum InstrumentOutcome {
    Candidate(CandidateRecord),
    NoSignal(Vec<SignalCondition>),
    InsufficientHistory,
    Skipped(SkippedInstrument),
    Cancelled,
}

pub struct Screener {
    config: ScreenerConfig,
    batch: BatchOptions,
    prices: Arc<dyn PriceHistoryProvider>,
    capitalization: Option<Arc<dyn CapitalizationProvider>>,
    metrics: Option<Arc<Metrics>>,
    shutdown: Arc<AtomicBool>,
}

impl Screener {
    pub fn new(config: ScreenerConfig, prices: Arc<dyn PriceHistoryProvider>) -> Self {
        Self {
            config,
            batch: BatchOptions::default(),
            prices,
            capitalization: None,
            metrics: None,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_batch_options(mut self, batch: BatchOptions) -> Self {
        self.batch = batch;
        self
    }

    pub fn with_capitalization(mut self, provider: Arc<dyn CapitalizationProvider>) -> Self {
        self.capitalization = Some(provider);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &ScreenerConfig {
        &self.config
    }

    /// Flag checked between instruments; setting it ends the run early.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Fetch and aggregate the benchmark series.
    pub async fn load_benchmark(&self, symbol: &str) -> Result<Vec<WeeklyBar>, ScreenerError> {
        info!(benchmark = %symbol, "Screener: downloading benchmark {} daily data", symbol);

        let benchmark_error = |source: ProviderError| ScreenerError::Benchmark {
            symbol: symbol.to_string(),
            source,
        };

        let daily = self
            .prices
            .daily_bars(symbol, self.config.history_start, self.config.history_end)
            .await
            .map_err(benchmark_error)?;
        validate_daily_series(&daily).map_err(benchmark_error)?;

        let weekly = aggregate(&daily, self.config.week_anchor);
        if weekly.is_empty() {
            return Err(benchmark_error(ProviderError::NoData(symbol.to_string())));
        }

        debug!(
            benchmark = %symbol,
            weeks = weekly.len(),
            "Screener: benchmark {} aggregated to {} weeks",
            symbol,
            weekly.len()
        );
        Ok(weekly)
    }

    /// Screen `symbols` against `benchmark`.
    ///
    /// Only a benchmark failure aborts the run; instrument failures are
    /// recorded in the report and the run continues.
    pub async fn run(&self, benchmark: &str, symbols: &[String]) -> Result<ScreenReport, ScreenerError> {
        let started = Instant::now();
        let benchmark_weekly: Arc<[WeeklyBar]> = self.load_benchmark(benchmark).await?.into();

        let mut report = ScreenReport {
            benchmark: benchmark.to_string(),
            scanned: 0,
            insufficient_history: 0,
            candidates: Vec::new(),
            skipped: Vec::new(),
            interrupted: false,
            duration: Duration::ZERO,
        };

        let batch_count = symbols.len().div_ceil(self.batch.batch_size);
        for (index, batch) in symbols.chunks(self.batch.batch_size).enumerate() {
            if self.is_shutting_down() {
                report.interrupted = true;
                break;
            }

            info!(
                batch = index + 1,
                size = batch.len(),
                "Screener: processing batch {}/{}: {} symbols",
                index + 1,
                batch_count,
                batch.len()
            );

            let outcomes: Vec<InstrumentOutcome> = stream::iter(batch.iter())
                .map(|symbol| self.screen_symbol(symbol, benchmark_weekly.clone()))
                .buffered(self.batch.concurrency)
                .collect()
                .await;

            for outcome in outcomes {
                match outcome {
                    InstrumentOutcome::Candidate(record) => {
                        report.scanned += 1;
                        report.candidates.push(record);
                    }
                    InstrumentOutcome::NoSignal(_) => report.scanned += 1,
                    InstrumentOutcome::InsufficientHistory => {
                        report.scanned += 1;
                        report.insufficient_history += 1;
                    }
                    InstrumentOutcome::Skipped(skipped) => report.skipped.push(skipped),
                    InstrumentOutcome::Cancelled => report.interrupted = true,
                }
            }

            let is_last = index + 1 == batch_count;
            if !is_last && !self.is_shutting_down() && !self.batch.request_pause.is_zero() {
                tokio::time::sleep(self.batch.request_pause).await;
            }
        }

        self.enrich(&mut report.candidates).await;
        rank_candidates(&mut report.candidates);

        report.duration = started.elapsed();
        info!(
            candidates = report.candidates.len(),
            scanned = report.scanned,
            skipped = report.skipped.len(),
            "Screener: found {} candidates among {} instruments ({} skipped)",
            report.candidates.len(),
            report.scanned,
            report.skipped.len()
        );
        Ok(report)
    }

    async fn screen_symbol(&self, symbol: &str, benchmark: Arc<[WeeklyBar]>) -> InstrumentOutcome {
        if self.is_shutting_down() {
            return InstrumentOutcome::Cancelled;
        }
        let start = Instant::now();
        let outcome = self.screen_symbol_inner(symbol, &benchmark).await;

        if let Some(ref metrics) = self.metrics {
            metrics
                .instrument_duration_seconds
                .observe(start.elapsed().as_secs_f64());
            match &outcome {
                InstrumentOutcome::Skipped(_) => metrics.instruments_skipped_total.inc(),
                InstrumentOutcome::Cancelled => {}
                InstrumentOutcome::Candidate(_) => {
                    metrics.instruments_scanned_total.inc();
                    metrics.candidates_total.inc();
                }
                _ => metrics.instruments_scanned_total.inc(),
            }
        }
        outcome
    }

    async fn screen_symbol_inner(&self, symbol: &str, benchmark: &[WeeklyBar]) -> InstrumentOutcome {
        let skip = |reason: String| {
            InstrumentOutcome::Skipped(SkippedInstrument {
                symbol: symbol.to_string(),
                reason,
            })
        };

        let daily = match self
            .prices
            .daily_bars(symbol, self.config.history_start, self.config.history_end)
            .await
        {
            Ok(daily) => daily,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Screener: failed processing {}: {}", symbol, e);
                return skip(e.to_string());
            }
        };

        if daily.is_empty() {
            debug!(symbol = %symbol, "Screener: no daily data for {}, skipping", symbol);
            return skip("no daily data".to_string());
        }

        if let Err(e) = validate_daily_series(&daily) {
            warn!(symbol = %symbol, error = %e, "Screener: rejected daily series for {}: {}", symbol, e);
            return skip(e.to_string());
        }

        let decision = evaluate_daily_series(&daily, Some(benchmark), &self.config);
        match (decision.kind, decision.snapshot) {
            (DecisionKind::Pass, Some(snapshot)) => {
                info!(
                    symbol = %symbol,
                    close = snapshot.close,
                    trend_average = snapshot.trend_average,
                    "Candidate: {} | Close: {:.2} | SMA{}: {:.2}",
                    symbol,
                    snapshot.close,
                    self.config.trend_window,
                    snapshot.trend_average
                );
                InstrumentOutcome::Candidate(CandidateRecord::from_snapshot(symbol, snapshot))
            }
            (DecisionKind::InsufficientHistory, _) => {
                debug!(
                    symbol = %symbol,
                    required = self.config.min_history_weeks(),
                    "Screener: insufficient weekly history for {}",
                    symbol
                );
                InstrumentOutcome::InsufficientHistory
            }
            (_, _) => {
                let failed = decision
                    .conditions
                    .iter()
                    .filter(|c| !c.passed)
                    .map(|c| c.condition)
                    .collect::<Vec<_>>();
                debug!(
                    symbol = %symbol,
                    failed = ?failed,
                    "Screener: {} does not meet the stage 2 criteria",
                    symbol
                );
                InstrumentOutcome::NoSignal(failed)
            }
        }
    }

    async fn enrich(&self, candidates: &mut [CandidateRecord]) {
        let Some(provider) = self.capitalization.as_ref() else {
            return;
        };

        for candidate in candidates.iter_mut() {
            match provider.market_cap(&candidate.symbol).await {
                Ok(cap) => candidate.market_cap = cap.filter(|c| c.is_finite()),
                Err(e) => {
                    warn!(
                        symbol = %candidate.symbol,
                        error = %e,
                        "Screener: could not fetch market cap for {}: {}",
                        candidate.symbol,
                        e
                    );
                    candidate.market_cap = None;
                    if let Some(ref metrics) = self.metrics {
                        metrics.enrichment_failures_total.inc();
                    }
                }
            }
        }
    }
}
