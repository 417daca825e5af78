//! Prometheus metrics for screening runs

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub instruments_scanned_total: IntCounter,
    pub instruments_skipped_total: IntCounter,
    pub candidates_total: IntCounter,
    pub enrichment_failures_total: IntCounter,
    pub instrument_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let instruments_scanned_total = IntCounter::new(
            "screener_instruments_scanned_total",
            "Instruments whose daily history was fetched and evaluated",
        )?;
        let instruments_skipped_total = IntCounter::new(
            "screener_instruments_skipped_total",
            "Instruments skipped because of missing or invalid data",
        )?;
        let candidates_total = IntCounter::new(
            "screener_candidates_total",
            "Instruments passing every stage 2 condition",
        )?;
        let enrichment_failures_total = IntCounter::new(
            "screener_enrichment_failures_total",
            "Market capitalization lookups that failed",
        )?;
        let instrument_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "screener_instrument_duration_seconds",
                "Fetch and evaluation time per instrument",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;

        registry.register(Box::new(instruments_scanned_total.clone()))?;
        registry.register(Box::new(instruments_skipped_total.clone()))?;
        registry.register(Box::new(candidates_total.clone()))?;
        registry.register(Box::new(enrichment_failures_total.clone()))?;
        registry.register(Box::new(instrument_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            instruments_scanned_total,
            instruments_skipped_total,
            candidates_total,
            enrichment_failures_total,
            instrument_duration_seconds,
        })
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
