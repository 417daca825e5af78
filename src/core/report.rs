//! Screening run results

use std::time::Duration;
use thiserror::Error;

use crate::config::ConfigError;
use crate::models::candidate::CandidateRecord;
use crate::services::error::ProviderError;

/// Run-level failures. Per-instrument problems never surface here.
#[derive(Debug, Error)]
pub enum ScreenerError {
    #[error("benchmark {symbol} unavailable: {source}")]
    Benchmark {
        symbol: String,
        #[source]
        source: ProviderError,
    },
    #[error("failed to load instrument universe: {0}")]
    Universe(#[source] ProviderError),
    #[error("failed to write candidate table: {0}")]
    Output(#[from] csv::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// An instrument left out of the run because of a data problem.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedInstrument {
    pub symbol: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ScreenReport {
    pub benchmark: String,
    /// Instruments whose history was fetched and evaluated.
    pub scanned: usize,
    pub insufficient_history: usize,
    pub candidates: Vec<CandidateRecord>,
    pub skipped: Vec<SkippedInstrument>,
    /// Set when a shutdown request stopped the run early.
    pub interrupted: bool,
    pub duration: Duration,
}

impl ScreenReport {
    pub fn skipped_symbols(&self) -> Vec<&str> {
        self.skipped.iter().map(|s| s.symbol.as_str()).collect()
    }
}
