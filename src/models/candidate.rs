use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metric snapshot of the latest week of an instrument that passed every rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSnapshot {
    pub week_end: NaiveDate,
    pub close: f64,
    pub prior_high: f64,
    pub trend_average: f64,
    pub trend_slope: f64,
    pub volume: f64,
    pub average_volume: f64,
    pub volume_spike: bool,
    pub relative_strength: Option<f64>,
    pub rs_slope: Option<f64>,
}

/// One row of the ranked candidate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub symbol: String,
    pub week_end: NaiveDate,
    pub close: f64,
    pub prior_high: f64,
    pub trend_average: f64,
    pub trend_slope: f64,
    pub volume: f64,
    pub average_volume: f64,
    pub volume_spike: bool,
    pub relative_strength: Option<f64>,
    pub rs_slope: Option<f64>,
    pub market_cap: Option<f64>,
}

impl CandidateRecord {
    pub fn from_snapshot(symbol: impl Into<String>, snapshot: SignalSnapshot) -> Self {
        Self {
            symbol: symbol.into(),
            week_end: snapshot.week_end,
            close: snapshot.close,
            prior_high: snapshot.prior_high,
            trend_average: snapshot.trend_average,
            trend_slope: snapshot.trend_slope,
            volume: snapshot.volume,
            average_volume: snapshot.average_volume,
            volume_spike: snapshot.volume_spike,
            relative_strength: snapshot.relative_strength,
            rs_slope: snapshot.rs_slope,
            market_cap: None,
        }
    }

    pub fn with_market_cap(mut self, market_cap: Option<f64>) -> Self {
        self.market_cap = market_cap;
        self
    }
}
