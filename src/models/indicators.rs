use serde::{Deserialize, Serialize};

use super::bars::WeeklyBar;

/// Instrument performance against the benchmark for one week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeStrength {
    /// Benchmark close aligned to this week (last known close on or before it).
    pub benchmark_close: Option<f64>,
    pub ratio: Option<f64>,
    pub slope: Option<f64>,
}

/// A weekly bar together with every indicator derived up to and including it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub bar: WeeklyBar,
    pub trend_average: Option<f64>,
    pub trend_slope: Option<f64>,
    pub average_volume: Option<f64>,
    pub volume_spike: bool,
    /// `None` when the series was computed without a benchmark.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_strength: Option<RelativeStrength>,
}

impl IndicatorRow {
    pub fn close(&self) -> f64 {
        self.bar.close
    }

    pub fn volume(&self) -> f64 {
        self.bar.volume
    }

    pub fn rs_ratio(&self) -> Option<f64> {
        self.relative_strength.and_then(|rs| rs.ratio)
    }

    pub fn rs_slope(&self) -> Option<f64> {
        self.relative_strength.and_then(|rs| rs.slope)
    }
}
