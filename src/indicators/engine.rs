//! Indicator engine: turns a weekly series into indicator rows.

use crate::indicators::relative_strength::relative_strength;
use crate::indicators::trend::{trend_average, trend_slope};
use crate::indicators::volume::{average_volume, is_volume_spike};
use crate::models::bars::WeeklyBar;
use crate::models::indicators::IndicatorRow;

/// Window and threshold parameters of the indicator engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorParams {
    pub trend_window: usize,
    pub volume_window: usize,
    pub volume_multiplier: f64,
    pub rs_lag: usize,
}

/// Derive every indicator for each week of `weekly`.
///
/// Relative strength is only populated when `benchmark` is supplied.
pub fn compute(
    weekly: &[WeeklyBar],
    params: &IndicatorParams,
    benchmark: Option<&[WeeklyBar]>,
) -> Vec<IndicatorRow> {
    let averages = trend_average(weekly, params.trend_window);
    let slopes = trend_slope(&averages);
    let avg_volumes = average_volume(weekly, params.volume_window);
    let strengths = benchmark.map(|b| relative_strength(weekly, b, params.rs_lag));

    weekly
        .iter()
        .enumerate()
        .map(|(t, bar)| IndicatorRow {
            bar: bar.clone(),
            trend_average: averages[t],
            trend_slope: slopes[t],
            average_volume: avg_volumes[t],
            volume_spike: is_volume_spike(bar.volume, avg_volumes[t], params.volume_multiplier),
            relative_strength: strengths.as_ref().map(|rs| rs[t]),
        })
        .collect()
}
