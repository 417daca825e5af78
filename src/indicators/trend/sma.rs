//! Trend average (SMA of weekly closes) and its slope

use crate::indicators::rolling::{lagged_difference, rolling_mean};
use crate::models::bars::WeeklyBar;

/// Rolling mean of close over `window` weeks.
pub fn trend_average(bars: &[WeeklyBar], window: usize) -> Vec<Option<f64>> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    rolling_mean(&closes, window)
}

/// Week-over-week change of the trend average.
pub fn trend_slope(average: &[Option<f64>]) -> Vec<Option<f64>> {
    lagged_difference(average, 1)
}
