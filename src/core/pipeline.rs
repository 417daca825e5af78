//! Per-instrument pipeline: daily bars -> weekly bars -> indicators -> decision.

use crate::config::ScreenerConfig;
use crate::indicators::{aggregate, compute};
use crate::models::bars::{DailyBar, WeeklyBar};
use crate::models::indicators::IndicatorRow;
use crate::signals::{SignalDecision, SignalEvaluator};

/// Indicator rows for a daily series, optionally against a weekly benchmark.
pub fn indicator_rows(
    daily: &[DailyBar],
    benchmark: Option<&[WeeklyBar]>,
    config: &ScreenerConfig,
) -> Vec<IndicatorRow> {
    let weekly = aggregate(daily, config.week_anchor);
    compute(&weekly, &config.indicator_params(), benchmark)
}

/// Evaluate the latest completed week of a daily series.
pub fn evaluate_daily_series(
    daily: &[DailyBar],
    benchmark: Option<&[WeeklyBar]>,
    config: &ScreenerConfig,
) -> SignalDecision {
    let rows = indicator_rows(daily, benchmark, config);
    SignalEvaluator::evaluate(&rows, config)
}
