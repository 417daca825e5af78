//! Relative strength of an instrument against a benchmark.

use crate::indicators::rolling::lagged_difference;
use crate::models::bars::WeeklyBar;
use crate::models::indicators::RelativeStrength;

/// Benchmark close aligned to each instrument week.
///
/// Each week receives the last benchmark close dated on or before its
/// week-end. Weeks before the benchmark's first bar stay `None`. Both series
/// must be ascending by week-end.
pub fn align_benchmark(bars: &[WeeklyBar], benchmark: &[WeeklyBar]) -> Vec<Option<f64>> {
    let mut aligned = Vec::with_capacity(bars.len());
    let mut cursor = 0;
    let mut last_known: Option<f64> = None;

    for bar in bars {
        while cursor < benchmark.len() && benchmark[cursor].week_end <= bar.week_end {
            last_known = Some(benchmark[cursor].close);
            cursor += 1;
        }
        aligned.push(last_known);
    }

    aligned
}

/// Per-week relative strength: aligned benchmark close, ratio and lagged slope.
pub fn relative_strength(
    bars: &[WeeklyBar],
    benchmark: &[WeeklyBar],
    lag: usize,
) -> Vec<RelativeStrength> {
    let aligned = align_benchmark(bars, benchmark);
    let ratios: Vec<Option<f64>> = bars
        .iter()
        .zip(&aligned)
        .map(|(bar, bench)| match bench {
            Some(b) if *b != 0.0 => Some(bar.close / b),
            _ => None,
        })
        .collect();
    let slopes = lagged_difference(&ratios, lag);

    aligned
        .into_iter()
        .zip(ratios)
        .zip(slopes)
        .map(|((benchmark_close, ratio), slope)| RelativeStrength {
            benchmark_close,
            ratio,
            slope,
        })
        .collect()
}
