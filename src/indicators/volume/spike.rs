//! Average volume and abnormal-volume detection

use crate::indicators::rolling::rolling_mean;
use crate::models::bars::WeeklyBar;

/// Rolling mean of volume over `window` weeks.
pub fn average_volume(bars: &[WeeklyBar], window: usize) -> Vec<Option<f64>> {
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
    rolling_mean(&volumes, window)
}

/// True iff `volume` strictly exceeds `multiplier * average`.
///
/// A missing or non-positive average never flags a spike.
pub fn is_volume_spike(volume: f64, average: Option<f64>, multiplier: f64) -> bool {
    match average {
        Some(avg) if avg > 0.0 => volume > multiplier * avg,
        _ => false,
    }
}
