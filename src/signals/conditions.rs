//! The five stage 2 buy conditions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::indicators::IndicatorRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalCondition {
    Breakout,
    AboveTrend,
    RisingTrend,
    VolumeSpike,
    RelativeStrength,
}

impl SignalCondition {
    pub const ALL: [SignalCondition; 5] = [
        SignalCondition::Breakout,
        SignalCondition::AboveTrend,
        SignalCondition::RisingTrend,
        SignalCondition::VolumeSpike,
        SignalCondition::RelativeStrength,
    ];
}

impl fmt::Display for SignalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalCondition::Breakout => "breakout",
            SignalCondition::AboveTrend => "above_trend",
            SignalCondition::RisingTrend => "rising_trend",
            SignalCondition::VolumeSpike => "volume_spike",
            SignalCondition::RelativeStrength => "relative_strength",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionOutcome {
    pub condition: SignalCondition,
    pub passed: bool,
}

/// Close above the highest close of the preceding base.
pub fn breakout(last: &IndicatorRow, prior_high: Option<f64>) -> bool {
    matches!(prior_high, Some(high) if last.close() > high)
}

pub fn above_trend(last: &IndicatorRow) -> bool {
    matches!(last.trend_average, Some(avg) if last.close() > avg)
}

pub fn rising_trend(last: &IndicatorRow) -> bool {
    matches!(last.trend_slope, Some(slope) if slope > 0.0)
}

pub fn volume_spike(last: &IndicatorRow) -> bool {
    last.average_volume.is_some() && last.volume_spike
}

/// Rising ratio against the benchmark.
///
/// Vacuously true when not required, or when the rows were computed without
/// a benchmark.
pub fn relative_strength_rising(last: &IndicatorRow, required: bool) -> bool {
    if !required {
        return true;
    }
    match last.relative_strength {
        None => true,
        Some(rs) => matches!(rs.slope, Some(slope) if slope > 0.0),
    }
}
