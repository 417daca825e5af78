//! Stage 2 buy-signal evaluation on the latest weekly row.

use serde::{Deserialize, Serialize};

use crate::config::ScreenerConfig;
use crate::indicators::rolling::window_max;
use crate::models::candidate::SignalSnapshot;
use crate::models::indicators::IndicatorRow;
use crate::signals::conditions::{self, ConditionOutcome, SignalCondition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionKind {
    Pass,
    Fail,
    /// Not enough weekly rows to judge; a normal outcome, not an error.
    InsufficientHistory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDecision {
    pub kind: DecisionKind,
    pub passes: bool,
    pub conditions: Vec<ConditionOutcome>,
    pub snapshot: Option<SignalSnapshot>,
}

impl SignalDecision {
    fn insufficient_history() -> Self {
        Self {
            kind: DecisionKind::InsufficientHistory,
            passes: false,
            conditions: Vec::new(),
            snapshot: None,
        }
    }

    /// Conditions that did not hold, in evaluation order.
    pub fn failed_conditions(&self) -> Vec<SignalCondition> {
        self.conditions
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.condition)
            .collect()
    }
}

pub struct SignalEvaluator;

impl SignalEvaluator {
    /// Evaluate the most recent row of `rows` against every buy condition.
    pub fn evaluate(rows: &[IndicatorRow], config: &ScreenerConfig) -> SignalDecision {
        if rows.len() < config.min_history_weeks() {
            return SignalDecision::insufficient_history();
        }
        let last = match rows.last() {
            Some(row) => row,
            None => return SignalDecision::insufficient_history(),
        };

        let prior_high = Self::prior_high(rows, config.base_lookback_weeks);

        let outcomes = SignalCondition::ALL
            .iter()
            .map(|&condition| {
                let passed = match condition {
                    SignalCondition::Breakout => conditions::breakout(last, prior_high),
                    SignalCondition::AboveTrend => conditions::above_trend(last),
                    SignalCondition::RisingTrend => conditions::rising_trend(last),
                    SignalCondition::VolumeSpike => conditions::volume_spike(last),
                    SignalCondition::RelativeStrength => {
                        conditions::relative_strength_rising(last, config.rs_required)
                    }
                };
                ConditionOutcome { condition, passed }
            })
            .collect::<Vec<_>>();

        let passes = outcomes.iter().all(|o| o.passed);
        let snapshot = if passes {
            Self::snapshot(last, prior_high)
        } else {
            None
        };

        SignalDecision {
            kind: if passes { DecisionKind::Pass } else { DecisionKind::Fail },
            passes: snapshot.is_some(),
            conditions: outcomes,
            snapshot,
        }
    }

    /// Highest close of the `lookback` rows preceding the last one.
    pub fn prior_high(rows: &[IndicatorRow], lookback: usize) -> Option<f64> {
        let end = rows.len().checked_sub(1)?;
        let start = end.checked_sub(lookback)?;
        let closes: Vec<f64> = rows.iter().map(|r| r.close()).collect();
        window_max(&closes, start, end)
    }

    fn snapshot(last: &IndicatorRow, prior_high: Option<f64>) -> Option<SignalSnapshot> {
        Some(SignalSnapshot {
            week_end: last.bar.week_end,
            close: last.close(),
            prior_high: prior_high?,
            trend_average: last.trend_average?,
            trend_slope: last.trend_slope?,
            volume: last.volume(),
            average_volume: last.average_volume?,
            volume_spike: last.volume_spike,
            relative_strength: last.rs_ratio(),
            rs_slope: last.rs_slope(),
        })
    }
}
