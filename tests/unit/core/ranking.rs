//! Unit tests for candidate ordering

use stagescan::core::ranking::rank_candidates;
use stagescan::models::candidate::{CandidateRecord, SignalSnapshot};

use crate::fixtures::week;

fn candidate(symbol: &str, market_cap: Option<f64>) -> CandidateRecord {
    let snapshot = SignalSnapshot {
        week_end: week(50),
        close: 105.0,
        prior_high: 100.0,
        trend_average: 93.75,
        trend_slope: 0.5,
        volume: 2000.0,
        average_volume: 1000.0,
        volume_spike: true,
        relative_strength: Some(1.05),
        rs_slope: Some(0.1),
    };
    CandidateRecord::from_snapshot(symbol, snapshot).with_market_cap(market_cap)
}

fn symbols(candidates: &[CandidateRecord]) -> Vec<&str> {
    candidates.iter().map(|c| c.symbol.as_str()).collect()
}

#[test]
fn test_largest_cap_first() {
    let mut candidates = vec![
        candidate("SMALL", Some(2.0e9)),
        candidate("MEGA", Some(2.5e12)),
        candidate("MID", Some(4.0e10)),
    ];
    rank_candidates(&mut candidates);
    assert_eq!(symbols(&candidates), vec!["MEGA", "MID", "SMALL"]);
}

#[test]
fn test_unknown_caps_sort_last_by_symbol() {
    let mut candidates = vec![
        candidate("ZZZ", None),
        candidate("BIG", Some(1.0e11)),
        candidate("AAA", None),
        candidate("NAN", Some(f64::NAN)),
    ];
    rank_candidates(&mut candidates);
    assert_eq!(symbols(&candidates), vec!["BIG", "AAA", "NAN", "ZZZ"]);
}

#[test]
fn test_equal_caps_tie_break_on_symbol() {
    let mut candidates = vec![
        candidate("MSFT", Some(3.0e12)),
        candidate("AAPL", Some(3.0e12)),
    ];
    rank_candidates(&mut candidates);
    assert_eq!(symbols(&candidates), vec!["AAPL", "MSFT"]);
}
