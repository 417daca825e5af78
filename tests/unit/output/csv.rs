//! Unit tests for the candidate CSV writer

use stagescan::models::candidate::{CandidateRecord, SignalSnapshot};
use stagescan::output::{write_candidates, CANDIDATE_COLUMNS};
use std::fs;
use tempfile::tempdir;

use crate::fixtures::week;

fn candidate(symbol: &str, market_cap: Option<f64>, rs: Option<f64>) -> CandidateRecord {
    CandidateRecord::from_snapshot(
        symbol,
        SignalSnapshot {
            week_end: week(50),
            close: 105.0,
            prior_high: 100.0,
            trend_average: 93.75,
            trend_slope: 0.5,
            volume: 2000.0,
            average_volume: 1000.0,
            volume_spike: true,
            relative_strength: rs,
            rs_slope: rs.map(|_| 0.25),
        },
    )
    .with_market_cap(market_cap)
}

#[test]
fn test_no_candidates_writes_header_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/out/candidates.csv");

    write_candidates(&path, &[]).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.trim_end(), CANDIDATE_COLUMNS.join(","));
}

#[test]
fn test_rows_follow_header_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("candidates.csv");

    write_candidates(&path, &[candidate("AAPL", Some(3.0e12), Some(1.5))]).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), CANDIDATE_COLUMNS.to_vec());

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "AAPL");
    assert_eq!(&rows[0][1], "2020-12-11");
    assert_eq!(rows[0][2].parse::<f64>().unwrap(), 105.0);
    assert_eq!(&rows[0][8], "true");
    assert_eq!(rows[0][11].parse::<f64>().unwrap(), 3.0e12);
}

#[test]
fn test_unknown_values_are_empty_cells() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("candidates.csv");

    write_candidates(&path, &[candidate("XYZ", None, None)]).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(&row[9], "");
    assert_eq!(&row[10], "");
    assert_eq!(&row[11], "");
}
