//! Unit tests for configuration parsing and validation

use chrono::Weekday;
use stagescan::config::{parse_bool, parse_date, parse_value, ConfigError, RunConfig, ScreenerConfig};
use std::time::Duration;

use crate::fixtures::date;

#[test]
fn test_screener_defaults() {
    let config = ScreenerConfig::default();
    assert_eq!(config.trend_window, 30);
    assert_eq!(config.base_lookback_weeks, 20);
    assert_eq!(config.volume_window, 30);
    assert_eq!(config.volume_multiplier, 1.5);
    assert!(config.rs_required);
    assert_eq!(config.rs_lag, 8);
    assert_eq!(config.history_start, date(2010, 1, 1));
    assert_eq!(config.history_end, None);
    assert_eq!(config.week_anchor, Weekday::Fri);
    assert_eq!(config.min_history_weeks(), 50);
    assert!(config.validate().is_ok());
}

#[test]
fn test_indicator_params_follow_config() {
    let config = ScreenerConfig {
        trend_window: 10,
        volume_window: 12,
        volume_multiplier: 2.0,
        rs_lag: 4,
        ..ScreenerConfig::default()
    };
    let params = config.indicator_params();
    assert_eq!(params.trend_window, 10);
    assert_eq!(params.volume_window, 12);
    assert_eq!(params.volume_multiplier, 2.0);
    assert_eq!(params.rs_lag, 4);
}

#[test]
fn test_zero_window_is_rejected() {
    let config = ScreenerConfig {
        base_lookback_weeks: 0,
        ..ScreenerConfig::default()
    };
    match config.validate() {
        Err(ConfigError::InvalidValue { key, .. }) => {
            assert_eq!(key, "SCREENER_BASE_LOOKBACK_WEEKS")
        }
        other => panic!("expected invalid value, got {:?}", other),
    }
}

#[test]
fn test_non_positive_multiplier_is_rejected() {
    for multiplier in [0.0, -1.5, f64::NAN] {
        let config = ScreenerConfig {
            volume_multiplier: multiplier,
            ..ScreenerConfig::default()
        };
        assert!(config.validate().is_err(), "accepted {}", multiplier);
    }
}

#[test]
fn test_history_end_must_follow_start() {
    let config = ScreenerConfig {
        history_end: Some(date(2009, 12, 31)),
        ..ScreenerConfig::default()
    };
    assert!(config.validate().is_err());

    let config = ScreenerConfig {
        history_end: Some(date(2024, 6, 28)),
        ..ScreenerConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_run_defaults() {
    let run = RunConfig::default();
    assert_eq!(run.benchmark, "SPY");
    assert_eq!(run.batch_size, 50);
    assert_eq!(run.request_pause, Duration::from_secs(1));
    assert!(run.symbols.is_none());
    assert!(run.metrics_path.is_none());
}

#[test]
fn test_parse_value() {
    assert_eq!(parse_value::<usize>("KEY", " 42 ").unwrap(), 42);
    assert_eq!(parse_value::<f64>("KEY", "1.75").unwrap(), 1.75);

    let err = parse_value::<usize>("SCREENER_TREND_WEEKS", "thirty").unwrap_err();
    assert!(err.to_string().contains("SCREENER_TREND_WEEKS"));
}

#[test]
fn test_parse_bool() {
    for raw in ["1", "true", "TRUE", "yes", "on"] {
        assert!(parse_bool("KEY", raw).unwrap(), "{}", raw);
    }
    for raw in ["0", "false", "No", "off"] {
        assert!(!parse_bool("KEY", raw).unwrap(), "{}", raw);
    }
    assert!(parse_bool("KEY", "maybe").is_err());
}

#[test]
fn test_parse_date() {
    assert_eq!(parse_date("KEY", "2015-03-20").unwrap(), date(2015, 3, 20));
    assert!(matches!(
        parse_date("KEY", "20/03/2015"),
        Err(ConfigError::InvalidDate { .. })
    ));
}

#[test]
fn test_production_environment_names() {
    assert!(stagescan::logging::is_production("production"));
    assert!(stagescan::logging::is_production("prod"));
    assert!(!stagescan::logging::is_production("development"));
}
