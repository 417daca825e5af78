//! Environment-driven configuration.
//!
//! `ScreenerConfig` holds the pure rule parameters handed to every core call.
//! `RunConfig` holds the I/O concerns of a screening run (universe, provider,
//! throttling, output).

use chrono::{NaiveDate, Weekday};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::indicators::engine::IndicatorParams;
use crate::services::yahoo::DEFAULT_BASE_URL;

pub const DEFAULT_TREND_WEEKS: usize = 30;
pub const DEFAULT_BASE_LOOKBACK_WEEKS: usize = 20;
pub const DEFAULT_VOLUME_WEEKS: usize = 30;
pub const DEFAULT_VOLUME_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_RS_LAG_WEEKS: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
    #[error("invalid date for {key}: {value} (expected YYYY-MM-DD)")]
    InvalidDate { key: String, value: String },
}

/// Rule parameters of the stage 2 screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerConfig {
    pub trend_window: usize,
    pub base_lookback_weeks: usize,
    pub volume_window: usize,
    pub volume_multiplier: f64,
    pub rs_required: bool,
    pub rs_lag: usize,
    pub history_start: NaiveDate,
    pub history_end: Option<NaiveDate>,
    pub week_anchor: Weekday,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            trend_window: DEFAULT_TREND_WEEKS,
            base_lookback_weeks: DEFAULT_BASE_LOOKBACK_WEEKS,
            volume_window: DEFAULT_VOLUME_WEEKS,
            volume_multiplier: DEFAULT_VOLUME_MULTIPLIER,
            rs_required: true,
            rs_lag: DEFAULT_RS_LAG_WEEKS,
            history_start: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap_or_default(),
            history_end: None,
            week_anchor: Weekday::Fri,
        }
    }
}

impl ScreenerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            trend_window: env_parse("SCREENER_TREND_WEEKS", defaults.trend_window)?,
            base_lookback_weeks: env_parse(
                "SCREENER_BASE_LOOKBACK_WEEKS",
                defaults.base_lookback_weeks,
            )?,
            volume_window: env_parse("SCREENER_VOLUME_WEEKS", defaults.volume_window)?,
            volume_multiplier: env_parse("SCREENER_VOLUME_MULTIPLIER", defaults.volume_multiplier)?,
            rs_required: env_bool("SCREENER_RS_REQUIRED", defaults.rs_required)?,
            rs_lag: env_parse("SCREENER_RS_LAG_WEEKS", defaults.rs_lag)?,
            history_start: env_date("SCREENER_HISTORY_START")?.unwrap_or(defaults.history_start),
            history_end: env_date("SCREENER_HISTORY_END")?,
            week_anchor: env_weekday("SCREENER_WEEK_ANCHOR", defaults.week_anchor)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("SCREENER_TREND_WEEKS", self.trend_window),
            ("SCREENER_BASE_LOOKBACK_WEEKS", self.base_lookback_weeks),
            ("SCREENER_VOLUME_WEEKS", self.volume_window),
            ("SCREENER_RS_LAG_WEEKS", self.rs_lag),
        ];
        for (key, value) in windows {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be at least 1 week".to_string(),
                });
            }
        }
        if !self.volume_multiplier.is_finite() || self.volume_multiplier <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "SCREENER_VOLUME_MULTIPLIER".to_string(),
                message: format!("must be a positive number, got {}", self.volume_multiplier),
            });
        }
        if let Some(end) = self.history_end {
            if end <= self.history_start {
                return Err(ConfigError::InvalidValue {
                    key: "SCREENER_HISTORY_END".to_string(),
                    message: format!("{} is not after history start {}", end, self.history_start),
                });
            }
        }
        Ok(())
    }

    /// Weekly rows needed before the evaluator will make a decision.
    pub fn min_history_weeks(&self) -> usize {
        self.trend_window + self.base_lookback_weeks
    }

    pub fn indicator_params(&self) -> IndicatorParams {
        IndicatorParams {
            trend_window: self.trend_window,
            volume_window: self.volume_window,
            volume_multiplier: self.volume_multiplier,
            rs_lag: self.rs_lag,
        }
    }
}

/// I/O settings of a screening run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub benchmark: String,
    pub symbols: Option<Vec<String>>,
    pub universe_file: PathBuf,
    pub output_path: PathBuf,
    pub batch_size: usize,
    pub request_pause: Duration,
    pub concurrency: usize,
    pub fetch_retries: usize,
    pub yahoo_base_url: String,
    pub metrics_path: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            benchmark: "SPY".to_string(),
            symbols: None,
            universe_file: PathBuf::from("data/universe.csv"),
            output_path: PathBuf::from("data/weinstein_candidates.csv"),
            batch_size: 50,
            request_pause: Duration::from_millis(1000),
            concurrency: 8,
            fetch_retries: 3,
            yahoo_base_url: DEFAULT_BASE_URL.to_string(),
            metrics_path: None,
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let symbols = env::var("SCREENER_SYMBOLS").ok().map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        let config = Self {
            benchmark: env::var("SCREENER_BENCHMARK").unwrap_or(defaults.benchmark),
            symbols: symbols.filter(|s| !s.is_empty()),
            universe_file: env::var("SCREENER_UNIVERSE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.universe_file),
            output_path: env::var("SCREENER_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            batch_size: env_parse("SCREENER_BATCH_SIZE", defaults.batch_size)?,
            request_pause: Duration::from_millis(env_parse(
                "SCREENER_REQUEST_PAUSE_MS",
                defaults.request_pause.as_millis() as u64,
            )?),
            concurrency: env_parse("SCREENER_CONCURRENCY", defaults.concurrency)?,
            fetch_retries: env_parse("SCREENER_FETCH_RETRIES", defaults.fetch_retries)?,
            yahoo_base_url: env::var("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            metrics_path: env::var("SCREENER_METRICS_PATH").ok().map(PathBuf::from),
        };

        if config.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SCREENER_BATCH_SIZE".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if config.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SCREENER_CONCURRENCY".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(config)
    }
}

/// Deployment environment, drives the log format.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
}

fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

pub fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{:?}: {}", raw, e),
    })
}

fn env_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(raw) => parse_bool(key, &raw),
        Err(_) => Ok(default),
    }
}

pub fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got {:?}", other),
        }),
    }
}

fn env_date(key: &str) -> Result<Option<NaiveDate>, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => parse_date(key, &raw).map(Some),
        _ => Ok(None),
    }
}

pub fn parse_date(key: &str, raw: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ConfigError::InvalidDate {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

fn env_weekday(key: &str, default: Weekday) -> Result<Weekday, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<Weekday>().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a weekday such as Fri, got {:?}", raw),
        }),
        Err(_) => Ok(default),
    }
}
