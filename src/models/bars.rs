//! Daily and weekly price bars.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::services::error::ProviderError;

/// One trading session as delivered by a price history provider.
///
/// OHLC fields are optional because upstream feeds occasionally leave single
/// fields blank for a session; the weekly aggregation decides what to do with
/// such gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: f64,
}

impl DailyBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume,
        }
    }

    /// A session where only some of the price fields were reported.
    pub fn partial(
        date: NaiveDate,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: Option<f64>,
        volume: f64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// One calendar week of trading, keyed by the anchor day that closes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBar {
    pub week_end: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl WeeklyBar {
    pub fn new(week_end: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            week_end,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Reject series that are not strictly ascending by date.
pub fn validate_daily_series(bars: &[DailyBar]) -> Result<(), ProviderError> {
    for pair in bars.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.date == prev.date {
            return Err(ProviderError::InvalidSeries(format!(
                "duplicate session date {}",
                next.date
            )));
        }
        if next.date < prev.date {
            return Err(ProviderError::InvalidSeries(format!(
                "session {} follows {} out of order",
                next.date, prev.date
            )));
        }
    }
    Ok(())
}
