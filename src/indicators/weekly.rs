//! Daily to weekly bar aggregation.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::bars::{DailyBar, WeeklyBar};

/// The anchor-day date closing the week that contains `date`.
///
/// Days after the anchor roll into the following week, so with a Friday
/// anchor a Saturday session belongs to the next Friday.
pub fn week_ending(date: NaiveDate, anchor: Weekday) -> NaiveDate {
    let today = date.weekday().num_days_from_monday() as i64;
    let target = anchor.num_days_from_monday() as i64;
    date + Duration::days((target - today).rem_euclid(7))
}

#[derive(Debug)]
struct WeekAccumulator {
    week_end: NaiveDate,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: f64,
}

impl WeekAccumulator {
    fn start(week_end: NaiveDate, bar: &DailyBar) -> Self {
        let mut acc = Self {
            week_end,
            open: None,
            high: None,
            low: None,
            close: None,
            volume: 0.0,
        };
        acc.push(bar);
        acc
    }

    fn push(&mut self, bar: &DailyBar) {
        if self.open.is_none() {
            self.open = bar.open;
        }
        self.high = max_present(self.high, bar.high);
        self.low = min_present(self.low, bar.low);
        if bar.close.is_some() {
            self.close = bar.close;
        }
        self.volume += bar.volume;
    }

    fn finish(self) -> Option<WeeklyBar> {
        Some(WeeklyBar {
            week_end: self.week_end,
            open: self.open?,
            high: self.high?,
            low: self.low?,
            close: self.close?,
            volume: self.volume,
        })
    }
}

fn max_present(acc: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (acc, value) {
        (Some(a), Some(v)) => Some(a.max(v)),
        (a, v) => a.or(v),
    }
}

fn min_present(acc: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (acc, value) {
        (Some(a), Some(v)) => Some(a.min(v)),
        (a, v) => a.or(v),
    }
}

/// Aggregate an ascending daily series into weekly bars.
///
/// Consecutive sessions sharing a week-end date form one bar. Weeks where no
/// session reported one of the OHLC fields are dropped rather than filled.
pub fn aggregate(daily: &[DailyBar], week_anchor: Weekday) -> Vec<WeeklyBar> {
    let mut weeks = Vec::new();
    let mut current: Option<WeekAccumulator> = None;

    for bar in daily {
        let week_end = week_ending(bar.date, week_anchor);
        match current.as_mut() {
            Some(acc) if acc.week_end == week_end => acc.push(bar),
            _ => {
                if let Some(done) = current.take() {
                    weeks.extend(done.finish());
                }
                current = Some(WeekAccumulator::start(week_end, bar));
            }
        }
    }

    if let Some(done) = current {
        weeks.extend(done.finish());
    }

    weeks
}
