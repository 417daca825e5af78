#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use stagescan::models::bars::DailyBar;
use stagescan::services::{CapitalizationProvider, PriceHistoryProvider, ProviderError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Friday closing week `n` (1-based), starting 2020-01-03.
pub fn week(n: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 3).unwrap() + Duration::weeks(n as i64 - 1)
}

/// Monday to Friday sessions for consecutive weeks, each session at the
/// week's close and a fifth of its volume.
pub fn daily_sessions(closes: &[f64], volumes: &[f64]) -> Vec<DailyBar> {
    let mut daily = Vec::new();
    for (i, (&close, &volume)) in closes.iter().zip(volumes).enumerate() {
        let friday = week(i + 1);
        for offset in (0..5).rev() {
            daily.push(DailyBar::new(
                friday - Duration::days(offset),
                close,
                close + 1.0,
                close - 1.0,
                close,
                volume / 5.0,
            ));
        }
    }
    daily
}

/// 50 weeks ending in a stage 2 breakout on twice the average volume.
pub fn breakout_daily() -> Vec<DailyBar> {
    let closes: Vec<f64> = (1..=50usize)
        .map(|w| match w {
            1..=29 => 90.0,
            30 => 100.0,
            31..=49 => 91.0 + 0.4 * (w - 31) as f64,
            _ => 105.0,
        })
        .collect();
    let mut volumes = vec![1000.0; 50];
    volumes[49] = 2.0 * 29.0 * 1000.0 / 28.0;
    daily_sessions(&closes, &volumes)
}

/// 50 quiet weeks with no breakout.
pub fn sideways_daily() -> Vec<DailyBar> {
    daily_sessions(&[50.0; 50], &[1000.0; 50])
}

pub fn flat_daily(weeks: usize, close: f64) -> Vec<DailyBar> {
    daily_sessions(&vec![close; weeks], &vec![1_000_000.0; weeks])
}

pub enum Feed {
    Bars(Vec<DailyBar>),
    Fail(String),
}

/// Price history served from memory. Unknown symbols report no data.
#[derive(Default)]
pub struct InMemoryPrices {
    feeds: HashMap<String, Feed>,
    calls: AtomicUsize,
}

impl InMemoryPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<DailyBar>) -> Self {
        self.feeds.insert(symbol.to_string(), Feed::Bars(bars));
        self
    }

    pub fn with_failure(mut self, symbol: &str, message: &str) -> Self {
        self.feeds
            .insert(symbol.to_string(), Feed::Fail(message.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceHistoryProvider for InMemoryPrices {
    async fn daily_bars(
        &self,
        symbol: &str,
        _start: NaiveDate,
        _end: Option<NaiveDate>,
    ) -> Result<Vec<DailyBar>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.feeds.get(symbol) {
            Some(Feed::Bars(bars)) => Ok(bars.clone()),
            Some(Feed::Fail(message)) => Err(ProviderError::Status {
                status: 503,
                url: message.clone(),
            }),
            None => Err(ProviderError::NoData(symbol.to_string())),
        }
    }
}

/// Market caps served from memory; symbols in `failing` return an error.
#[derive(Default)]
pub struct InMemoryCaps {
    caps: HashMap<String, Option<f64>>,
    failing: Vec<String>,
}

impl InMemoryCaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cap(mut self, symbol: &str, cap: Option<f64>) -> Self {
        self.caps.insert(symbol.to_string(), cap);
        self
    }

    pub fn with_failure(mut self, symbol: &str) -> Self {
        self.failing.push(symbol.to_string());
        self
    }
}

#[async_trait]
impl CapitalizationProvider for InMemoryCaps {
    async fn market_cap(&self, symbol: &str) -> Result<Option<f64>, ProviderError> {
        if self.failing.iter().any(|s| s == symbol) {
            return Err(ProviderError::Parse(format!("no quote for {}", symbol)));
        }
        Ok(self.caps.get(symbol).copied().flatten())
    }
}

/// Yahoo chart payload for `bars`, stamped at the 09:30 New York open.
pub fn chart_json(symbol: &str, bars: &[DailyBar]) -> serde_json::Value {
    let timestamps: Vec<i64> = bars
        .iter()
        .map(|b| b.date.and_hms_opt(14, 30, 0).unwrap().and_utc().timestamp())
        .collect();
    let field = |f: fn(&DailyBar) -> Option<f64>| bars.iter().map(f).collect::<Vec<_>>();

    serde_json::json!({
        "chart": {
            "result": [{
                "meta": { "symbol": symbol, "currency": "USD", "gmtoffset": -18000 },
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open": field(|b| b.open),
                        "high": field(|b| b.high),
                        "low": field(|b| b.low),
                        "close": field(|b| b.close),
                        "volume": field(|b| Some(b.volume)),
                    }]
                }
            }],
            "error": null
        }
    })
}

pub fn chart_error_json(code: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "chart": { "result": null, "error": { "code": code, "description": description } }
    })
}

pub fn quote_json(symbol: &str, market_cap: Option<f64>) -> serde_json::Value {
    serde_json::json!({
        "quoteResponse": {
            "result": [{ "symbol": symbol, "marketCap": market_cap }],
            "error": null
        }
    })
}

pub async fn mock_chart(server: &MockServer, symbol: &str, bars: &[DailyBar]) {
    Mock::given(method("GET"))
        .and(path(format!("/v8/finance/chart/{}", symbol)))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_json(symbol, bars)))
        .mount(server)
        .await;
}

pub async fn mock_quote(server: &MockServer, symbol: &str, market_cap: Option<f64>) {
    Mock::given(method("GET"))
        .and(path("/v7/finance/quote"))
        .and(query_param("symbols", symbol))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_json(symbol, market_cap)))
        .mount(server)
        .await;
}
