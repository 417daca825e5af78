//! Yahoo Finance HTTP client (chart and quote endpoints)

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::models::bars::DailyBar;
use crate::services::error::ProviderError;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    quote_response: QuoteEnvelope,
}

#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(default)]
    result: Vec<QuoteEntry>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteEntry {
    symbol: String,
    market_cap: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct YahooClient {
    base_url: String,
    client: Client,
}

impl YahooClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Daily sessions between `start` and `end` inclusive (up to now if `None`).
    pub async fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Vec<DailyBar>, ProviderError> {
        let period1 = day_start_timestamp(start);
        let period2 = end
            .and_then(|d| d.succ_opt())
            .map(day_start_timestamp)
            .unwrap_or_else(|| Utc::now().timestamp());
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        debug!(symbol = %symbol, period1, period2, "YahooClient: fetching daily chart for {}", symbol);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        // Yahoo reports unknown symbols as 404 with a chart error body.
        if !status.is_success() && !body.contains("\"chart\"") {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url,
            });
        }

        parse_chart(symbol, &body)
    }

    /// Market capitalization from the quote endpoint.
    pub async fn fetch_market_cap(&self, symbol: &str) -> Result<Option<f64>, ProviderError> {
        let url = format!("{}/v7/finance/quote", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbols", symbol)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        parse_market_cap(symbol, &body)
    }
}

fn day_start_timestamp(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

fn parse_chart(symbol: &str, body: &str) -> Result<Vec<DailyBar>, ProviderError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    if let Some(error) = response.chart.error {
        return Err(ProviderError::Api {
            code: error.code,
            description: error.description,
        });
    }

    let data = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| ProviderError::NoData(symbol.to_string()))?;

    let quotes = data.indicators.quote.into_iter().next().unwrap_or_default();
    let offset = data.meta.gmtoffset;

    let mut bars = Vec::with_capacity(data.timestamp.len());
    for (i, ts) in data.timestamp.iter().enumerate() {
        let date = DateTime::from_timestamp(ts + offset, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| ProviderError::Parse(format!("timestamp {} out of range", ts)))?;

        bars.push(DailyBar::partial(
            date,
            value_at(&quotes.open, i),
            value_at(&quotes.high, i),
            value_at(&quotes.low, i),
            value_at(&quotes.close, i),
            value_at(&quotes.volume, i).unwrap_or(0.0),
        ));
    }

    Ok(bars)
}

fn value_at(series: &[Option<f64>], i: usize) -> Option<f64> {
    series.get(i).copied().flatten()
}

fn parse_market_cap(symbol: &str, body: &str) -> Result<Option<f64>, ProviderError> {
    let response: QuoteResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    if let Some(error) = response.quote_response.error {
        return Err(ProviderError::Api {
            code: error.code,
            description: error.description,
        });
    }

    Ok(response
        .quote_response
        .result
        .into_iter()
        .find(|entry| entry.symbol.eq_ignore_ascii_case(symbol))
        .and_then(|entry| entry.market_cap))
}
