//! Yahoo-backed price history and capitalization provider

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::NaiveDate;
use std::time::Duration;
use tracing::warn;

use super::client::YahooClient;
use crate::models::bars::DailyBar;
use crate::services::error::ProviderError;
use crate::services::market_data::{CapitalizationProvider, PriceHistoryProvider};

pub struct YahooMarketDataProvider {
    client: YahooClient,
    max_retries: usize,
    min_delay: Duration,
}

impl YahooMarketDataProvider {
    pub fn new(client: YahooClient) -> Self {
        Self {
            client,
            max_retries: 3,
            min_delay: Duration::from_millis(500),
        }
    }

    pub fn with_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    pub fn client(&self) -> &YahooClient {
        &self.client
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_times(self.max_retries)
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooMarketDataProvider {
    async fn daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Vec<DailyBar>, ProviderError> {
        (|| async { self.client.fetch_daily(symbol, start, end).await })
            .retry(self.backoff())
            .when(ProviderError::is_transient)
            .notify(|err: &ProviderError, delay: Duration| {
                warn!(
                    symbol = %symbol,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "YahooMarketDataProvider: retrying daily fetch for {} in {:?}",
                    symbol,
                    delay
                );
            })
            .await
    }
}

#[async_trait]
impl CapitalizationProvider for YahooMarketDataProvider {
    async fn market_cap(&self, symbol: &str) -> Result<Option<f64>, ProviderError> {
        (|| async { self.client.fetch_market_cap(symbol).await })
            .retry(self.backoff())
            .when(ProviderError::is_transient)
            .await
    }
}
