//! Provider interfaces the screener consumes.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::bars::DailyBar;
use crate::services::error::ProviderError;

#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Daily sessions for `symbol` between `start` and `end` (today if `None`),
    /// ascending by date. An empty vector means the provider has no data.
    async fn daily_bars(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Vec<DailyBar>, ProviderError>;
}

#[async_trait]
pub trait CapitalizationProvider: Send + Sync {
    /// Market capitalization for `symbol`, `None` when the provider has none.
    async fn market_cap(&self, symbol: &str) -> Result<Option<f64>, ProviderError>;
}

#[async_trait]
pub trait UniverseProvider: Send + Sync {
    /// Symbols to screen, already normalized and de-duplicated.
    async fn symbols(&self) -> Result<Vec<String>, ProviderError>;
}
