//! Market data, capitalization and universe providers.

pub mod error;
pub mod market_data;
pub mod universe;
pub mod yahoo;

pub use error::ProviderError;
pub use market_data::{CapitalizationProvider, PriceHistoryProvider, UniverseProvider};
pub use universe::{normalize_symbol, normalize_symbols, FileUniverse, StaticUniverse};
pub use yahoo::{YahooClient, YahooMarketDataProvider};
