//! Yahoo Finance integration

pub mod client;
pub mod provider;

pub use client::{YahooClient, DEFAULT_BASE_URL};
pub use provider::YahooMarketDataProvider;
