//! Trend indicators: weekly SMA and slope

pub mod sma;

pub use sma::*;
