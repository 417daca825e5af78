//! Weekly stage 2 breakout screener.
//!
//! Daily bars are aggregated into weekly bars, rolling trend, volume and
//! relative-strength indicators are derived, and the latest week of every
//! instrument is checked against the stage 2 buy conditions. Passing
//! instruments are ranked by market capitalization.

pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod output;
pub mod services;
pub mod signals;
