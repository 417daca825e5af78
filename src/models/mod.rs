//! Shared data models spanning the screening layers.

pub mod bars;
pub mod candidate;
pub mod indicators;

pub use bars::{validate_daily_series, DailyBar, WeeklyBar};
pub use candidate::{CandidateRecord, SignalSnapshot};
pub use indicators::{IndicatorRow, RelativeStrength};
