//! Weekly indicator pipeline: aggregation, rolling trend/volume indicators
//! and relative strength.

pub mod engine;
pub mod relative_strength;
pub mod rolling;
pub mod trend;
pub mod volume;
pub mod weekly;

pub use engine::{compute, IndicatorParams};
pub use relative_strength::{align_benchmark, relative_strength};
pub use weekly::{aggregate, week_ending};
