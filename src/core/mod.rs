//! Core application primitives (pipeline, orchestrator, ranking)

pub mod pipeline;
pub mod ranking;
pub mod report;
pub mod screener;

pub use pipeline::*;
pub use ranking::*;
pub use report::*;
pub use screener::*;
