//! Volume indicators

pub mod spike;

pub use spike::*;
