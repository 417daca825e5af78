//! Candidate table rendering.

pub mod csv;

pub use self::csv::{write_candidates, CANDIDATE_COLUMNS};
