//! Candidate table CSV writer

use std::fs;
use std::path::Path;

use crate::models::candidate::CandidateRecord;

pub const CANDIDATE_COLUMNS: [&str; 12] = [
    "symbol",
    "week_end",
    "close",
    "prior_high",
    "trend_average",
    "trend_slope",
    "volume",
    "average_volume",
    "volume_spike",
    "relative_strength",
    "rs_slope",
    "market_cap",
];

/// Write the ranked candidates to `path`, header first.
///
/// The header is written even when there are no candidates. Unknown values
/// are left as empty cells.
pub fn write_candidates(path: &Path, candidates: &[CandidateRecord]) -> Result<(), csv::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(CANDIDATE_COLUMNS)?;
    for candidate in candidates {
        writer.serialize(candidate)?;
    }
    writer.flush()?;
    Ok(())
}
