//! Candidate table ordering

use std::cmp::Ordering;

use crate::models::candidate::CandidateRecord;

/// Market cap descending, unknown caps last, ties by symbol ascending.
pub fn compare_candidates(a: &CandidateRecord, b: &CandidateRecord) -> Ordering {
    let by_cap = match (known_cap(a), known_cap(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_cap.then_with(|| a.symbol.cmp(&b.symbol))
}

pub fn rank_candidates(candidates: &mut [CandidateRecord]) {
    candidates.sort_by(compare_candidates);
}

fn known_cap(record: &CandidateRecord) -> Option<f64> {
    record.market_cap.filter(|cap| cap.is_finite())
}
