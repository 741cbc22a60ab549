// linkrank-core/src/relatedness.rs
//! Cross-reference relatedness over a completed reference index.
//!
//! Scoring runs in two passes once every candidate of a document has been
//! indexed:
//!
//! 1. [`tally_link_matches`]: every bucket membership adds one to the
//!    member's `inbound_link_matches`.
//! 2. [`score_relatedness`]: with `L` the number of buckets,
//!    `relatedness = (inbound_link_matches / L) * (outbound_reference_count / L)`,
//!    defined as 0.0 when `L == 0`.

use log::debug;

use crate::config::Weights;
use crate::context::CandidateTable;
use crate::index::ReferenceIndex;

/// Counts, for each candidate in `table`, the buckets it is a member of.
/// Members unknown to the table are skipped.
pub fn tally_link_matches(index: &ReferenceIndex, table: &mut CandidateTable) {
    for (_, members) in index.buckets() {
        for entity_id in members {
            if let Some(candidate) = table.get_mut(entity_id) {
                candidate.increase_link_matches();
            }
        }
    }
}

/// The two-factor relatedness of one candidate.
pub fn relatedness(inbound_link_matches: u32, outbound_reference_count: u32, bucket_count: usize) -> f64 {
    if bucket_count == 0 {
        return 0.0;
    }
    let buckets = bucket_count as f64;
    (f64::from(inbound_link_matches) / buckets) * (f64::from(outbound_reference_count) / buckets)
}

/// Sets `relatedness_score` and `relatedness_confidence` on every candidate.
pub fn score_relatedness(index: &ReferenceIndex, table: &mut CandidateTable, weights: &Weights) {
    let bucket_count = index.bucket_count();
    debug!("Scoring relatedness of {} candidate(s) over {} reference bucket(s)", table.len(), bucket_count);

    for candidate in table.candidates_mut() {
        candidate.relatedness_score = relatedness(
            candidate.inbound_link_matches,
            candidate.outbound_reference_count,
            bucket_count,
        );
        candidate.calculate_relatedness_confidence(weights);
        debug!(
            "Entity '{}': link matches {}, outbound references {}, relatedness {:.4}",
            candidate.entity_id(),
            candidate.inbound_link_matches,
            candidate.outbound_reference_count,
            candidate.relatedness_score
        );
    }
}
