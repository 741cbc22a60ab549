// linkrank-core/src/fusion.rs
//! Confidence fusion and presentation order.

use log::debug;
use std::cmp::Ordering;

use crate::candidate::Candidate;
use crate::config::Weights;
use crate::context::CandidateTable;

/// Computes `final_confidence` for every candidate in the table.
///
/// Candidates are independent at this point, so the iteration order does
/// not matter.
pub fn fuse(table: &mut CandidateTable, weights: &Weights) {
    for candidate in table.candidates_mut() {
        candidate.calculate_final_confidence(weights);
    }
}

fn by_original_confidence(a: &Candidate, b: &Candidate) -> Ordering {
    if a.entity_id() == b.entity_id() {
        return Ordering::Equal;
    }
    b.original_confidence
        .total_cmp(&a.original_confidence)
        .then_with(|| a.entity_id().cmp(b.entity_id()))
}

/// Sorts `items` best first.
///
/// When every candidate is fused, [`Candidate::compare`] is used as is. A
/// collection mixing fused and unfused candidates is ranked by
/// `original_confidence` alone, since the pairwise order is not transitive
/// across that mix.
pub fn sort_ranked<T, F>(items: &mut [T], candidate_of: F)
where
    F: Fn(&T) -> &Candidate,
{
    let all_fused = items.iter().all(|item| candidate_of(item).final_confidence.is_some());
    if all_fused {
        items.sort_by(|a, b| candidate_of(a).compare(candidate_of(b)));
    } else {
        debug!("Ranking {} candidate(s) by original confidence; not all are fused", items.len());
        items.sort_by(|a, b| by_original_confidence(candidate_of(a), candidate_of(b)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(entity: &str, original: f64, final_confidence: Option<f64>) -> Candidate {
        let mut c = Candidate::new(format!("l:{}", entity), entity, original).unwrap();
        c.final_confidence = final_confidence;
        c
    }

    fn ids(items: &[Candidate]) -> Vec<&str> {
        items.iter().map(Candidate::entity_id).collect()
    }

    #[test]
    fn test_fuse_sums_weighted_parts() {
        let weights = Weights::default();
        let mut table = CandidateTable::new();
        let mut c = Candidate::new("l", "urn:a", 0.6).unwrap();
        c.name_match_confidence = 0.5;
        c.relatedness_confidence = 0.25;
        table.insert("m", c);

        fuse(&mut table, &weights);

        let fused = table.get("urn:a").unwrap().final_confidence.unwrap();
        assert!((fused - (0.6 * weights.confidence + 0.75)).abs() < 1e-12);
    }

    #[test]
    fn test_fuse_is_idempotent() {
        let weights = Weights::default();
        let mut table = CandidateTable::new();
        table.insert("m", Candidate::new("l", "urn:a", 0.6).unwrap());
        fuse(&mut table, &weights);
        let first = table.get("urn:a").unwrap().final_confidence;
        fuse(&mut table, &weights);
        assert_eq!(table.get("urn:a").unwrap().final_confidence, first);
    }

    #[test]
    fn test_sort_ranked_orders_fused_by_final_confidence() {
        let mut items = vec![
            candidate("urn:a", 0.9, Some(0.3)),
            candidate("urn:b", 0.1, Some(0.8)),
            candidate("urn:c", 0.5, Some(0.8)),
        ];
        sort_ranked(&mut items, |c| c);
        assert_eq!(ids(&items), vec!["urn:b", "urn:c", "urn:a"]);
    }

    #[test]
    fn test_sort_ranked_mixed_fusion_state_is_a_total_order() {
        // Pairwise, these three form a cycle: a < c < b < a.
        let a = candidate("urn:a", 0.1, Some(0.9));
        let b = candidate("urn:b", 0.5, None);
        let c = candidate("urn:c", 0.9, Some(0.2));
        assert_eq!(a.compare(&c), Ordering::Less);
        assert_eq!(c.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Less);

        let mut forward = vec![a.clone(), b.clone(), c.clone()];
        let mut backward = vec![c, b, a];
        sort_ranked(&mut forward, |c| c);
        sort_ranked(&mut backward, |c| c);
        assert_eq!(ids(&forward), vec!["urn:c", "urn:b", "urn:a"]);
        assert_eq!(ids(&forward), ids(&backward));
    }
}
