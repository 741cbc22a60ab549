// linkrank-core/src/index.rs
//! The document-scoped reference index.
//!
//! Every outbound reference found on a candidate's entity record opens (or
//! joins) a bucket keyed by the referenced identifier. A bucket holds the
//! entity ids of all candidates whose record cites that identifier, so its
//! size tells how many candidates of the document are linked to the same
//! thing.

use log::debug;
use std::collections::{BTreeMap, BTreeSet};

use crate::candidate::Candidate;
use crate::entity::EntityRecord;

/// `reference_id -> {entity_id}` for one document.
#[derive(Debug, Default, Clone)]
pub struct ReferenceIndex {
    buckets: BTreeMap<String, BTreeSet<String>>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files the candidate under every reference of `record` and sets its
    /// `outbound_reference_count` to the number of references seen.
    ///
    /// Each reference value counts, including repeats across fields; bucket
    /// membership is a set, so repeats never add the candidate twice.
    pub fn record_references(&mut self, candidate: &mut Candidate, record: &dyn EntityRecord) {
        let mut outbound = 0u32;
        for field in record.list_fields() {
            for reference in record.get_all_references(field) {
                outbound += 1;
                self.buckets
                    .entry(reference.to_string())
                    .or_default()
                    .insert(candidate.entity_id().to_string());
            }
        }
        debug!(
            "Entity '{}' carries {} outbound reference(s); index now has {} bucket(s)",
            candidate.entity_id(),
            outbound,
            self.buckets.len()
        );
        candidate.outbound_reference_count = outbound;
    }

    /// Number of distinct referenced identifiers.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Entity ids citing `reference`.
    pub fn bucket(&self, reference: &str) -> Option<&BTreeSet<String>> {
        self.buckets.get(reference)
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.buckets.iter().map(|(reference, members)| (reference.as_str(), members))
    }
}
