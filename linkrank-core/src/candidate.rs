// linkrank-core/src/candidate.rs
//! The candidate: one entity suggested as the referent of a mention, together
//! with every score accumulated for it while a document is processed.
//!
//! Candidates are identified by their entity: two candidates are equal iff
//! their `entity_id`s are equal, and the ordering (see [`Candidate::compare`])
//! falls through to the `entity_id` on ties so it stays consistent with
//! equality.

use log::{debug, warn};
use serde::Serialize;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::config::Weights;
use crate::document::SuggestionRecord;
use crate::name_match::strip_language_tag;

/// A scored entity suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    /// Identifier of the suggestion record this candidate was read from.
    pub link_id: String,
    entity_id: String,
    /// Knowledge-base partition the entity belongs to.
    pub site: Option<String>,
    /// Confidence assigned upstream (0.0 when the suggestion had none).
    pub original_confidence: f64,
    pub entity_type: Option<String>,
    /// Label as stored on the suggestion, possibly with an `@lang` suffix.
    pub entity_label: Option<String>,
    /// Exact, case-insensitive matches between the entity name and the
    /// mention's surface forms.
    pub name_match_score: f64,
    /// Normalized cross-reference relatedness.
    pub relatedness_score: f64,
    /// Number of reference buckets this candidate appears in.
    pub inbound_link_matches: u32,
    /// Number of outbound references on the entity record.
    pub outbound_reference_count: u32,
    pub name_match_confidence: f64,
    pub relatedness_confidence: f64,
    /// Fused confidence; `None` until fusion has run.
    pub final_confidence: Option<f64>,
}

impl Candidate {
    /// Creates a candidate with default scores. Returns `None` when
    /// `entity_id` is blank.
    pub fn new(link_id: impl Into<String>, entity_id: impl Into<String>, original_confidence: f64) -> Option<Self> {
        let entity_id = entity_id.into();
        if entity_id.trim().is_empty() {
            return None;
        }
        Some(Self {
            link_id: link_id.into(),
            entity_id,
            site: None,
            original_confidence,
            entity_type: None,
            entity_label: None,
            name_match_score: 0.0,
            relatedness_score: 0.0,
            inbound_link_matches: 0,
            outbound_reference_count: 0,
            name_match_confidence: 0.0,
            relatedness_confidence: 0.0,
            final_confidence: None,
        })
    }

    /// Reads a candidate from a raw suggestion record.
    ///
    /// Yields `None` when the record carries no entity reference, which is
    /// expected for links that are not entity suggestions. A missing
    /// confidence defaults to 0.0 with a warning.
    pub fn from_suggestion(record: &SuggestionRecord) -> Option<Self> {
        let entity_id = match record.entity_reference.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                debug!(
                    "Unable to create candidate for suggestion '{}' because it has no entity reference",
                    record.link_id
                );
                return None;
            }
        };

        let original_confidence = record.confidence.unwrap_or_else(|| {
            warn!(
                "Suggestion '{}' does not define a confidence. Will use '0' as fallback",
                record.link_id
            );
            0.0
        });

        let mut candidate = Self::new(record.link_id.clone(), entity_id, original_confidence)?;
        candidate.site = record.site.clone();
        candidate.entity_type = record.entity_type.clone();
        candidate.entity_label = record.entity_label.clone();
        Some(candidate)
    }

    /// Identifier of the suggested entity; never empty.
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// The label without its language suffix.
    pub fn display_label(&self) -> Option<&str> {
        self.entity_label.as_deref().map(strip_language_tag)
    }

    pub fn increase_link_matches(&mut self) {
        self.inbound_link_matches += 1;
    }

    pub fn calculate_name_match_confidence(&mut self, weights: &Weights) {
        self.name_match_confidence = self.name_match_score * weights.disambiguation;
    }

    pub fn calculate_relatedness_confidence(&mut self, weights: &Weights) {
        self.relatedness_confidence = self.relatedness_score * weights.disambiguation;
    }

    /// `original * confidence_weight + name_match_confidence + relatedness_confidence`.
    pub fn calculate_final_confidence(&mut self, weights: &Weights) {
        self.final_confidence = Some(
            self.original_confidence * weights.confidence
                + self.name_match_confidence
                + self.relatedness_confidence,
        );
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.entity_id == other.entity_id
    }
}

impl Eq for Candidate {}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entity_id.hash(state);
    }
}

impl Candidate {
    /// Presentation order of two candidates: highest `final_confidence` first
    /// when both sides are fused, otherwise highest `original_confidence`
    /// first; ties are decided by `entity_id` in ascending order, and
    /// same-entity pairs compare `Equal`.
    ///
    /// This is only transitive over candidates that are all fused or all
    /// unfused, which is why `Candidate` does not implement `Ord`. Sort
    /// collections with [`crate::fusion::sort_ranked`].
    pub fn compare(&self, other: &Self) -> Ordering {
        if self.entity_id == other.entity_id {
            return Ordering::Equal;
        }
        let by_score = match (self.final_confidence, other.final_confidence) {
            (Some(mine), Some(theirs)) => theirs.total_cmp(&mine),
            _ => other.original_confidence.total_cmp(&self.original_confidence),
        };
        by_score.then_with(|| self.entity_id.cmp(&other.entity_id))
    }
}
