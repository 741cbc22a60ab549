// linkrank-core/src/context.rs
//! Per-document scoring state.
//!
//! A [`ScoringContext`] is created for one document, filled while its
//! mentions are walked, scored, and then consumed into a
//! [`DisambiguationOutcome`]. Nothing in it outlives the document, and two
//! documents never share one.

use std::collections::{BTreeMap, BTreeSet};

use crate::candidate::Candidate;
use crate::fusion::sort_ranked;
use crate::index::ReferenceIndex;
use crate::report::{DisambiguationOutcome, LookupFailure, MentionRanking, ScoredCandidate};

#[derive(Debug, Clone)]
struct TableEntry {
    candidate: Candidate,
    link_ids: BTreeSet<String>,
    mentions: BTreeSet<String>,
}

/// `entity_id -> Candidate`, deduplicated over all mentions of a document.
///
/// When several suggestions resolve to the same entity, the latest candidate
/// replaces the stored one, while the suggestion link ids and the mentions
/// it was suggested for accumulate.
#[derive(Debug, Default, Clone)]
pub struct CandidateTable {
    entries: BTreeMap<String, TableEntry>,
}

impl CandidateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `candidate` as a suggestion for `mention_id`.
    pub fn insert(&mut self, mention_id: &str, candidate: Candidate) {
        let link_id = candidate.link_id.clone();
        let entry = self
            .entries
            .entry(candidate.entity_id().to_string())
            .or_insert_with(|| TableEntry {
                candidate: candidate.clone(),
                link_ids: BTreeSet::new(),
                mentions: BTreeSet::new(),
            });
        entry.candidate = candidate;
        entry.link_ids.insert(link_id);
        entry.mentions.insert(mention_id.to_string());
    }

    pub fn get(&self, entity_id: &str) -> Option<&Candidate> {
        self.entries.get(entity_id).map(|e| &e.candidate)
    }

    pub fn get_mut(&mut self, entity_id: &str) -> Option<&mut Candidate> {
        self.entries.get_mut(entity_id).map(|e| &mut e.candidate)
    }

    pub fn contains(&self, entity_id: &str) -> bool {
        self.entries.contains_key(entity_id)
    }

    /// Every suggestion link id that resolved to `entity_id`.
    pub fn link_ids(&self, entity_id: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(entity_id).map(|e| &e.link_ids)
    }

    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.values().map(|e| &e.candidate)
    }

    pub fn candidates_mut(&mut self) -> impl Iterator<Item = &mut Candidate> {
        self.entries.values_mut().map(|e| &mut e.candidate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

/// Reference index, candidate table and bookkeeping for one document run.
#[derive(Debug, Default)]
pub struct ScoringContext {
    pub index: ReferenceIndex,
    pub table: CandidateTable,
    mention_ids: Vec<String>,
    failures: Vec<LookupFailure>,
}

impl ScoringContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mention so it shows up in the outcome even when none of
    /// its suggestions survive.
    pub fn add_mention(&mut self, mention_id: &str) {
        if !self.mention_ids.iter().any(|m| m == mention_id) {
            self.mention_ids.push(mention_id.to_string());
        }
    }

    pub fn mention_count(&self) -> usize {
        self.mention_ids.len()
    }

    pub fn record_failure(&mut self, failure: LookupFailure) {
        self.failures.push(failure);
    }

    pub fn failures(&self) -> &[LookupFailure] {
        &self.failures
    }

    /// Turns the scored state into rankings, overall and per mention.
    pub fn into_outcome(self) -> DisambiguationOutcome {
        let ScoringContext {
            table,
            mention_ids,
            failures,
            ..
        } = self;

        let mut entries: Vec<TableEntry> = table.entries.into_values().collect();
        sort_ranked(&mut entries, |e| &e.candidate);

        let mentions = mention_ids
            .into_iter()
            .map(|mention_id| {
                let entity_ids = entries
                    .iter()
                    .filter(|e| e.mentions.contains(&mention_id))
                    .map(|e| e.candidate.entity_id().to_string())
                    .collect();
                MentionRanking { mention_id, entity_ids }
            })
            .collect();

        let candidates = entries
            .into_iter()
            .map(|e| ScoredCandidate {
                candidate: e.candidate,
                link_ids: e.link_ids.into_iter().collect(),
            })
            .collect();

        DisambiguationOutcome {
            candidates,
            mentions,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(link: &str, entity: &str, confidence: f64) -> Candidate {
        Candidate::new(link, entity, confidence).unwrap()
    }

    #[test]
    fn test_same_entity_occupies_one_entry() {
        let mut table = CandidateTable::new();
        table.insert("urn:ta:1", candidate("urn:ea:1", "urn:bob", 0.4));
        table.insert("urn:ta:2", candidate("urn:ea:2", "urn:bob", 0.6));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("urn:bob").unwrap().original_confidence, 0.6);
        let links: Vec<&str> = table.link_ids("urn:bob").unwrap().iter().map(String::as_str).collect();
        assert_eq!(links, vec!["urn:ea:1", "urn:ea:2"]);
    }

    #[test]
    fn test_outcome_ranks_per_mention() {
        let mut ctx = ScoringContext::new();
        ctx.add_mention("urn:ta:1");
        ctx.add_mention("urn:ta:2");
        ctx.add_mention("urn:ta:1");

        let mut low = candidate("urn:ea:1", "urn:low", 0.2);
        low.final_confidence = Some(0.1);
        let mut high = candidate("urn:ea:2", "urn:high", 0.2);
        high.final_confidence = Some(0.9);
        let mut other = candidate("urn:ea:3", "urn:other", 0.2);
        other.final_confidence = Some(0.5);
        ctx.table.insert("urn:ta:1", low);
        ctx.table.insert("urn:ta:1", high);
        ctx.table.insert("urn:ta:2", other);

        assert_eq!(ctx.mention_count(), 2);
        let outcome = ctx.into_outcome();
        let overall: Vec<&str> = outcome.candidates.iter().map(|c| c.candidate.entity_id()).collect();
        assert_eq!(overall, vec!["urn:high", "urn:other", "urn:low"]);
        assert_eq!(outcome.mentions[0].entity_ids, vec!["urn:high", "urn:low"]);
        assert_eq!(outcome.mentions[1].entity_ids, vec!["urn:other"]);
    }

    #[test]
    fn test_failures_are_carried_into_the_outcome() {
        let mut ctx = ScoringContext::new();
        ctx.add_mention("m");
        ctx.table.insert("m", candidate("l", "e", 0.1));
        ctx.record_failure(LookupFailure {
            link_id: "l2".into(),
            entity_id: "e2".into(),
            site: None,
            reason: "gone".into(),
        });
        assert_eq!(ctx.failures().len(), 1);

        let outcome = ctx.into_outcome();
        assert_eq!(outcome.failures[0].link_id, "l2");
        assert_eq!(outcome.mentions[0].entity_ids, vec!["e"]);
    }
}
