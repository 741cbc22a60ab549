// linkrank-core/src/report.rs
//! Data structures describing the result of a disambiguation run.
//!
//! [`DisambiguationOutcome`] is what scoring produces for one document and
//! what write-back consumes. [`EnhancementReport`] wraps it with run
//! metadata for callers that process whole content items.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::candidate::Candidate;

/// A suggestion that was dropped because its entity could not be looked up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupFailure {
    pub link_id: String,
    pub entity_id: String,
    pub site: Option<String>,
    pub reason: String,
}

/// Entity ids of one mention's candidates, best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentionRanking {
    pub mention_id: String,
    pub entity_ids: Vec<String>,
}

/// A fully scored candidate and every suggestion link that resolved to it.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub link_ids: Vec<String>,
}

/// Scored candidates of one document, in presentation order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisambiguationOutcome {
    /// All candidates, best first.
    pub candidates: Vec<ScoredCandidate>,
    /// One entry per mention, in document order.
    pub mentions: Vec<MentionRanking>,
    pub failures: Vec<LookupFailure>,
}

impl DisambiguationOutcome {
    pub fn candidate(&self, entity_id: &str) -> Option<&Candidate> {
        self.candidates
            .iter()
            .map(|sc| &sc.candidate)
            .find(|c| c.entity_id() == entity_id)
    }

    /// The candidates suggested for `mention_id`, best first. Empty for an
    /// unknown mention.
    pub fn ranking_for(&self, mention_id: &str) -> Vec<&Candidate> {
        self.mentions
            .iter()
            .find(|m| m.mention_id == mention_id)
            .map(|m| m.entity_ids.iter().filter_map(|id| self.candidate(id)).collect())
            .unwrap_or_default()
    }

    /// Total number of suggestion links that receive a confidence.
    pub fn link_count(&self) -> usize {
        self.candidates.iter().map(|sc| sc.link_ids.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Run metadata plus outcome of processing one content item.
#[derive(Debug, Clone, Serialize)]
pub struct EnhancementReport {
    pub run_id: String,
    pub content_uri: String,
    pub engine: String,
    /// RFC 3339 timestamp taken when the report was built.
    pub processed_at: String,
    pub mention_count: usize,
    pub links_written: usize,
    #[serde(flatten)]
    pub outcome: DisambiguationOutcome,
}

impl EnhancementReport {
    pub fn new(
        content_uri: impl Into<String>,
        engine: impl Into<String>,
        outcome: DisambiguationOutcome,
        links_written: usize,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            content_uri: content_uri.into(),
            engine: engine.into(),
            processed_at: Utc::now().to_rfc3339(),
            mention_count: outcome.mentions.len(),
            links_written,
            outcome,
        }
    }

    /// A report for a content item the engine did not touch.
    pub fn skipped(content_uri: impl Into<String>, engine: impl Into<String>) -> Self {
        Self::new(content_uri, engine, DisambiguationOutcome::default(), 0)
    }

    pub fn failures(&self) -> &[LookupFailure] {
        &self.outcome.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(entity: &str, links: &[&str], fused: f64) -> ScoredCandidate {
        let mut candidate = Candidate::new(links[0], entity, 0.5).unwrap();
        candidate.final_confidence = Some(fused);
        ScoredCandidate {
            candidate,
            link_ids: links.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn outcome() -> DisambiguationOutcome {
        DisambiguationOutcome {
            candidates: vec![scored("urn:a", &["l1", "l3"], 0.9), scored("urn:b", &["l2"], 0.4)],
            mentions: vec![
                MentionRanking {
                    mention_id: "m1".into(),
                    entity_ids: vec!["urn:a".into(), "urn:b".into()],
                },
                MentionRanking {
                    mention_id: "m2".into(),
                    entity_ids: vec!["urn:a".into()],
                },
            ],
            failures: vec![],
        }
    }

    #[test]
    fn test_ranking_for_mention() {
        let outcome = outcome();
        let ids: Vec<&str> = outcome.ranking_for("m1").iter().map(|c| c.entity_id()).collect();
        assert_eq!(ids, vec!["urn:a", "urn:b"]);
        assert_eq!(outcome.ranking_for("m2").len(), 1);
        assert!(outcome.ranking_for("nope").is_empty());
        assert_eq!(outcome.link_count(), 3);
    }

    #[test]
    fn test_report_metadata() {
        let report = EnhancementReport::new("urn:doc", "disambiguation-foaf", outcome(), 3);
        assert_eq!(report.mention_count, 2);
        assert!(Uuid::parse_str(&report.run_id).is_ok());
        assert!(chrono::DateTime::parse_from_rfc3339(&report.processed_at).is_ok());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["content_uri"], "urn:doc");
        assert_eq!(json["candidates"][0]["entity_id"], "urn:a");
        assert_eq!(json["candidates"][0]["link_ids"][1], "l3");
    }
}
