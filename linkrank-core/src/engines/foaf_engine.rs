// linkrank-core/src/engines/foaf_engine.rs
//! An `EnhancementEngine` implementation that re-ranks entity suggestions
//! by name agreement and by how strongly candidates of the same document
//! reference each other.
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::sync::Arc;

use crate::candidate::Candidate;
use crate::config::{DisambiguationConfig, Weights};
use crate::context::ScoringContext;
use crate::document::{ContentItem, DocumentAdapter, Mention, WriteBackSink};
use crate::engine::{CanEnhance, EnhancementEngine};
use crate::entity::EntityRecord;
use crate::errors::LinkrankError;
use crate::fusion::fuse;
use crate::knowledge_base::KnowledgeBase;
use crate::name_match::NameMatcher;
use crate::relatedness::{score_relatedness, tally_link_matches};
use crate::report::{DisambiguationOutcome, EnhancementReport, LookupFailure};

/// How often scoring is restarted when the metadata changes between the
/// snapshot and the write-back.
const MAX_SCORING_ATTEMPTS: usize = 3;

/// Re-scores the entity suggestions of a document.
///
/// The engine holds only configuration and the knowledge base handle; every
/// call builds its own [`ScoringContext`], so one instance can serve any
/// number of documents concurrently.
pub struct FoafDisambiguationEngine {
    name: String,
    ordering: i32,
    weights: Weights,
    name_matcher: NameMatcher,
    knowledge_base: Arc<dyn KnowledgeBase>,
}

impl std::fmt::Debug for FoafDisambiguationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoafDisambiguationEngine")
            .field("name", &self.name)
            .field("ordering", &self.ordering)
            .field("weights", &self.weights)
            .field("name_matcher", &self.name_matcher)
            .finish_non_exhaustive()
    }
}

impl FoafDisambiguationEngine {
    pub fn new(config: &DisambiguationConfig, knowledge_base: Arc<dyn KnowledgeBase>) -> Result<Self> {
        config
            .validate()
            .context("Refusing to build the disambiguation engine from an invalid configuration")?;
        let weights = config.weights()?;
        debug!(
            "Engine '{}' uses weights disambiguation={:.4}, confidence={:.4}",
            config.engine_name(),
            weights.disambiguation,
            weights.confidence
        );
        Ok(Self {
            name: config.engine_name().to_string(),
            ordering: config.ordering(),
            weights,
            name_matcher: NameMatcher::new(config.name_field()),
            knowledge_base,
        })
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Scores every suggestion of `document` and returns the ranked result.
    ///
    /// A suggestion whose entity cannot be looked up is left out and listed
    /// in [`DisambiguationOutcome::failures`]; the rest of the document is
    /// still processed. Any other error aborts the run.
    pub fn disambiguate(&self, document: &dyn DocumentAdapter) -> Result<DisambiguationOutcome, LinkrankError> {
        let mut ctx = ScoringContext::new();

        for mention in document.mentions() {
            ctx.add_mention(&mention.id);
            for suggestion in document.suggestions_for(&mention) {
                let Some(candidate) = Candidate::from_suggestion(&suggestion) else {
                    continue;
                };
                self.collect_candidate(&mut ctx, &mention, candidate)?;
            }
        }

        tally_link_matches(&ctx.index, &mut ctx.table);
        score_relatedness(&ctx.index, &mut ctx.table, &self.weights);
        fuse(&mut ctx.table, &self.weights);

        info!(
            "Disambiguated {} mention(s): {} candidate(s), {} reference bucket(s), {} failed lookup(s)",
            ctx.mention_count(),
            ctx.table.len(),
            ctx.index.bucket_count(),
            ctx.failures().len()
        );
        Ok(ctx.into_outcome())
    }

    fn collect_candidate(
        &self,
        ctx: &mut ScoringContext,
        mention: &Mention,
        mut candidate: Candidate,
    ) -> Result<(), LinkrankError> {
        let record = match self.lookup(&candidate) {
            Ok(record) => record,
            Err(e) if e.is_lookup_failure() => {
                error!(
                    "Unable to dereference entity '{}' of suggestion '{}': {}",
                    candidate.entity_id(),
                    candidate.link_id,
                    e
                );
                ctx.record_failure(LookupFailure {
                    link_id: candidate.link_id.clone(),
                    entity_id: candidate.entity_id().to_string(),
                    site: candidate.site.clone(),
                    reason: e.to_string(),
                });
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        ctx.index.record_references(&mut candidate, record.as_ref());
        self.name_matcher
            .score(&mut candidate, record.as_ref(), &mention.surface_forms, &self.weights);

        if ctx.table.contains(candidate.entity_id()) {
            debug!(
                "Entity '{}' was already suggested; suggestion '{}' replaces the earlier scores",
                candidate.entity_id(),
                candidate.link_id
            );
        }
        ctx.table.insert(&mention.id, candidate);
        Ok(())
    }

    fn lookup(&self, candidate: &Candidate) -> Result<Box<dyn EntityRecord>, LinkrankError> {
        let site = candidate
            .site
            .as_deref()
            .ok_or_else(|| LinkrankError::MissingSite(candidate.entity_id().to_string()))?;
        self.knowledge_base.get_entity(site, candidate.entity_id())
    }

    /// Writes every fused confidence back to its suggestion links and marks
    /// this engine as a contributor. Returns the number of links written.
    pub fn apply_results(
        &self,
        outcome: &DisambiguationOutcome,
        sink: &mut dyn WriteBackSink,
    ) -> Result<usize, LinkrankError> {
        let mut written = 0;
        for scored in &outcome.candidates {
            let Some(confidence) = scored.candidate.final_confidence else {
                warn!(
                    "Entity '{}' has no fused confidence; leaving its suggestions unchanged",
                    scored.candidate.entity_id()
                );
                continue;
            };
            for link_id in &scored.link_ids {
                sink.set_confidence(link_id, confidence)?;
                sink.record_contributing_engine(link_id, &self.name)?;
                written += 1;
            }
        }
        debug!("Wrote {} fused confidence(s)", written);
        Ok(written)
    }
}

impl EnhancementEngine for FoafDisambiguationEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn ordering(&self) -> i32 {
        self.ordering
    }

    fn can_enhance(&self, item: &ContentItem) -> CanEnhance {
        match item.text() {
            Some(text) if !text.trim().is_empty() => CanEnhance::Synchronous,
            _ => CanEnhance::CannotEnhance,
        }
    }

    /// Scores a snapshot of the metadata without holding its lock, then
    /// writes back under the write lock only if the metadata still equals
    /// that snapshot. A concurrent change restarts scoring; after
    /// `MAX_SCORING_ATTEMPTS` changed snapshots the call fails with
    /// [`LinkrankError::ConcurrentModification`] and nothing is written.
    fn compute_enhancements(&self, item: &ContentItem) -> Result<EnhancementReport> {
        if !self.can_enhance(item).is_enhanceable() {
            info!("Content item '{}' has no text; nothing to disambiguate", item.uri());
            return Ok(EnhancementReport::skipped(item.uri(), &self.name));
        }

        for attempt in 1..=MAX_SCORING_ATTEMPTS {
            let snapshot = item.read_metadata()?.clone();
            let outcome = self
                .disambiguate(&snapshot)
                .with_context(|| format!("Disambiguation of '{}' failed", item.uri()))?;

            let mut metadata = item.write_metadata()?;
            if *metadata != snapshot {
                warn!(
                    "Metadata of '{}' changed while it was being scored (attempt {}/{})",
                    item.uri(),
                    attempt,
                    MAX_SCORING_ATTEMPTS
                );
                continue;
            }
            let written = self
                .apply_results(&outcome, &mut *metadata)
                .with_context(|| format!("Failed to write results back to '{}'", item.uri()))?;
            return Ok(EnhancementReport::new(item.uri(), &self.name, outcome, written));
        }

        Err(LinkrankError::ConcurrentModification(item.uri().to_string()).into())
    }
}
