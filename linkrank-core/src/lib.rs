// linkrank-core/src/lib.rs
//! # Linkrank Core Library
//!
//! `linkrank-core` re-ranks the entity suggestions attached to a document.
//! Upstream linkers propose, for every recognized mention, a list of
//! candidate entities with a confidence each. This library looks every
//! candidate up in a knowledge base and combines three signals into a new
//! confidence:
//!
//! 1. the confidence the upstream linker assigned,
//! 2. whether the entity's name literally equals the mention text,
//! 3. how strongly the candidate's entity record references the same things
//!    as the records of the other candidates in the document.
//!
//! ## Modules
//!
//! * `candidate`: The scored [`Candidate`] and its pairwise ranking comparison.
//! * `config`: [`DisambiguationConfig`] loading, merging and the fusion [`Weights`].
//! * `context`: Per-document scoring state ([`ScoringContext`], [`CandidateTable`]).
//! * `document`: Document access traits and the [`ContentItem`] / [`AnnotationGraph`] model.
//! * `engine`: The [`EnhancementEngine`] trait.
//! * `engines`: Concrete engines, currently [`FoafDisambiguationEngine`].
//! * `entity`: Entity records as returned by a knowledge base.
//! * `fusion`, `index`, `name_match`, `relatedness`: The scoring steps.
//! * `knowledge_base`: The [`KnowledgeBase`] trait with in-memory and Entityhub implementations.
//! * `report`: [`DisambiguationOutcome`] and [`EnhancementReport`].
//! * `headless`: One-shot convenience wrapper.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use linkrank_core::{
//!     headless_disambiguate, AnnotationGraph, ContentItem, DisambiguationConfig, EntityAnnotation,
//!     FieldValue, InMemoryKnowledgeBase, Representation, TextAnnotation, FOAF_NAME,
//! };
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. A knowledge base with one entity record.
//!     let kb = InMemoryKnowledgeBase::new().with(
//!         "dbpedia",
//!         Representation::new("http://dbpedia.org/resource/Bob_Marley")
//!             .with(FOAF_NAME, FieldValue::text("Bob Marley@en")),
//!     );
//!
//!     // 2. A document with one mention and one suggestion for it.
//!     let metadata = AnnotationGraph {
//!         text_annotations: vec![TextAnnotation {
//!             id: "urn:ta:1".into(),
//!             selected_texts: vec!["Bob Marley".into()],
//!         }],
//!         entity_annotations: vec![EntityAnnotation {
//!             id: "urn:ea:1".into(),
//!             relations: vec!["urn:ta:1".into()],
//!             entity_reference: Some("http://dbpedia.org/resource/Bob_Marley".into()),
//!             confidence: Some(0.5),
//!             site: Some("dbpedia".into()),
//!             ..Default::default()
//!         }],
//!     };
//!     let item = ContentItem::new("urn:doc:1", Some("Bob Marley sang.".into()), metadata);
//!
//!     // 3. Disambiguate with the default configuration.
//!     let config = DisambiguationConfig::load_default()?;
//!     let report = headless_disambiguate(&config, &item, Arc::new(kb))?;
//!     assert_eq!(report.links_written, 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return either [`LinkrankError`] or `anyhow::Error` with
//! context. A failed entity lookup never fails a run: the affected
//! suggestion is dropped and reported in [`DisambiguationOutcome::failures`].
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod candidate;
pub mod config;
pub mod context;
pub mod document;
pub mod engine;
pub mod engines;
pub mod entity;
pub mod errors;
pub mod fusion;
pub mod headless;
pub mod index;
pub mod knowledge_base;
pub mod name_match;
pub mod relatedness;
pub mod report;
pub mod vocab;

/// Re-exports the configuration types and functions.
pub use config::{
    merge_config,
    DisambiguationConfig,
    FieldConfig,
    WeightConfig,
    Weights,
    DEFAULT_CONFIDENCE_RATIO,
    DEFAULT_DISAMBIGUATION_RATIO,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::LinkrankError;

pub use candidate::Candidate;
pub use context::{CandidateTable, ScoringContext};
pub use index::ReferenceIndex;
pub use name_match::{strip_language_tag, NameMatcher};

/// Re-exports the document model and its access traits.
pub use document::{
    AnnotationGraph,
    ContentItem,
    DocumentAdapter,
    EntityAnnotation,
    Mention,
    SuggestionRecord,
    TextAnnotation,
    WriteBackSink,
};

pub use entity::{EntityRecord, FieldValue, Representation};
pub use knowledge_base::entityhub::EntityhubClient;
pub use knowledge_base::memory::InMemoryKnowledgeBase;
pub use knowledge_base::KnowledgeBase;

/// Re-exports types related to the enhancement engine trait and its implementation.
pub use engine::{CanEnhance, EnhancementEngine};
pub use engines::foaf_engine::FoafDisambiguationEngine;

pub use report::{DisambiguationOutcome, EnhancementReport, LookupFailure, MentionRanking, ScoredCandidate};

/// Re-exports the one-shot, non-interactive entry point.
pub use headless::headless_disambiguate;

pub use vocab::{DEFAULT_ENGINE_NAME, DEFAULT_ORDERING, FOAF_NAME};
