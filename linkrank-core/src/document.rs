// linkrank-core/src/document.rs
//! Documents: where mentions and suggestions come from and where fused
//! confidences go back to.
//!
//! The engine talks to documents through two traits:
//!
//! * [`DocumentAdapter`] (in): yields mentions and, per mention, the raw
//!   suggestion records related to it.
//! * [`WriteBackSink`] (out): receives the fused confidence of each
//!   suggestion and the identity of the engine that produced it.
//!
//! [`AnnotationGraph`] implements both over a plain list of text and entity
//! annotations, and [`ContentItem`] wraps one behind a `RwLock` together with
//! the document's text, which is the unit the engine processes.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::errors::LinkrankError;

/// A recognized span of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub id: String,
    /// The literal text(s) of the span, compared against entity names.
    pub surface_forms: Vec<String>,
}

/// A suggestion record exactly as it appears in the document, before it is
/// resolved into a [`crate::Candidate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionRecord {
    pub link_id: String,
    pub entity_reference: Option<String>,
    pub confidence: Option<f64>,
    pub site: Option<String>,
    pub entity_type: Option<String>,
    pub entity_label: Option<String>,
}

/// Pull-based access to a document's mentions and suggestions.
pub trait DocumentAdapter {
    fn mentions(&self) -> Vec<Mention>;

    /// Raw suggestion records related to `mention`; records that are not
    /// entity suggestions may be included and are skipped by the engine.
    fn suggestions_for(&self, mention: &Mention) -> Vec<SuggestionRecord>;
}

/// Destination of the disambiguation results.
pub trait WriteBackSink {
    fn set_confidence(&mut self, link_id: &str, value: f64) -> Result<(), LinkrankError>;

    fn record_contributing_engine(&mut self, link_id: &str, engine: &str) -> Result<(), LinkrankError>;
}

/// A recognized text span (mention) in serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub id: String,
    #[serde(default)]
    pub selected_texts: Vec<String>,
}

/// A suggestion link in serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityAnnotation {
    pub id: String,
    /// Ids of the text annotations this suggestion relates to.
    #[serde(default)]
    pub relations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_label: Option<String>,
    /// Engines that contributed to this annotation.
    #[serde(default)]
    pub contributors: Vec<String>,
}

impl EntityAnnotation {
    fn to_suggestion(&self) -> SuggestionRecord {
        SuggestionRecord {
            link_id: self.id.clone(),
            entity_reference: self.entity_reference.clone(),
            confidence: self.confidence,
            site: self.site.clone(),
            entity_type: self.entity_type.clone(),
            entity_label: self.entity_label.clone(),
        }
    }
}

/// The metadata of a document: its mentions and suggestion links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationGraph {
    #[serde(default)]
    pub text_annotations: Vec<TextAnnotation>,
    #[serde(default)]
    pub entity_annotations: Vec<EntityAnnotation>,
}

impl AnnotationGraph {
    pub fn entity_annotation(&self, id: &str) -> Option<&EntityAnnotation> {
        self.entity_annotations.iter().find(|ea| ea.id == id)
    }

    fn entity_annotation_mut(&mut self, id: &str) -> Result<&mut EntityAnnotation, LinkrankError> {
        self.entity_annotations
            .iter_mut()
            .find(|ea| ea.id == id)
            .ok_or_else(|| LinkrankError::UnknownLink(id.to_string()))
    }
}

impl DocumentAdapter for AnnotationGraph {
    fn mentions(&self) -> Vec<Mention> {
        self.text_annotations
            .iter()
            .map(|ta| Mention {
                id: ta.id.clone(),
                surface_forms: ta.selected_texts.clone(),
            })
            .collect()
    }

    fn suggestions_for(&self, mention: &Mention) -> Vec<SuggestionRecord> {
        self.entity_annotations
            .iter()
            .filter(|ea| ea.relations.iter().any(|r| r == &mention.id))
            .map(EntityAnnotation::to_suggestion)
            .collect()
    }
}

impl WriteBackSink for AnnotationGraph {
    fn set_confidence(&mut self, link_id: &str, value: f64) -> Result<(), LinkrankError> {
        self.entity_annotation_mut(link_id)?.confidence = Some(value);
        Ok(())
    }

    fn record_contributing_engine(&mut self, link_id: &str, engine: &str) -> Result<(), LinkrankError> {
        let annotation = self.entity_annotation_mut(link_id)?;
        if !annotation.contributors.iter().any(|c| c == engine) {
            annotation.contributors.push(engine.to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentItemFile {
    uri: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    metadata: AnnotationGraph,
}

/// A document: its text plus lock-protected metadata shared with other
/// engines of a host pipeline.
#[derive(Debug)]
pub struct ContentItem {
    uri: String,
    text: Option<String>,
    metadata: RwLock<AnnotationGraph>,
}

impl ContentItem {
    pub fn new(uri: impl Into<String>, text: Option<String>, metadata: AnnotationGraph) -> Self {
        Self {
            uri: uri.into(),
            text,
            metadata: RwLock::new(metadata),
        }
    }

    /// Reads a content item from its JSON form:
    /// `{ "uri": ..., "text": ..., "metadata": { "text_annotations": [...], "entity_annotations": [...] } }`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading content item from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document file {}", path.display()))?;
        let file: ContentItemFile = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse document file {}", path.display()))?;
        debug!(
            "Content item '{}' has {} text and {} entity annotations",
            file.uri,
            file.metadata.text_annotations.len(),
            file.metadata.entity_annotations.len()
        );
        Ok(Self::new(file.uri, file.text, file.metadata))
    }

    /// Writes the content item, including its current metadata, as JSON.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = ContentItemFile {
            uri: self.uri.clone(),
            text: self.text.clone(),
            metadata: self.read_metadata()?.clone(),
        };
        let json = serde_json::to_string_pretty(&file).context("Failed to serialize content item")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write document file {}", path.display()))?;
        info!("Wrote content item '{}' to {}", self.uri, path.display());
        Ok(())
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Shared access to the metadata.
    pub fn read_metadata(&self) -> Result<RwLockReadGuard<'_, AnnotationGraph>, LinkrankError> {
        self.metadata
            .read()
            .map_err(|_| LinkrankError::LockPoisoned(self.uri.clone()))
    }

    /// Exclusive access to the metadata; released when the guard drops.
    pub fn write_metadata(&self) -> Result<RwLockWriteGuard<'_, AnnotationGraph>, LinkrankError> {
        self.metadata
            .write()
            .map_err(|_| LinkrankError::LockPoisoned(self.uri.clone()))
    }
}
