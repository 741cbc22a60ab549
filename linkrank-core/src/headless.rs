// linkrank-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for running the disambiguation engine in headless
//! mode (non-UI): one call, one content item.

use anyhow::Result;
use std::sync::Arc;

use crate::config::DisambiguationConfig;
use crate::document::ContentItem;
use crate::engine::EnhancementEngine;
use crate::engines::foaf_engine::FoafDisambiguationEngine;
use crate::knowledge_base::KnowledgeBase;
use crate::report::EnhancementReport;

/// Builds an engine from `config` and runs it once over `item`.
///
/// # Arguments
///
/// * `config` - The merged configuration (defaults + optional user overrides).
/// * `item` - The content item; its metadata is updated in place.
/// * `knowledge_base` - Where entity records are looked up.
pub fn headless_disambiguate(
    config: &DisambiguationConfig,
    item: &ContentItem,
    knowledge_base: Arc<dyn KnowledgeBase>,
) -> Result<EnhancementReport> {
    let engine = FoafDisambiguationEngine::new(config, knowledge_base)?;
    engine.compute_enhancements(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{AnnotationGraph, EntityAnnotation, TextAnnotation};
    use crate::entity::{FieldValue, Representation};
    use crate::knowledge_base::memory::InMemoryKnowledgeBase;
    use crate::vocab::FOAF_NAME;

    #[test]
    fn test_headless_disambiguate_updates_item() -> Result<()> {
        let kb = InMemoryKnowledgeBase::new().with(
            "dbpedia",
            Representation::new("urn:paris").with(FOAF_NAME, FieldValue::text("Paris@en")),
        );
        let graph = AnnotationGraph {
            text_annotations: vec![TextAnnotation {
                id: "urn:ta:1".into(),
                selected_texts: vec!["Paris".into()],
            }],
            entity_annotations: vec![EntityAnnotation {
                id: "urn:ea:1".into(),
                relations: vec!["urn:ta:1".into()],
                entity_reference: Some("urn:paris".into()),
                confidence: Some(0.3),
                site: Some("dbpedia".into()),
                ..Default::default()
            }],
        };
        let item = ContentItem::new("urn:doc", Some("Paris in spring".into()), graph);

        let config = DisambiguationConfig::load_default()?;
        let report = headless_disambiguate(&config, &item, Arc::new(kb))?;

        assert_eq!(report.links_written, 1);
        let metadata = item.read_metadata()?;
        let ea = metadata.entity_annotation("urn:ea:1").unwrap();
        // 0.3 * 1/3 + 1 * 2/3
        assert!((ea.confidence.unwrap() - (0.1 + 2.0 / 3.0)).abs() < 1e-12);
        assert_eq!(ea.contributors, vec!["disambiguation-foaf".to_string()]);
        Ok(())
    }

    #[test]
    fn test_headless_skips_item_without_text() -> Result<()> {
        let item = ContentItem::new("urn:empty", None, AnnotationGraph::default());
        let config = DisambiguationConfig::load_default()?;
        let report = headless_disambiguate(&config, &item, Arc::new(InMemoryKnowledgeBase::new()))?;
        assert_eq!(report.links_written, 0);
        assert_eq!(report.mention_count, 0);
        Ok(())
    }
}
