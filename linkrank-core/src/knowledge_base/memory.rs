//! An in-memory knowledge base, typically loaded from a JSON file of the form
//! `{ "sites": { "<site>": [ <representation>, ... ] } }`.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::entity::{EntityRecord, Representation};
use crate::errors::LinkrankError;
use crate::knowledge_base::KnowledgeBase;

#[derive(Debug, Default, Serialize, Deserialize)]
struct KnowledgeBaseFile {
    #[serde(default)]
    sites: HashMap<String, Vec<Representation>>,
}

/// Entity records held in memory, keyed by site and entity id.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKnowledgeBase {
    sites: HashMap<String, HashMap<String, Representation>>,
}

impl InMemoryKnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every site and record from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading knowledge base from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read knowledge base file {}", path.display()))?;
        let file: KnowledgeBaseFile = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse knowledge base file {}", path.display()))?;

        let mut kb = Self::new();
        for (site, records) in file.sites {
            for record in records {
                kb.insert(&site, record);
            }
        }
        info!(
            "Loaded {} entities across {} sites from {}.",
            kb.len(),
            kb.sites.len(),
            path.display()
        );
        Ok(kb)
    }

    /// Adds or replaces a record on `site`, creating the site if needed.
    pub fn insert(&mut self, site: &str, record: Representation) {
        self.sites
            .entry(site.to_string())
            .or_default()
            .insert(record.id.clone(), record);
    }

    /// Builder-style variant of [`InMemoryKnowledgeBase::insert`].
    pub fn with(mut self, site: &str, record: Representation) -> Self {
        self.insert(site, record);
        self
    }

    /// Total number of records over all sites.
    pub fn len(&self) -> usize {
        self.sites.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KnowledgeBase for InMemoryKnowledgeBase {
    fn get_entity(&self, site: &str, entity_id: &str) -> Result<Box<dyn EntityRecord>, LinkrankError> {
        let records = self
            .sites
            .get(site)
            .ok_or_else(|| LinkrankError::SiteNotFound(site.to_string()))?;
        let record = records
            .get(entity_id)
            .ok_or_else(|| LinkrankError::EntityNotFound {
                site: site.to_string(),
                entity_id: entity_id.to_string(),
            })?;
        debug!("Resolved entity '{}' on site '{}' from memory.", entity_id, site);
        Ok(Box::new(record.clone()))
    }
}
