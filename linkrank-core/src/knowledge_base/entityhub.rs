// linkrank-core/src/knowledge_base/entityhub.rs
//! A [`KnowledgeBase`] backed by a remote Entityhub over HTTP.
//!
//! Entities are dereferenced with
//! `GET {base_url}/entityhub/site/{site}/entity?id={entity_id}` and an
//! `Accept: application/json` header. The response carries the record under
//! `representation`.

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::entity::{EntityRecord, Representation};
use crate::errors::LinkrankError;
use crate::knowledge_base::KnowledgeBase;

#[derive(Debug, Deserialize)]
struct EntityResponse {
    representation: Representation,
}

/// Blocking client for the Entityhub site API.
#[derive(Debug, Clone)]
pub struct EntityhubClient {
    base_url: String,
    client: Client,
}

impl EntityhubClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LinkrankError> {
        let client = Client::builder()
            .user_agent(concat!("linkrank/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Uses a caller-configured `reqwest` client (timeouts, proxies, TLS).
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn entity_url(&self, site: &str) -> String {
        format!("{}/entityhub/site/{}/entity", self.base_url, site)
    }
}

impl KnowledgeBase for EntityhubClient {
    fn get_entity(&self, site: &str, entity_id: &str) -> Result<Box<dyn EntityRecord>, LinkrankError> {
        let url = self.entity_url(site);
        debug!("Dereferencing entity '{}' via {}", entity_id, url);

        let response = self
            .client
            .get(&url)
            .query(&[("id", entity_id)])
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LinkrankError::EntityNotFound {
                site: site.to_string(),
                entity_id: entity_id.to_string(),
            });
        }
        if !status.is_success() {
            return Err(LinkrankError::Lookup {
                site: site.to_string(),
                entity_id: entity_id.to_string(),
                reason: format!("Entityhub answered with HTTP {}", status),
            });
        }

        let body: EntityResponse = response.json()?;
        Ok(Box::new(body.representation))
    }
}
