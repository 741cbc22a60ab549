//! errors.rs - Custom error types for the linkrank-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//! Knowledge-base failures in particular are matched on by the engine so that
//! a single failed lookup only removes one candidate from a run.
//!
//! License: MIT OR Apache-2.0

use thiserror::Error;

/// This enum represents all possible error types in the `linkrank-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LinkrankError {
    #[error("Knowledge base site '{0}' is not known")]
    SiteNotFound(String),

    #[error("Entity '{entity_id}' was not found on site '{site}'")]
    EntityNotFound { site: String, entity_id: String },

    #[error("Entity '{0}' has no site to look it up on")]
    MissingSite(String),

    #[error("Lookup of entity '{entity_id}' on site '{site}' failed: {reason}")]
    Lookup {
        site: String,
        entity_id: String,
        reason: String,
    },

    #[error("HTTP request to the knowledge base failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Suggestion link '{0}' does not exist in the document metadata")]
    UnknownLink(String),

    #[error("Metadata of '{0}' kept changing while it was being scored")]
    ConcurrentModification(String),

    #[error("Lock on '{0}' was poisoned by a panicking writer")]
    LockPoisoned(String),

    #[error("Invalid weight ratios: {0}")]
    InvalidWeights(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to (de)serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to (de)serialize YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}

impl LinkrankError {
    /// True for the failures that come from resolving an entity record, as
    /// opposed to failures of the document or of the engine itself.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            LinkrankError::SiteNotFound(_)
                | LinkrankError::EntityNotFound { .. }
                | LinkrankError::MissingSite(_)
                | LinkrankError::Lookup { .. }
                | LinkrankError::Http(_)
        )
    }
}
