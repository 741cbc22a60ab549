// linkrank-core/src/knowledge_base/mod.rs
//! Knowledge-base lookup: resolving a candidate's entity record by site and id.
//!
//! The engine only depends on the [`KnowledgeBase`] trait. Two implementations
//! ship with the library:
//!
//! * [`memory::InMemoryKnowledgeBase`]: records loaded up front, e.g. from a JSON file.
//! * [`entityhub::EntityhubClient`]: a blocking HTTP client for a remote Entityhub.
//!
//! Lookups may block on I/O; the scoring code that consumes the records does not.

pub mod entityhub;
pub mod memory;

use crate::entity::EntityRecord;
use crate::errors::LinkrankError;

/// Source of entity records, partitioned into named sites.
pub trait KnowledgeBase: Send + Sync {
    /// Fetches the record of `entity_id` from `site`.
    ///
    /// Any error is local to the one candidate being resolved.
    fn get_entity(&self, site: &str, entity_id: &str) -> Result<Box<dyn EntityRecord>, LinkrankError>;
}
