// linkrank-core/src/engine.rs
//! Defines the core EnhancementEngine trait and related data structures.
//!
//! An enhancement engine is one step of a content-processing pipeline: it is
//! handed a [`ContentItem`], decides whether it has anything to contribute,
//! and, if so, reads and updates the item's metadata. Hosts order engines by
//! [`EnhancementEngine::ordering`] (higher runs first), so post-processing
//! engines such as the disambiguation engine carry negative values.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;

use crate::document::ContentItem;
use crate::report::EnhancementReport;

/// Whether (and how) an engine wants to process a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanEnhance {
    /// The engine has nothing to contribute to this item.
    CannotEnhance,
    /// The engine runs on the caller's thread.
    Synchronous,
}

impl CanEnhance {
    pub fn is_enhanceable(self) -> bool {
        self != CanEnhance::CannotEnhance
    }
}

/// A trait that defines a pluggable content enhancement step.
///
/// Implementations must be shareable across threads: one engine instance may
/// process several content items concurrently, so any per-item state has to
/// live on the stack of [`EnhancementEngine::compute_enhancements`].
pub trait EnhancementEngine: Send + Sync {
    /// The name recorded as contributor on every annotation the engine touches.
    fn name(&self) -> &str;

    /// Position of the engine in a pipeline; higher runs earlier.
    fn ordering(&self) -> i32;

    /// Inspects `item` without modifying it.
    fn can_enhance(&self, item: &ContentItem) -> CanEnhance;

    /// Processes `item`, updating its metadata in place.
    ///
    /// # Arguments
    /// * `item` - The content item to enhance. Its metadata lock is taken for
    ///   reading while inputs are collected and for writing while results are
    ///   stored, never both at once.
    fn compute_enhancements(&self, item: &ContentItem) -> Result<EnhancementReport>;
}
