// linkrank-core/src/vocab.rs
//! Well-known identifiers used by the default configuration.

/// `foaf:name`, the literal compared against a mention's surface text.
pub const FOAF_NAME: &str = "http://xmlns.com/foaf/0.1/name";

/// Stage value for engines that run after extraction; see
/// [`crate::config::DisambiguationConfig::ordering`].
pub const ORDERING_POST_PROCESSING: i32 = -100;

/// Default ordering: early in the post-processing stage.
pub const DEFAULT_ORDERING: i32 = ORDERING_POST_PROCESSING - 90;

/// Identity recorded on every suggestion this engine re-scores.
pub const DEFAULT_ENGINE_NAME: &str = "disambiguation-foaf";
