// linkrank-core/src/name_match.rs
//! Lexical name matching between a mention and a candidate's entity record.
//!
//! The record's designated name literal is compared against every surface
//! form of the mention. Each case-insensitive exact match adds 1 to the
//! candidate's `name_match_score`; no fuzzy matching is attempted.

use log::debug;

use crate::candidate::Candidate;
use crate::config::Weights;
use crate::entity::EntityRecord;

/// Removes a trailing `@<language-tag>` marker, e.g. `"Bob Marley@en"` becomes
/// `"Bob Marley"`. Text whose suffix after the last `@` is not a plausible
/// language tag (such as an e-mail address) is returned unchanged.
pub fn strip_language_tag(label: &str) -> &str {
    match label.rfind('@') {
        Some(at) if is_language_tag(&label[at + 1..]) => &label[..at],
        _ => label,
    }
}

fn is_language_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag.len() <= 35
        && tag.starts_with(|c: char| c.is_ascii_alphabetic())
        && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn equals_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Scores candidates by comparing one name field against surface forms.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    name_field: String,
}

impl NameMatcher {
    pub fn new(name_field: impl Into<String>) -> Self {
        Self {
            name_field: name_field.into(),
        }
    }

    pub fn name_field(&self) -> &str {
        &self.name_field
    }

    /// Adds the number of surface forms equal to the record's name to the
    /// candidate's `name_match_score` and derives `name_match_confidence`.
    ///
    /// A record without a name literal leaves the candidate untouched.
    pub fn score(
        &self,
        candidate: &mut Candidate,
        record: &dyn EntityRecord,
        surface_forms: &[String],
        weights: &Weights,
    ) {
        let name = match record.get_first_literal(&self.name_field) {
            Some(raw) => strip_language_tag(raw),
            None => {
                debug!(
                    "Entity '{}' has no '{}' literal; skipping name matching",
                    candidate.entity_id(),
                    self.name_field
                );
                return;
            }
        };

        let matches = surface_forms
            .iter()
            .filter(|form| equals_ignore_case(form, name))
            .count();
        if matches > 0 {
            debug!(
                "Name '{}' of entity '{}' matched {} surface form(s)",
                name,
                candidate.entity_id(),
                matches
            );
        }

        candidate.name_match_score += matches as f64;
        candidate.calculate_name_match_confidence(weights);
    }
}
