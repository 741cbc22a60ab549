// linkrank-core/src/entity.rs
//! Read-only access to knowledge-base entity records.
//!
//! The scoring code never inspects a record's structure directly; it goes
//! through [`EntityRecord`], which exposes the three operations it needs:
//! listing fields, reading the first literal of a field, and reading every
//! outbound reference of a field.
//!
//! [`Representation`] is the concrete record used by the bundled knowledge
//! bases. Its JSON form keeps the `id` next to one array of typed values per
//! field, the layout returned by an Entityhub:
//!
//! ```json
//! {
//!   "id": "http://dbpedia.org/resource/Bob_Marley",
//!   "http://xmlns.com/foaf/0.1/name": [{ "type": "text", "xml:lang": "en", "value": "Bob Marley" }],
//!   "http://dbpedia.org/ontology/genre": [{ "type": "reference", "value": "http://dbpedia.org/resource/Reggae" }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key-value view over an entity record.
pub trait EntityRecord: Send + Sync {
    /// Identifier of the entity this record describes.
    fn id(&self) -> &str;

    /// Names of all fields present on the record.
    fn list_fields(&self) -> Vec<&str>;

    /// The first literal value of `field`, if any.
    fn get_first_literal(&self, field: &str) -> Option<&str>;

    /// Every outbound reference stored in `field`, in record order.
    fn get_all_references(&self, field: &str) -> Vec<&str>;
}

/// One typed value of a record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldValue {
    /// Natural language text, optionally language tagged.
    Text {
        value: String,
        #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    /// A link to another entity.
    Reference { value: String },
    /// A typed literal such as a date or a number.
    Value {
        value: String,
        #[serde(rename = "xsd:datatype", default, skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
    },
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text {
            value: value.into(),
            language: None,
        }
    }

    pub fn reference(value: impl Into<String>) -> Self {
        FieldValue::Reference { value: value.into() }
    }

    fn as_literal(&self) -> Option<&str> {
        match self {
            FieldValue::Text { value, .. } | FieldValue::Value { value, .. } => Some(value),
            FieldValue::Reference { .. } => None,
        }
    }

    fn as_reference(&self) -> Option<&str> {
        match self {
            FieldValue::Reference { value } => Some(value),
            _ => None,
        }
    }
}

/// An entity record: an identifier and its fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Representation {
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Vec<FieldValue>>,
}

impl Representation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Appends `value` to `field`, builder style.
    pub fn with(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.fields.entry(field.into()).or_default().push(value);
        self
    }
}

impl EntityRecord for Representation {
    fn id(&self) -> &str {
        &self.id
    }

    fn list_fields(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    fn get_first_literal(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|values| values.iter().find_map(FieldValue::as_literal))
    }

    fn get_all_references(&self, field: &str) -> Vec<&str> {
        self.fields
            .get(field)
            .map(|values| values.iter().filter_map(FieldValue::as_reference).collect())
            .unwrap_or_default()
    }
}
