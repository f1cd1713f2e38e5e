use serde::{Deserialize, Serialize};

use super::attribute::Attribute;

/// One schema-described object; every output kind is rendered once per
/// entity.
///
/// Deserializes directly from a schema document. Unknown fields are
/// ignored and every field except `name` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub rest_endpoint: String,
    /// Create through a replace call instead of a create call.
    #[serde(default)]
    pub put_create: bool,
    #[serde(default)]
    pub no_update: bool,
    #[serde(default)]
    pub no_delete: bool,
    /// Data source looks the object up by name rather than by id.
    #[serde(default)]
    pub data_source_name_query: bool,
    #[serde(default)]
    pub minimum_version: String,
    #[serde(default)]
    pub ds_description: String,
    #[serde(default)]
    pub res_description: String,
    #[serde(default)]
    pub doc_category: String,
    #[serde(default)]
    pub exclude_test: bool,
    #[serde(default)]
    pub skip_minimum_test: bool,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub test_tags: Vec<String>,
    #[serde(default)]
    pub test_prerequisites: String,
}

impl Entity {
    /// Minimal entity with defaults everywhere else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rest_endpoint: String::new(),
            put_create: false,
            no_update: false,
            no_delete: false,
            data_source_name_query: false,
            minimum_version: String::new(),
            ds_description: String::new(),
            res_description: String::new(),
            doc_category: String::new(),
            exclude_test: false,
            skip_minimum_test: false,
            attributes: Vec::new(),
            test_tags: Vec::new(),
            test_prerequisites: String::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}
