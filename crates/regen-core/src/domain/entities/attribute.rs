use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// One field of an [`Entity`](super::Entity).
///
/// The schema format is flat: a `type` string plus an optional
/// `attributes` list. Only `List` and `Set` attributes may have children,
/// and that rule is made structural here through [`AttributeKind`].
/// Serialization goes back through [`AttributeDocument`] so templates see
/// the same shape the schema author wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AttributeDocument", into = "AttributeDocument")]
pub struct Attribute {
    pub model_name: String,
    /// External name. Empty until augmentation derives it.
    pub tf_name: String,
    pub kind: AttributeKind,
    pub spec: AttributeSpec,
}

/// Type tag of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    /// Any non-collection type name (`String`, `Int64`, `Bool`, ...).
    Primitive(String),
    List(Vec<Attribute>),
    Set(Vec<Attribute>),
}

impl AttributeKind {
    pub const LIST: &'static str = "List";
    pub const SET: &'static str = "Set";

    pub fn type_name(&self) -> &str {
        match self {
            Self::Primitive(name) => name,
            Self::List(_) => Self::LIST,
            Self::Set(_) => Self::SET,
        }
    }
}

/// Everything about an attribute that the generator passes through to
/// templates without interpreting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSpec {
    pub data_path: Vec<String>,
    pub id: bool,
    pub resource_id: bool,
    pub reference: bool,
    pub requires_replace: bool,
    pub mandatory: bool,
    pub write_only: bool,
    pub write_changes_only: bool,
    pub exclude_test: bool,
    pub exclude_example: bool,
    #[serde(deserialize_with = "scalar::string")]
    pub description: String,
    #[serde(deserialize_with = "scalar::string")]
    pub example: String,
    #[serde(deserialize_with = "scalar::strings")]
    pub enum_values: Vec<String>,
    pub min_list: i64,
    pub max_list: i64,
    pub min_int: i64,
    pub max_int: i64,
    pub min_float: f64,
    pub max_float: f64,
    pub string_patterns: Vec<String>,
    pub string_min_length: i64,
    pub string_max_length: i64,
    #[serde(deserialize_with = "scalar::string")]
    pub default_value: String,
    #[serde(deserialize_with = "scalar::string")]
    pub value: String,
    #[serde(deserialize_with = "scalar::string")]
    pub test_value: String,
    #[serde(deserialize_with = "scalar::string")]
    pub minimum_test_value: String,
    #[serde(deserialize_with = "scalar::strings")]
    pub test_tags: Vec<String>,
}

/// Wire shape of an attribute in a schema document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeDocument {
    pub model_name: String,
    pub tf_name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(flatten)]
    pub spec: AttributeSpec,
    pub attributes: Vec<AttributeDocument>,
}

/// Free-text fields take whatever scalar the author wrote. `example: 443`
/// and `default_value: true` are as common in schema documents as quoted
/// strings, and a flattened `AttributeSpec` is buffered before the YAML
/// parser could coerce them.
mod scalar {
    use std::fmt;

    use serde::Deserialize;
    use serde::de::{self, Deserializer, Visitor};

    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        // `example:` with nothing after it
        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    struct Scalar(String);

    impl<'de> Deserialize<'de> for Scalar {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            d.deserialize_any(ScalarVisitor).map(Scalar)
        }
    }

    pub(super) fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        d.deserialize_any(ScalarVisitor)
    }

    pub(super) fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let items = Option::<Vec<Scalar>>::deserialize(d)?;
        Ok(items
            .unwrap_or_default()
            .into_iter()
            .map(|Scalar(s)| s)
            .collect())
    }
}

impl Attribute {
    /// Nested attributes; always empty for primitives.
    pub fn children(&self) -> &[Attribute] {
        match &self.kind {
            AttributeKind::Primitive(_) => &[],
            AttributeKind::List(children) | AttributeKind::Set(children) => children,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Attribute>> {
        match &mut self.kind {
            AttributeKind::Primitive(_) => None,
            AttributeKind::List(children) | AttributeKind::Set(children) => Some(children),
        }
    }

    pub fn is_composite(&self) -> bool {
        !matches!(self.kind, AttributeKind::Primitive(_))
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

impl TryFrom<AttributeDocument> for Attribute {
    type Error = DomainError;

    fn try_from(doc: AttributeDocument) -> Result<Self, Self::Error> {
        if doc.model_name.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "model_name",
            });
        }

        let children = doc
            .attributes
            .into_iter()
            .map(Attribute::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let kind = match doc.type_name.as_str() {
            AttributeKind::LIST => AttributeKind::List(children),
            AttributeKind::SET => AttributeKind::Set(children),
            _ if !children.is_empty() => {
                return Err(DomainError::InvalidAttribute {
                    attribute: doc.model_name,
                    reason: format!(
                        "type '{}' cannot have nested attributes (only List and Set can)",
                        doc.type_name
                    ),
                });
            }
            other => AttributeKind::Primitive(other.to_string()),
        };

        Ok(Self {
            model_name: doc.model_name,
            tf_name: doc.tf_name,
            kind,
            spec: doc.spec,
        })
    }
}

impl From<Attribute> for AttributeDocument {
    fn from(attr: Attribute) -> Self {
        let type_name = attr.kind.type_name().to_string();
        let attributes = match attr.kind {
            AttributeKind::Primitive(_) => Vec::new(),
            AttributeKind::List(children) | AttributeKind::Set(children) => {
                children.into_iter().map(Into::into).collect()
            }
        };

        Self {
            model_name: attr.model_name,
            tf_name: attr.tf_name,
            type_name,
            spec: attr.spec,
            attributes,
        }
    }
}

// ============================================================================
// Attribute scans bound into the template function table
// ============================================================================

/// `true` if any top-level attribute is flagged `id`.
pub fn has_id(attributes: &[Attribute]) -> bool {
    attributes.iter().any(|a| a.spec.id)
}

/// `true` if any top-level attribute is flagged `reference`. Does not recurse.
pub fn has_reference(attributes: &[Attribute]) -> bool {
    attributes.iter().any(|a| a.spec.reference)
}

/// `true` if any attribute at any depth is flagged `resource_id`.
pub fn has_resource_id(attributes: &[Attribute]) -> bool {
    attributes
        .iter()
        .any(|a| a.spec.resource_id || has_resource_id(a.children()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primitive(model_name: &str) -> Attribute {
        Attribute {
            model_name: model_name.into(),
            tf_name: String::new(),
            kind: AttributeKind::Primitive("String".into()),
            spec: AttributeSpec::default(),
        }
    }

    #[test]
    fn document_with_children_becomes_list() {
        let doc = AttributeDocument {
            model_name: "literals".into(),
            type_name: "List".into(),
            attributes: vec![AttributeDocument {
                model_name: "value".into(),
                type_name: "String".into(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let attr = Attribute::try_from(doc).unwrap();
        assert!(matches!(attr.kind, AttributeKind::List(_)));
        assert_eq!(attr.children().len(), 1);
        assert_eq!(attr.children()[0].type_name(), "String");
    }

    #[test]
    fn primitive_with_children_is_rejected() {
        let doc = AttributeDocument {
            model_name: "name".into(),
            type_name: "String".into(),
            attributes: vec![AttributeDocument {
                model_name: "inner".into(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let err = Attribute::try_from(doc).unwrap_err();
        assert!(matches!(err, DomainError::InvalidAttribute { .. }));
    }

    #[test]
    fn missing_model_name_is_rejected() {
        let err = Attribute::try_from(AttributeDocument::default()).unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingRequiredField {
                field: "model_name"
            }
        );
    }

    #[test]
    fn round_trip_keeps_flat_shape() {
        let mut attr = primitive("name");
        attr.spec.mandatory = true;
        let doc = AttributeDocument::from(attr.clone());
        assert_eq!(doc.type_name, "String");
        assert!(doc.spec.mandatory);
        assert_eq!(Attribute::try_from(doc).unwrap(), attr);
    }

    #[test]
    fn has_id_is_shallow() {
        let mut id = primitive("id");
        id.spec.id = true;
        assert!(has_id(&[primitive("name"), id.clone()]));

        let nested = Attribute {
            kind: AttributeKind::List(vec![id]),
            ..primitive("items")
        };
        assert!(!has_id(&[nested]));
    }

    #[test]
    fn has_reference_is_shallow() {
        let mut reference = primitive("parentId");
        reference.spec.reference = true;
        assert!(has_reference(&[reference.clone()]));

        let nested = Attribute {
            kind: AttributeKind::Set(vec![reference]),
            ..primitive("items")
        };
        assert!(!has_reference(&[nested]));
    }

    #[test]
    fn has_resource_id_recurses() {
        let mut rid = primitive("id");
        rid.spec.resource_id = true;
        let deep = Attribute {
            kind: AttributeKind::List(vec![Attribute {
                kind: AttributeKind::Set(vec![rid]),
                ..primitive("inner")
            }]),
            ..primitive("outer")
        };

        assert!(has_resource_id(&[primitive("name"), deep]));
        assert!(!has_resource_id(&[primitive("name")]));
    }
}
