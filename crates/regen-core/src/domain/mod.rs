//! Core domain layer for regen.
//!
//! This module contains pure logic with no I/O. Loading schemas, reading
//! templates, rendering and touching the filesystem all happen behind ports
//! defined in the application layer.
//!
//! - **naming**: the casing rules generated names are built from
//! - **augment**: defaults derived onto freshly loaded entities
//! - **sections / merge**: marked sections and the prior-file patch
//! - **plan**: output kinds and destination paths
//! - **render**: template inputs and the helper function table
pub mod augment;
pub mod entities;
pub mod error;
pub mod merge;
pub mod naming;
pub mod plan;
pub mod render;
pub mod sections;

pub use augment::augment_entity;
pub use entities::{Attribute, AttributeDocument, AttributeKind, AttributeSpec, Entity};
pub use error::{DomainError, ErrorCategory, SectionOrigin};
pub use merge::{MergeEngine, MergeOutcome, MergeStrategy};
pub use plan::{ArtifactSpec, ChangelogSpec, GenerationPlan, OutputKind, PlannedFile};
pub use render::{FunctionTable, Helper, RenderInput, TemplateText};
pub use sections::{LineEvent, MarkerSyntax};

#[cfg(test)]
mod tests {
    use super::*;

    const HOST_YAML: &str = r#"
name: Host
rest_endpoint: /object/hosts
doc_category: Objects
unknown_field: ignored
attributes:
  - model_name: name
    type: String
    mandatory: true
    example: HOST1
  - model_name: overridableID
    type: Bool
  - model_name: literals
    type: Set
    data_path: [objects, literals]
    attributes:
      - model_name: value
        type: String
        min_int: 1
        max_float: 2.5
"#;

    #[test]
    fn schema_document_loads_and_augments() {
        let mut entity: Entity = serde_yaml::from_str(HOST_YAML).unwrap();
        augment_entity(&mut entity).unwrap();

        assert_eq!(entity.rest_endpoint, "/object/hosts");
        assert_eq!(entity.attributes.len(), 3);
        assert!(entity.attributes[0].spec.mandatory);
        assert_eq!(entity.attributes[1].tf_name, "overridable_i_d");

        let literals = &entity.attributes[2];
        assert!(matches!(literals.kind, AttributeKind::Set(_)));
        assert_eq!(literals.spec.data_path, vec!["objects", "literals"]);
        assert_eq!(literals.children()[0].spec.min_int, 1);
        assert_eq!(literals.children()[0].spec.max_float, 2.5);
        assert_eq!(entity.res_description, "This resource can manage a Host.");
    }

    #[test]
    fn unquoted_scalars_load_as_text() {
        let yaml = r#"
name: Port
attributes:
  - model_name: port
    type: Int64
    example: 443
    default_value: true
    test_value: false
    minimum_test_value: 1.5
    enum_values: [80, https, 8443]
    description:
"#;
        let entity: Entity = serde_yaml::from_str(yaml).unwrap();
        let spec = &entity.attributes[0].spec;

        assert_eq!(spec.example, "443");
        assert_eq!(spec.default_value, "true");
        assert_eq!(spec.test_value, "false");
        assert_eq!(spec.minimum_test_value, "1.5");
        assert_eq!(spec.enum_values, vec!["80", "https", "8443"]);
        assert_eq!(spec.description, "");
    }

    #[test]
    fn schema_document_without_name_fails() {
        let result: Result<Entity, _> = serde_yaml::from_str("rest_endpoint: /x\n");
        assert!(result.is_err());
    }

    #[test]
    fn primitive_with_children_fails_to_parse() {
        let yaml = "name: Bad\nattributes:\n  - model_name: x\n    type: String\n    attributes:\n      - model_name: y\n";
        let result: Result<Entity, _> = serde_yaml::from_str(yaml);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("cannot have nested attributes"), "{message}");
    }

    #[test]
    fn entity_serializes_in_schema_shape() {
        let entity: Entity = serde_yaml::from_str(HOST_YAML).unwrap();
        let yaml = serde_yaml::to_string(&entity).unwrap();
        assert!(yaml.contains("type: Set"));
        assert!(yaml.contains("model_name: value"));
        assert!(!yaml.contains("kind"));
        assert!(!yaml.contains("spec"));
    }
}
