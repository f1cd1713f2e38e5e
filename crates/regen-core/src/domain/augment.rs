//! Fill in the fields a schema author is allowed to leave out.
//!
//! Augmentation only ever writes into empty fields, so running it twice is
//! the same as running it once.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{
    entities::{Attribute, Entity},
    error::DomainError,
    naming::derive_boundary_words,
};

/// Derive missing names and descriptions on `entity`, then check that no
/// two sibling attributes ended up with the same external name.
pub fn augment_entity(entity: &mut Entity) -> Result<(), DomainError> {
    if entity.name.trim().is_empty() {
        return Err(DomainError::MissingRequiredField { field: "name" });
    }

    for attribute in &mut entity.attributes {
        augment_attribute(attribute);
    }

    if entity.ds_description.is_empty() {
        entity.ds_description = format!("This data source can read the {}.", entity.name);
    }

    if entity.res_description.is_empty() {
        entity.res_description = format!(
            "This resource can manage {} {}.",
            indefinite_article(&entity.name),
            entity.name
        );
    }

    ensure_unique_names(&entity.name, &entity.attributes)?;

    debug!(entity = %entity.name, attributes = entity.attributes.len(), "Entity augmented");
    Ok(())
}

fn augment_attribute(attribute: &mut Attribute) {
    if attribute.tf_name.is_empty() {
        attribute.tf_name = derive_boundary_words(&attribute.model_name);
    }

    if let Some(children) = attribute.children_mut() {
        for child in children {
            augment_attribute(child);
        }
    }
}

/// "an" before a vowel letter, "a" otherwise. Looks at spelling only.
fn indefinite_article(name: &str) -> &'static str {
    match name.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

fn ensure_unique_names(entity: &str, attributes: &[Attribute]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for attribute in attributes {
        if !seen.insert(attribute.tf_name.as_str()) {
            return Err(DomainError::DuplicateAttributeName {
                entity: entity.to_string(),
                name: attribute.tf_name.clone(),
            });
        }
        ensure_unique_names(entity, attribute.children())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AttributeKind, AttributeSpec};

    fn attr(model_name: &str, kind: AttributeKind) -> Attribute {
        Attribute {
            model_name: model_name.into(),
            tf_name: String::new(),
            kind,
            spec: AttributeSpec::default(),
        }
    }

    fn string(model_name: &str) -> Attribute {
        attr(model_name, AttributeKind::Primitive("String".into()))
    }

    #[test]
    fn derives_external_names_recursively() {
        let mut entity = Entity::new("Host")
            .with_attribute(string("ipAddress"))
            .with_attribute(attr(
                "overrides",
                AttributeKind::List(vec![string("targetId")]),
            ));

        augment_entity(&mut entity).unwrap();

        assert_eq!(entity.attributes[0].tf_name, "ip_address");
        assert_eq!(entity.attributes[1].tf_name, "overrides");
        assert_eq!(entity.attributes[1].children()[0].tf_name, "target_id");
    }

    #[test]
    fn keeps_explicit_external_name() {
        let mut named = string("ipAddress");
        named.tf_name = "ip".into();
        let mut entity = Entity::new("Host").with_attribute(named);

        augment_entity(&mut entity).unwrap();
        assert_eq!(entity.attributes[0].tf_name, "ip");
    }

    #[test]
    fn vowel_names_get_an() {
        let mut entity = Entity::new("Access Policy");
        augment_entity(&mut entity).unwrap();
        assert_eq!(
            entity.res_description,
            "This resource can manage an Access Policy."
        );
        assert_eq!(
            entity.ds_description,
            "This data source can read the Access Policy."
        );
    }

    #[test]
    fn consonant_names_get_a() {
        let mut entity = Entity::new("Rule");
        augment_entity(&mut entity).unwrap();
        assert_eq!(entity.res_description, "This resource can manage a Rule.");
    }

    #[test]
    fn article_ignores_case() {
        assert_eq!(indefinite_article("interface"), "an");
        assert_eq!(indefinite_article("Umbrella"), "an");
        assert_eq!(indefinite_article("Yield"), "a");
    }

    #[test]
    fn explicit_descriptions_are_kept() {
        let mut entity = Entity::new("Host");
        entity.ds_description = "Reads hosts.".into();
        entity.res_description = "Manages hosts.".into();

        augment_entity(&mut entity).unwrap();
        assert_eq!(entity.ds_description, "Reads hosts.");
        assert_eq!(entity.res_description, "Manages hosts.");
    }

    #[test]
    fn augmentation_is_idempotent() {
        let mut entity = Entity::new("Access Policy")
            .with_attribute(string("defaultAction"))
            .with_attribute(attr("rules", AttributeKind::Set(vec![string("Id")])));

        augment_entity(&mut entity).unwrap();
        let once = entity.clone();
        augment_entity(&mut entity).unwrap();

        assert_eq!(entity, once);
    }

    #[test]
    fn duplicate_sibling_names_fail() {
        let mut entity = Entity::new("Host")
            .with_attribute(string("ipAddress"))
            .with_attribute(string("IpAddress"));

        let err = augment_entity(&mut entity).unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateAttributeName {
                entity: "Host".into(),
                name: "ip_address".into(),
            }
        );
    }

    #[test]
    fn same_name_at_different_levels_is_fine() {
        let mut entity = Entity::new("Host")
            .with_attribute(string("id"))
            .with_attribute(attr("items", AttributeKind::List(vec![string("id")])));

        assert!(augment_entity(&mut entity).is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut entity = Entity::new("  ");
        assert!(matches!(
            augment_entity(&mut entity),
            Err(DomainError::MissingRequiredField { field: "name" })
        ));
    }
}
