pub mod attribute;
pub mod entity;

pub use attribute::{
    Attribute, AttributeDocument, AttributeKind, AttributeSpec, has_id, has_reference,
    has_resource_id,
};
pub use entity::Entity;
