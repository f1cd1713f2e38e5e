//! What a renderer is given: template text, the value to render, and the
//! table of helper functions templates may call.

use std::fmt;

use crate::domain::{
    entities::{Attribute, Entity, has_id, has_reference, has_resource_id},
    naming,
};

/// Template source text plus the identity used in error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateText {
    pub id: String,
    pub body: String,
}

impl TemplateText {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }
}

/// The value a template is rendered against.
#[derive(Debug, Clone, Copy)]
pub enum RenderInput<'a> {
    /// One entity; its fields are the template's top-level variables.
    Entity(&'a Entity),
    /// Every entity name in load order, exposed as `entities`.
    Manifest(&'a [String]),
    /// Raw changelog document, exposed as `changelog`.
    Changelog(&'a str),
}

impl RenderInput<'_> {
    /// Short label for logs and errors.
    pub fn subject(&self) -> &str {
        match self {
            Self::Entity(entity) => &entity.name,
            Self::Manifest(_) => "manifest",
            Self::Changelog(_) => "changelog",
        }
    }
}

/// A pure helper callable from templates.
#[derive(Clone, Copy)]
pub enum Helper {
    Text(fn(&str) -> String),
    Path(fn(&[String]) -> String),
    Predicate(fn(&[Attribute]) -> bool),
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(_) => f.write_str("Helper::Text"),
            Self::Path(_) => f.write_str("Helper::Path"),
            Self::Predicate(_) => f.write_str("Helper::Predicate"),
        }
    }
}

/// Named helpers handed to the renderer on every call.
///
/// There is no global registry: whatever table the caller passes is exactly
/// what the template can see.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    entries: Vec<(&'static str, Helper)>,
}

impl FunctionTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The helpers every generator template can rely on.
    pub fn standard() -> Self {
        Self::empty()
            .with("to_identifier", Helper::Text(naming::to_identifier))
            .with("to_camel_words", Helper::Text(naming::to_camel_words))
            .with("to_snake", Helper::Text(naming::to_snake))
            .with("to_lower", Helper::Text(naming::to_lower))
            .with(
                "derive_boundary_words",
                Helper::Text(naming::derive_boundary_words),
            )
            .with("build_path", Helper::Path(naming::build_path))
            .with("has_id", Helper::Predicate(has_id))
            .with("has_reference", Helper::Predicate(has_reference))
            .with("has_resource_id", Helper::Predicate(has_resource_id))
    }

    /// Add or replace a helper.
    pub fn with(mut self, name: &'static str, helper: Helper) -> Self {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = helper,
            None => self.entries.push((name, helper)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<Helper> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, helper)| *helper)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Helper)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
