//! Tera-based renderer with the helper table registered as filters.

use std::error::Error as _;

use regen_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{FunctionTable, RenderInput, TemplateText},
    error::RegenResult,
};
use tera::{Context, Tera};
use tracing::{instrument, trace};

use super::filters;

/// Renders [`TemplateText`] with Tera.
///
/// A fresh Tera instance is built on every call so that the only helpers a
/// template can reach are the ones in the table passed to that call.
/// Autoescaping is off: output is source code, not HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraRenderer;

impl TeraRenderer {
    /// Create a new Tera renderer.
    pub fn new() -> Self {
        Self
    }

    fn engine(template: &TemplateText, functions: &FunctionTable) -> tera::Result<Tera> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        for (name, helper) in functions.iter() {
            tera.register_filter(name, filters::from_helper(name, helper));
        }
        tera.add_raw_template(&template.id, &template.body)?;
        Ok(tera)
    }

    fn context(input: &RenderInput<'_>) -> tera::Result<Context> {
        match input {
            RenderInput::Entity(entity) => Context::from_serialize(entity),
            RenderInput::Manifest(names) => {
                let mut context = Context::new();
                context.insert("entities", names);
                Ok(context)
            }
            RenderInput::Changelog(text) => {
                let mut context = Context::new();
                context.insert("changelog", text);
                Ok(context)
            }
        }
    }
}

impl TemplateRenderer for TeraRenderer {
    #[instrument(skip_all, fields(template = %template.id, subject = input.subject()))]
    fn render(
        &self,
        template: &TemplateText,
        input: &RenderInput<'_>,
        functions: &FunctionTable,
    ) -> RegenResult<String> {
        let rendered = Self::engine(template, functions)
            .and_then(|tera| {
                let context = Self::context(input)?;
                tera.render(&template.id, &context)
            })
            .map_err(|e| ApplicationError::RenderingFailed {
                template: template.id.clone(),
                subject: input.subject().to_string(),
                reason: error_chain(&e),
            })?;

        trace!(bytes = rendered.len(), "Rendered");
        Ok(rendered)
    }
}

/// Tera nests the useful message (line, missing variable) in the source chain.
fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
