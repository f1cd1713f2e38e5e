//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `regen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{Entity, FunctionTable, RenderInput, TemplateText};
use crate::error::RegenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `regen_adapters::filesystem::LocalFilesystem` (production)
/// - `regen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> RegenResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> RegenResult<()>;

    /// Read a file, or `None` if it does not exist.
    fn read_to_string(&self, path: &Path) -> RegenResult<Option<String>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for loading entity schema documents.
///
/// Implemented by:
/// - `regen_adapters::schema_source::YamlSchemaSource` (definitions directory)
/// - `regen_adapters::schema_source::InMemorySchemaSource` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait SchemaSource: Send + Sync {
    /// Every entity, parsed but not yet augmented, in load order.
    fn load_all(&self) -> RegenResult<Vec<Entity>>;
}

/// Port for template retrieval.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Load the template at `path`, dropping its first `skip_lines` lines.
    fn load(&self, path: &Path, skip_lines: usize) -> RegenResult<TemplateText>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `regen_adapters::renderer::TeraRenderer`
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` against `input`.
    ///
    /// Only the helpers in `functions` are callable from the template.
    /// Identical inputs must produce identical output.
    fn render(
        &self,
        template: &TemplateText,
        input: &RenderInput<'_>,
        functions: &FunctionTable,
    ) -> RegenResult<String>;
}
