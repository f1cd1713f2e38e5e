//! Infrastructure adapters for regen.
//!
//! This crate implements the ports defined in `regen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;
pub mod schema_source;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::TeraRenderer;
pub use schema_source::{InMemorySchemaSource, YamlSchemaSource};
pub use template_store::{FileTemplateStore, InMemoryTemplateStore};
