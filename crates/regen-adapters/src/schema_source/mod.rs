//! Schema source adapters.

mod memory;
mod yaml;

pub use memory::InMemorySchemaSource;
pub use yaml::YamlSchemaSource;
