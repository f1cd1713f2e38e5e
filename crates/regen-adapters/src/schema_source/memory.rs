//! Schemas held in memory, for tests and embedding.

use regen_core::{application::ports::SchemaSource, domain::Entity, error::RegenResult};

#[derive(Debug, Clone, Default)]
pub struct InMemorySchemaSource {
    entities: Vec<Entity>,
}

impl InMemorySchemaSource {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }
}

impl SchemaSource for InMemorySchemaSource {
    fn load_all(&self) -> RegenResult<Vec<Entity>> {
        Ok(self.entities.clone())
    }
}
