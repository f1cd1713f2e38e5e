//! In-memory template store for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use regen_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TemplateText,
    error::RegenResult,
};

use super::strip_directive_lines;

/// Thread-safe in-memory template store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateStore {
    inner: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl InMemoryTemplateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a template.
    pub fn insert(&self, path: impl Into<PathBuf>, body: impl Into<String>) -> RegenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(path.into(), body.into());
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert) for test setup.
    pub fn with(self, path: impl Into<PathBuf>, body: impl Into<String>) -> RegenResult<Self> {
        self.insert(path, body)?;
        Ok(self)
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn load(&self, path: &Path, skip_lines: usize) -> RegenResult<TemplateText> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let body = inner
            .get(path)
            .ok_or_else(|| ApplicationError::TemplateLoad {
                path: path.to_path_buf(),
                reason: "not registered in store".into(),
            })?;
        Ok(TemplateText::new(
            path.display().to_string(),
            strip_directive_lines(body, skip_lines),
        ))
    }
}
