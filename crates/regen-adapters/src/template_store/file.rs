//! Templates read from disk.

use std::{
    io,
    path::{Path, PathBuf},
};

use regen_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TemplateText,
    error::RegenResult,
};
use tracing::debug;

use super::strip_directive_lines;

/// Loads templates relative to a root directory.
///
/// Absolute paths are used as-is. The template id is the path as
/// configured, so error messages match the config file.
#[derive(Debug, Clone)]
pub struct FileTemplateStore {
    root: PathBuf,
}

impl FileTemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateStore for FileTemplateStore {
    fn load(&self, path: &Path, skip_lines: usize) -> RegenResult<TemplateText> {
        let full = self.root.join(path);
        let body = std::fs::read_to_string(&full).map_err(|e| ApplicationError::TemplateLoad {
            path: full.clone(),
            reason: match e.kind() {
                io::ErrorKind::NotFound => "file not found".to_string(),
                _ => e.to_string(),
            },
        })?;
        debug!(path = %full.display(), skip_lines, "Template loaded");
        Ok(TemplateText::new(
            path.display().to_string(),
            strip_directive_lines(&body, skip_lines),
        ))
    }
}
