//! Application layer errors.
//!
//! These errors represent failures in orchestration: reading schemas and
//! templates, rendering, merging into existing files and writing results.
//! Rule violations inside the data itself are `DomainError`s.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running a generation.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A schema document could not be read or parsed.
    #[error("Failed to parse schema {path}: {reason}")]
    SchemaParse { path: PathBuf, reason: String },

    /// A template file could not be loaded.
    #[error("Failed to load template {path}: {reason}")]
    TemplateLoad { path: PathBuf, reason: String },

    /// Template parsing or execution failed.
    #[error("Template {template} failed for {subject}: {reason}")]
    RenderingFailed {
        template: String,
        subject: String,
        reason: String,
    },

    /// The existing file could not be merged with the rendered output.
    /// The file on disk has not been modified.
    #[error("Cannot merge into {path}: {reason}")]
    MergeFailed { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SchemaParse { path, .. } => vec![
                format!("Fix the schema document: {}", path.display()),
                "No files were generated".into(),
            ],
            Self::TemplateLoad { path, .. } => vec![
                format!("Check that the template exists: {}", path.display()),
                "Template paths are configured under [[generator.outputs]]".into(),
            ],
            Self::RenderingFailed { template, .. } => vec![
                format!("Check the template syntax in {}", template),
                "Run with -vv to see the full template error".into(),
            ],
            Self::MergeFailed { path, .. } => vec![
                format!("Repair the section markers in {}", path.display()),
                "Every begin marker needs an end marker with the same name".into(),
                "The file was left untouched".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SchemaParse { .. } => ErrorCategory::Validation,
            Self::TemplateLoad { .. } => ErrorCategory::NotFound,
            Self::RenderingFailed { .. } => ErrorCategory::Validation,
            Self::MergeFailed { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
