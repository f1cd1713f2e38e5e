// ============================================================================
// domain/errors.rs - DOMAIN ERRORS
// ============================================================================

use std::fmt;
use thiserror::Error;

/// Where a marked section was being read from when it went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionOrigin {
    /// The file already on disk from a previous run.
    PriorFile,
    /// The text freshly produced by the template.
    Rendered,
}

impl fmt::Display for SectionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PriorFile => write!(f, "prior file"),
            Self::Rendered => write!(f, "rendered output"),
        }
    }
}

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Schema Errors
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid attribute '{attribute}': {reason}")]
    InvalidAttribute { attribute: String, reason: String },

    #[error("Entity '{entity}' has more than one attribute named '{name}' at the same level")]
    DuplicateAttributeName { entity: String, name: String },

    // ========================================================================
    // Section Errors
    // ========================================================================
    #[error("Invalid section name '{name}': names cannot contain whitespace or ':'")]
    InvalidSectionName { name: String },

    #[error("Section '{name}' opened at line {line} of the {origin} is never closed")]
    UnterminatedSection {
        name: String,
        line: usize,
        origin: SectionOrigin,
    },

    // ========================================================================
    // Plan Errors
    // ========================================================================
    #[error("Destination {path} is produced by more than one output")]
    DuplicateDestination { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => vec![
                format!("Add '{}' to the schema document", field),
            ],
            Self::InvalidAttribute { attribute, .. } => vec![
                format!("Check the definition of attribute '{}'", attribute),
                "Only List and Set attributes may carry nested attributes".into(),
            ],
            Self::DuplicateAttributeName { name, .. } => vec![
                format!("Two sibling attributes resolve to the external name '{}'", name),
                "Set an explicit tf_name on one of them".into(),
            ],
            Self::UnterminatedSection { name, origin, .. } => vec![
                format!("Add the missing end marker for section '{}'", name),
                match origin {
                    SectionOrigin::PriorFile => "The existing file was left untouched".into(),
                    SectionOrigin::Rendered => "Check the template for an unbalanced marker".into(),
                },
            ],
            Self::DuplicateDestination { .. } => vec![
                "Give each output a distinct prefix/suffix".into(),
                "Check for entities whose names differ only in case or spacing".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. }
            | Self::InvalidAttribute { .. }
            | Self::DuplicateAttributeName { .. }
            | Self::InvalidSectionName { .. }
            | Self::UnterminatedSection { .. } => ErrorCategory::Validation,
            Self::DuplicateDestination { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}
