// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (services hand them across layers freely)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Document Errors
    // ========================================================================
    #[error("Malformed document: {reason}")]
    MalformedDocument { reason: String },

    #[error("Document root must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("Required field missing: {field}")]
    MissingField { field: &'static str },

    // ========================================================================
    // Input Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid email format: {email}")]
    InvalidEmail { email: String },

    // ========================================================================
    // Selection Errors
    // ========================================================================
    #[error("Unknown check: {name}")]
    UnknownCheck { name: String },

    #[error("Unsupported component: {component}")]
    UnsupportedComponent { component: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedDocument { .. } | Self::NotAMapping { .. } => vec![
                "Check the YAML syntax of the file".into(),
                "The top level of the document must be a key/value mapping".into(),
            ],
            Self::MissingField { field } => vec![
                format!("Add '{field}' to the document"),
            ],
            Self::InvalidProjectName { .. } => vec![
                "Use alphanumeric characters, hyphens, and underscores".into(),
                "Start with a letter or number".into(),
                "Keep the name under 100 characters".into(),
            ],
            Self::InvalidEmail { .. } => vec![
                "Use an address of the form name@example.org".into(),
            ],
            Self::UnknownCheck { .. } => vec![format!(
                "Valid checks: {}",
                crate::domain::CheckSelection::valid_names().join(", ")
            )],
            Self::UnsupportedComponent { .. } => vec![
                "Supported components: template".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedDocument { .. } | Self::NotAMapping { .. } => ErrorCategory::Malformed,
            Self::MissingField { .. } => ErrorCategory::NotFound,
            Self::InvalidProjectName { .. }
            | Self::InvalidEmail { .. }
            | Self::UnknownCheck { .. }
            | Self::UnsupportedComponent { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Malformed,
    NotFound,
}
