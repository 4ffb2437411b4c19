//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A required input file is absent.
    #[error("Required file not found: {path}")]
    MissingInput { path: PathBuf },

    /// An input file exists but could not be parsed.
    #[error("Error parsing {path}: {reason}")]
    MalformedInput { path: PathBuf, reason: String },

    /// The merged configuration violates one or more constraints.
    #[error("Configuration validation failed with {} error(s)", violations.len())]
    InvalidConfiguration { violations: Vec<String> },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The container engine could not be reached.
    #[error("{engine} not found")]
    RuntimeUnavailable { engine: String, reason: String },

    /// An external process could not be started or waited on.
    #[error("Failed to run '{command}': {reason}")]
    ProcessFailed { command: String, reason: String },

    /// The in-memory filesystem lock was poisoned by a panicking writer.
    #[error("In-memory filesystem lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingInput { path } => vec![
                format!("Create or mount the file at {}", path.display()),
                "Override the location with SCAFFOLD_MERGE__PROJECT_FILE or a config file".into(),
            ],
            Self::MalformedInput { path, .. } => vec![
                format!("Fix the YAML syntax in {}", path.display()),
            ],
            Self::InvalidConfiguration { violations } => violations
                .iter()
                .map(|v| format!("\u{2022} {v}"))
                .collect(),
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::RuntimeUnavailable { .. } => vec![
                "Please install Docker: https://docs.docker.com/get-docker/".into(),
                "Or point SCAFFOLD_COMPLIANCE__CONTAINER_ENGINE at another engine".into(),
            ],
            Self::ProcessFailed { .. } => vec![
                "Ensure the command is installed and in your PATH".into(),
                "Check the command output above for details".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingInput { .. } => ErrorCategory::NotFound,
            Self::MalformedInput { .. } => ErrorCategory::Malformed,
            Self::InvalidConfiguration { .. } => ErrorCategory::Validation,
            Self::RuntimeUnavailable { .. } => ErrorCategory::Unavailable,
            Self::FilesystemError { .. } | Self::ProcessFailed { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}
