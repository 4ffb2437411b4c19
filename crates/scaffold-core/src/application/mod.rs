//! Application layer for Scaffold.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (merge, compliance, release, hooks)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ComplianceService, ConfigMergeService, HookService, LicenseOutcome, MergePaths, MergeReport,
    ReleaseManager, ReleaseSettings, TemplateReleaseManager, release_manager_for,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    CapturedOutput, ContainerRuntime, Filesystem, ProgressReporter, SilentReporter,
    VersionControl,
};

pub use error::ApplicationError;
