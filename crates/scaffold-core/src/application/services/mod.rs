//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "merge the configuration" or "run compliance".

pub mod compliance_service;
pub mod hook_service;
pub mod merge_service;
pub mod release_service;

pub use compliance_service::{ComplianceService, PROBE_TIMEOUT};
pub use hook_service::{HookService, LicenseOutcome};
pub use merge_service::{ConfigMergeService, MergePaths, MergeReport};
pub use release_service::{
    ReleaseManager, ReleaseSettings, TemplateReleaseManager, release_manager_for,
};
