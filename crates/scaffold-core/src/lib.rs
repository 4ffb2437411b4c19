//! Scaffold Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Scaffold
//! project toolkit, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              scaffold-cli (CLI)              │
//! │          (Implements Driving Ports)          │
//! └──────────────────────┬───────────────────────┘
//!                        │ calls
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │             Application Services             │
//! │   (ConfigMerge, Compliance, Release, Hook)   │
//! └──────────────────────┬───────────────────────┘
//!                        │ uses
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │          Application Ports (Traits)          │
//! │ (Filesystem, ContainerRuntime, VersionControl)│
//! └──────────────────────┬───────────────────────┘
//!                        │ implemented by
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │       scaffold-adapters (Infrastructure)     │
//! │  (LocalFilesystem, DockerRuntime, GitCli)    │
//! └──────────────────────────────────────────────┘
//!
//! ┌──────────────────────────────────────────────┐
//! │           Domain Layer (Pure Logic)          │
//! │ (Document, FeatureFlags, ConfigViolation...) │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use scaffold_core::domain::{activate, parse_document, validate_config};
//!
//! let defaults = parse_document("metadata: {license: MIT}\ngithub: {workflows: true}").unwrap();
//! let project = parse_document("features: {github: false}").unwrap();
//!
//! let merged = activate(&defaults, &project);
//! assert!(validate_config(&merged).is_empty());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ComplianceService, ConfigMergeService, HookService, MergePaths, ReleaseManager,
        ReleaseSettings,
        ports::{ContainerRuntime, Filesystem, ProgressReporter, VersionControl},
    };
    pub use crate::domain::{
        CheckKind, CheckSelection, ComplianceReport, ComplianceSettings, Component, Document,
        ProjectInputs,
    };
    pub use crate::error::{ErrorCategory, ScaffoldError, ScaffoldResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
