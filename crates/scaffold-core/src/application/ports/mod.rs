//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `scaffold-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ContainerRuntime`: Container image execution
//!   - `VersionControl`: Commit queries for the checked project
//!   - `ProgressReporter`: User-facing progress lines
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `ReleaseManager`, implemented by `TemplateReleaseManager`

pub mod output;

pub use output::{
    CapturedOutput, ContainerRuntime, Filesystem, ProgressReporter, SilentReporter,
    VersionControl,
};

#[cfg(test)]
pub use output::{
    MockContainerRuntime, MockFilesystem, MockProgressReporter, MockVersionControl,
};
