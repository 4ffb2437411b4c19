//! Infrastructure adapters for Scaffold.
//!
//! This crate implements the ports defined in `scaffold-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod container;
pub mod filesystem;
pub mod vcs;

// Re-export commonly used adapters
pub use container::DockerRuntime;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use vcs::GitCli;
