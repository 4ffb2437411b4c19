//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `scaffold-adapters` crate provides implementations.

use std::path::Path;
use std::time::Duration;

use crate::domain::ContainerInvocation;
use crate::error::ScaffoldResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `scaffold_adapters::filesystem::LocalFilesystem` (production)
/// - `scaffold_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> ScaffoldResult<String>;

    /// Write content to a file, creating missing parent directories.
    fn write_file(&self, path: &Path, content: &str) -> ScaffoldResult<()>;

    /// Copy a file's content over `to`.
    fn copy_file(&self, from: &Path, to: &Path) -> ScaffoldResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> ScaffoldResult<()>;

    /// Names of the regular files directly inside `dir`, sorted.
    fn list_files(&self, dir: &Path) -> ScaffoldResult<Vec<String>>;
}

/// Exit status and standard output of a captured container run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapturedOutput {
    pub exit_code: i32,
    pub stdout: String,
}

/// Port for the container engine (`docker`, `podman`, ...).
#[cfg_attr(test, mockall::automock)]
pub trait ContainerRuntime: Send + Sync {
    /// Binary name, used in messages.
    fn engine(&self) -> String;

    /// Fail with `RuntimeUnavailable` unless `<engine> --version` succeeds
    /// within `timeout`.
    fn probe(&self, timeout: Duration) -> ScaffoldResult<()>;

    /// Run with output inherited by the terminal; returns the exit code.
    fn run(&self, invocation: &ContainerInvocation) -> ScaffoldResult<i32>;

    /// Run with stdout captured and stderr discarded.
    fn capture(&self, invocation: &ContainerInvocation) -> ScaffoldResult<CapturedOutput>;

    /// Pull an image quietly; the exit code is returned, not judged.
    fn pull(&self, image: &str) -> ScaffoldResult<i32>;
}

/// Port for the version-control system of the checked project.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    /// Name of the checked-out branch; empty when detached or unknown.
    fn current_branch(&self, repo: &Path) -> ScaffoldResult<String>;

    /// Commits on HEAD not reachable from `base`. Zero when `base` is unknown.
    fn commits_ahead(&self, repo: &Path, base: &str) -> ScaffoldResult<u64>;
}

/// Port for user-facing progress while long steps run.
///
/// Implemented by the CLI's output manager; services never print directly.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter: Send + Sync {
    /// A step heading, e.g. the name of a compliance check.
    fn header(&self, title: &str);

    fn info(&self, message: &str);

    fn ok(&self, message: &str);

    fn warn(&self, message: &str);
}

/// Reporter that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn header(&self, _title: &str) {}
    fn info(&self, _message: &str) {}
    fn ok(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}
