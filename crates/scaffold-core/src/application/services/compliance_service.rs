//! Compliance Service - runs containerised quality checks one by one.
//!
//! Each check is a single container invocation judged by its exit code.
//! A check that cannot even start is recorded as failed; the remaining
//! checks still run.

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{ContainerRuntime, Filesystem, ProgressReporter, VersionControl},
    domain::{
        CheckKind, CheckResult, CheckSelection, ComplianceReport, ComplianceSettings,
        compliance::PUBLICCODE_FILE,
    },
    error::ScaffoldResult,
};

/// Timeout for the `<engine> --version` availability probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const CHECK_FAILED: &str = "Check failed, see logs above";

pub struct ComplianceService {
    runtime: Box<dyn ContainerRuntime>,
    vcs: Box<dyn VersionControl>,
    filesystem: Box<dyn Filesystem>,
    reporter: Box<dyn ProgressReporter>,
    settings: ComplianceSettings,
}

impl ComplianceService {
    pub fn new(
        runtime: Box<dyn ContainerRuntime>,
        vcs: Box<dyn VersionControl>,
        filesystem: Box<dyn Filesystem>,
        reporter: Box<dyn ProgressReporter>,
        settings: ComplianceSettings,
    ) -> Self {
        Self {
            runtime,
            vcs,
            filesystem,
            reporter,
            settings,
        }
    }

    pub fn settings(&self) -> &ComplianceSettings {
        &self.settings
    }

    /// Make sure the container engine answers before any check runs.
    pub fn probe(&self) -> ScaffoldResult<()> {
        self.runtime.probe(PROBE_TIMEOUT)
    }

    /// Probe, then run every selected check in order.
    #[instrument(skip(self))]
    pub fn run(&self, selection: CheckSelection) -> ScaffoldResult<ComplianceReport> {
        self.probe()?;
        Ok(selection
            .kinds()
            .into_iter()
            .map(|kind| self.run_check(kind))
            .collect())
    }

    /// Run one check. Never fails: problems become a FAIL result.
    #[instrument(skip(self), fields(check = %kind))]
    pub fn run_check(&self, kind: CheckKind) -> CheckResult {
        self.reporter.header(kind.title());
        let result = match kind {
            CheckKind::Lint => self.check_lint(),
            CheckKind::PublicCode => self.check_publiccode(),
            CheckKind::License => self.check_license(),
            CheckKind::Commit => self.check_commit(),
        };
        info!(status = %result.status, "Check finished");
        result
    }

    fn check_lint(&self) -> CheckResult {
        let invocation = self.settings.images.lint(&self.settings.project_root);
        self.run_container(CheckKind::Lint, &invocation, "Check passed", CHECK_FAILED)
    }

    fn check_publiccode(&self) -> CheckResult {
        let path = self.settings.project_root.join(PUBLICCODE_FILE);
        if !self.filesystem.exists(&path) {
            return CheckResult::skip(CheckKind::PublicCode, "publiccode.yaml not found");
        }

        let content = match self.filesystem.read_to_string(&path) {
            Ok(content) => content,
            Err(e) => return CheckResult::fail(CheckKind::PublicCode, format!("Error: {e}")),
        };
        let invocation = self.settings.images.publiccode(content);
        self.run_container(
            CheckKind::PublicCode,
            &invocation,
            "Validation passed",
            "Validation failed, see logs above",
        )
    }

    fn check_license(&self) -> CheckResult {
        let root = &self.settings.project_root;

        self.reporter
            .info("Downloading missing licenses from SPDX registry...");
        let download = self.settings.images.reuse_download(root);
        match self.runtime.run(&download) {
            Ok(0) => self.reporter.ok("Licenses downloaded successfully"),
            Ok(code) => {
                debug!(code, "License download exited non-zero");
                self.reporter
                    .info("License download completed with warnings (proceeding with lint)");
            }
            Err(e) => {
                warn!(error = %e, "License download could not run");
                self.reporter
                    .info("License download completed with warnings (proceeding with lint)");
            }
        }

        self.reporter
            .info("Running license compliance lint check...");
        let lint = self.settings.images.reuse_lint(root);
        self.run_container(
            CheckKind::License,
            &lint,
            "License compliance check passed",
            "License check failed, see logs above",
        )
    }

    fn check_commit(&self) -> CheckResult {
        let root = &self.settings.project_root;
        let base = &self.settings.compare_branch;

        let ahead = match self.vcs.commits_ahead(root, base) {
            Ok(n) => n,
            Err(e) => return CheckResult::fail(CheckKind::Commit, format!("Error: {e}")),
        };

        if ahead == 0 {
            let branch = self.vcs.current_branch(root).unwrap_or_default();
            self.reporter
                .info(&format!("No commits found in {branch}, compared to {base}"));
            return CheckResult::skip(CheckKind::Commit, "No new commits to validate");
        }

        debug!(ahead, base = %base, "Validating commits");
        let invocation = self.settings.images.conform(root, base);
        self.run_container(CheckKind::Commit, &invocation, "Check passed", CHECK_FAILED)
    }

    fn run_container(
        &self,
        kind: CheckKind,
        invocation: &crate::domain::ContainerInvocation,
        pass_msg: &str,
        fail_msg: &str,
    ) -> CheckResult {
        match self.runtime.run(invocation) {
            Ok(code) => CheckResult::from_exit_code(kind, code, pass_msg, fail_msg),
            Err(e) => {
                warn!(error = %e, image = %invocation.image, "Container run failed");
                CheckResult::fail(kind, format!("Error: {e}"))
            }
        }
    }
}
