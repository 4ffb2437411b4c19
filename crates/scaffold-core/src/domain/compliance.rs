//! Compliance check results and the container invocations behind them.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::CheckKind;

// ── Results ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
    Skip,
}

impl CheckStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pass => "\u{2713} PASS",
            Self::Fail => "\u{2717} FAIL",
            Self::Skip => "\u{2298} SKIP",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    pub fn new(kind: CheckKind, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: kind.display_name().to_owned(),
            status,
            message: message.into(),
        }
    }

    pub fn skip(kind: CheckKind, message: impl Into<String>) -> Self {
        Self::new(kind, CheckStatus::Skip, message)
    }

    pub fn fail(kind: CheckKind, message: impl Into<String>) -> Self {
        Self::new(kind, CheckStatus::Fail, message)
    }

    /// Pass on exit code 0, fail otherwise.
    pub fn from_exit_code(kind: CheckKind, code: i32, pass_msg: &str, fail_msg: &str) -> Self {
        if code == 0 {
            Self::new(kind, CheckStatus::Pass, pass_msg)
        } else {
            Self::new(kind, CheckStatus::Fail, fail_msg)
        }
    }
}

/// Results of one compliance run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplianceReport {
    results: Vec<CheckResult>,
}

impl ComplianceReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn failed_count(&self) -> usize {
        self.count(CheckStatus::Fail)
    }

    pub fn count(&self, status: CheckStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Skips never fail a run.
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }
}

impl FromIterator<CheckResult> for ComplianceReport {
    fn from_iter<I: IntoIterator<Item = CheckResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

// ── Invocations ───────────────────────────────────────────────────────────────

/// A `run --rm` call against a container image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInvocation {
    pub image: String,
    pub args: Vec<String>,
    pub volumes: Vec<(String, String)>,
    pub stdin: Option<String>,
}

impl ContainerInvocation {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            args: Vec::new(),
            volumes: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn volume(mut self, host: impl Into<String>, container: impl Into<String>) -> Self {
        self.volumes.push((host.into(), container.into()));
        self
    }

    pub fn stdin(mut self, data: impl Into<String>) -> Self {
        self.stdin = Some(data.into());
        self
    }

    /// Arguments following the engine binary.
    pub fn command_line(&self) -> Vec<String> {
        let mut cmd = vec!["run".to_owned(), "--rm".to_owned()];
        if self.stdin.as_deref().is_some_and(|s| !s.is_empty()) {
            cmd.push("-i".into());
        }
        for (host, container) in &self.volumes {
            cmd.push("-v".into());
            cmd.push(format!("{host}:{container}"));
        }
        cmd.push(self.image.clone());
        cmd.extend(self.args.iter().cloned());
        cmd
    }
}

/// Images used by each check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckImages {
    pub lint: String,
    pub publiccode: String,
    pub reuse: String,
    pub conform: String,
}

impl Default for CheckImages {
    fn default() -> Self {
        Self {
            lint: "oxsecurity/megalinter-python:v9".into(),
            publiccode: "italia/publiccode-parser-go".into(),
            reuse: "docker.io/fsfe/reuse:latest".into(),
            conform: "ghcr.io/siderolabs/conform:latest".into(),
        }
    }
}

pub const DOCKER_SOCKET: &str = "/var/run/docker.sock";
pub const PUBLICCODE_FILE: &str = "publiccode.yaml";

impl CheckImages {
    /// MegaLinter over the project root, with the docker socket for nested runs.
    pub fn lint(&self, root: &Path) -> ContainerInvocation {
        ContainerInvocation::new(&self.lint)
            .args(["-e", "LOG_LEVEL=INFO"])
            .volume(host_path(root), "/tmp/lint")
            .volume(DOCKER_SOCKET, format!("{DOCKER_SOCKET}:rw"))
    }

    /// publiccode.yaml piped on stdin, no network.
    pub fn publiccode(&self, content: String) -> ContainerInvocation {
        ContainerInvocation::new(&self.publiccode)
            .args(["-no-network", "/dev/stdin"])
            .stdin(content)
    }

    pub fn reuse_download(&self, root: &Path) -> ContainerInvocation {
        ContainerInvocation::new(&self.reuse)
            .args(["download", "--all"])
            .volume(host_path(root), "/data")
    }

    pub fn reuse_lint(&self, root: &Path) -> ContainerInvocation {
        ContainerInvocation::new(&self.reuse)
            .arg("lint")
            .volume(host_path(root), "/data")
    }

    pub fn conform(&self, root: &Path, base_branch: &str) -> ContainerInvocation {
        ContainerInvocation::new(&self.conform)
            .args(["enforce".to_owned(), format!("--base-branch={base_branch}")])
            .volume(host_path(root), "/repo")
    }
}

/// Settings for one compliance run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceSettings {
    pub project_root: PathBuf,
    pub compare_branch: String,
    pub images: CheckImages,
}

fn host_path(root: &Path) -> String {
    root.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_do_not_fail_the_run() {
        let report: ComplianceReport = [
            CheckResult::from_exit_code(CheckKind::Lint, 0, "ok", "bad"),
            CheckResult::skip(CheckKind::Commit, "No new commits to validate"),
        ]
        .into_iter()
        .collect();
        assert!(report.is_success());
        assert_eq!(report.count(CheckStatus::Skip), 1);
    }

    #[test]
    fn any_failure_fails_the_run() {
        let mut report = ComplianceReport::new();
        report.push(CheckResult::from_exit_code(CheckKind::Lint, 0, "ok", "bad"));
        report.push(CheckResult::from_exit_code(CheckKind::License, 3, "ok", "bad"));
        assert!(!report.is_success());
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.results()[1].message, "bad");
        assert_eq!(report.results()[1].name, "License");
    }

    #[test]
    fn invocation_renders_volumes_before_image() {
        let inv = CheckImages::default().reuse_lint(Path::new("/src/app"));
        assert_eq!(
            inv.command_line(),
            ["run", "--rm", "-v", "/src/app:/data", "docker.io/fsfe/reuse:latest", "lint"]
        );
    }

    #[test]
    fn stdin_payload_adds_interactive_flag() {
        let inv = CheckImages::default().publiccode("name: x".into());
        assert_eq!(
            inv.command_line(),
            ["run", "--rm", "-i", "italia/publiccode-parser-go", "-no-network", "/dev/stdin"]
        );
    }

    #[test]
    fn empty_stdin_is_not_interactive() {
        let inv = ContainerInvocation::new("img").stdin("");
        assert_eq!(inv.command_line(), ["run", "--rm", "img"]);
    }

    #[test]
    fn lint_mounts_docker_socket() {
        let inv = CheckImages::default().lint(Path::new("/p"));
        let line = inv.command_line();
        assert!(line.contains(&"/var/run/docker.sock:/var/run/docker.sock:rw".to_owned()));
        assert!(line.contains(&"LOG_LEVEL=INFO".to_owned()));
    }

    #[test]
    fn conform_uses_base_branch() {
        let inv = CheckImages::default().conform(Path::new("/p"), "develop");
        assert_eq!(inv.args, ["enforce", "--base-branch=develop"]);
    }

    #[test]
    fn status_labels() {
        assert_eq!(CheckStatus::Pass.to_string(), "✓ PASS");
        assert_eq!(CheckStatus::Fail.to_string(), "✗ FAIL");
        assert_eq!(CheckStatus::Skip.to_string(), "⊘ SKIP");
    }
}
