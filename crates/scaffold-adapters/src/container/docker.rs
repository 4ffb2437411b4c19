//! Container runtime adapter driving a docker-compatible CLI.

use std::io::Write;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use scaffold_core::{
    application::{
        ApplicationError,
        ports::{CapturedOutput, ContainerRuntime},
    },
    domain::ContainerInvocation,
    error::{ScaffoldError, ScaffoldResult},
};
use tracing::{debug, instrument, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs invocations through `<engine> run --rm ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerRuntime {
    engine: String,
}

impl DockerRuntime {
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
        }
    }

    fn command(&self, invocation: &ContainerInvocation) -> Command {
        let mut cmd = Command::new(&self.engine);
        cmd.args(invocation.command_line());
        cmd
    }

    fn describe(&self, invocation: &ContainerInvocation) -> String {
        format!("{} run {}", self.engine, invocation.image)
    }

    fn process_failed(&self, invocation: &ContainerInvocation, e: std::io::Error) -> ScaffoldError {
        ApplicationError::ProcessFailed {
            command: self.describe(invocation),
            reason: e.to_string(),
        }
        .into()
    }

    fn unavailable(&self, reason: impl Into<String>) -> ScaffoldError {
        ApplicationError::RuntimeUnavailable {
            engine: self.engine.clone(),
            reason: reason.into(),
        }
        .into()
    }
}

impl Default for DockerRuntime {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl ContainerRuntime for DockerRuntime {
    fn engine(&self) -> String {
        self.engine.clone()
    }

    #[instrument(skip(self), fields(engine = %self.engine))]
    fn probe(&self, timeout: Duration) -> ScaffoldResult<()> {
        let mut child = Command::new(&self.engine)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.unavailable(e.to_string()))?;

        match wait_with_timeout(&mut child, timeout) {
            Ok(Some(status)) if status.success() => {
                debug!("Container engine available");
                Ok(())
            }
            Ok(Some(status)) => Err(self.unavailable(format!("--version exited with {status}"))),
            Ok(None) => Err(self.unavailable(format!(
                "--version did not answer within {}s",
                timeout.as_secs()
            ))),
            Err(e) => Err(self.unavailable(e.to_string())),
        }
    }

    #[instrument(skip_all, fields(image = %invocation.image))]
    fn run(&self, invocation: &ContainerInvocation) -> ScaffoldResult<i32> {
        let mut cmd = self.command(invocation);
        let payload = invocation.stdin.as_deref().filter(|s| !s.is_empty());
        cmd.stdin(if payload.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });
        debug!(args = ?invocation.command_line(), "Running container");

        let mut child = cmd
            .spawn()
            .map_err(|e| self.process_failed(invocation, e))?;

        if let (Some(data), Some(mut stdin)) = (payload, child.stdin.take()) {
            if let Err(e) = stdin.write_all(data.as_bytes()) {
                warn!(error = %e, "Could not write container stdin");
            }
        }

        let status = child
            .wait()
            .map_err(|e| self.process_failed(invocation, e))?;
        Ok(exit_code(status))
    }

    #[instrument(skip_all, fields(image = %invocation.image))]
    fn capture(&self, invocation: &ContainerInvocation) -> ScaffoldResult<CapturedOutput> {
        let output = self
            .command(invocation)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| self.process_failed(invocation, e))?;

        Ok(CapturedOutput {
            exit_code: exit_code(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    fn pull(&self, image: &str) -> ScaffoldResult<i32> {
        let status = Command::new(&self.engine)
            .args(["pull", image])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ApplicationError::ProcessFailed {
                command: format!("{} pull {image}", self.engine),
                reason: e.to_string(),
            })?;
        Ok(exit_code(status))
    }
}

/// Poll until the child exits or `timeout` passes. A timed-out child is killed.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let started = Instant::now();
    loop {
        match child.try_wait()? {
            Some(status) => return Ok(Some(status)),
            None if started.elapsed() >= timeout => {
                let _ = child.kill();
                let _ = child.wait();
                return Ok(None);
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    }
}

/// Signal deaths count as failure.
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use scaffold_core::error::ErrorCategory;

    #[test]
    fn missing_engine_is_unavailable() {
        let rt = DockerRuntime::new("scaffold-no-such-engine");
        let err = rt.probe(Duration::from_secs(1)).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unavailable);
        assert_eq!(err.to_string(), "scaffold-no-such-engine not found");
    }

    #[test]
    fn probe_accepts_answering_engine() {
        assert!(DockerRuntime::new("true").probe(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn failing_probe_is_unavailable() {
        let err = DockerRuntime::new("false")
            .probe(Duration::from_secs(5))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unavailable);
    }

    #[test]
    fn run_returns_exit_code() {
        let inv = ContainerInvocation::new("img");
        assert_eq!(DockerRuntime::new("true").run(&inv).unwrap(), 0);
        assert_eq!(DockerRuntime::new("false").run(&inv).unwrap(), 1);
    }

    #[test]
    fn capture_sees_rendered_command_line() {
        let inv = ContainerInvocation::new("ghcr.io/x/y:latest").args(["cat", "/app/VERSION"]);
        let out = DockerRuntime::new("echo").capture(&inv).unwrap();
        assert_eq!(out.exit_code, 0);
        assert_eq!(out.stdout.trim(), "run --rm ghcr.io/x/y:latest cat /app/VERSION");
    }

    #[test]
    fn spawn_failure_is_process_failed() {
        let err = DockerRuntime::new("scaffold-no-such-engine")
            .run(&ContainerInvocation::new("img"))
            .unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Application(ApplicationError::ProcessFailed { .. })
        ));
    }
}
