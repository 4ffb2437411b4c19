//! Git adapter shelling out to the `git` binary.

use std::path::Path;
use std::process::{Command, Output, Stdio};

use scaffold_core::{
    application::{ApplicationError, ports::VersionControl},
    error::ScaffoldResult,
};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".into(),
        }
    }

    fn git(&self, repo: &Path, args: &[&str]) -> ScaffoldResult<Output> {
        Command::new(&self.program)
            .args(args)
            .current_dir(repo)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| {
                ApplicationError::ProcessFailed {
                    command: format!("{} {}", self.program, args.join(" ")),
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitCli {
    fn current_branch(&self, repo: &Path) -> ScaffoldResult<String> {
        let out = self.git(repo, &["branch", "--show-current"])?;
        if !out.status.success() {
            return Ok(String::new());
        }
        Ok(String::from_utf8_lossy(&out.stdout).trim().to_owned())
    }

    fn commits_ahead(&self, repo: &Path, base: &str) -> ScaffoldResult<u64> {
        let range = format!("{base}..");
        let out = self.git(repo, &["rev-list", "--count", &range])?;
        if !out.status.success() {
            debug!(base, "rev-list failed; treating as no new commits");
            return Ok(0);
        }

        let text = String::from_utf8_lossy(&out.stdout);
        text.trim().parse().map_err(|e: std::num::ParseIntError| {
            ApplicationError::ProcessFailed {
                command: format!("{} rev-list --count {range}", self.program),
                reason: format!("unexpected output '{}': {e}", text.trim()),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }

    #[test]
    fn outside_a_repository_nothing_is_ahead() {
        if !git_available() {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        let git = GitCli::new();
        assert_eq!(git.commits_ahead(tmp.path(), "main").unwrap(), 0);
        assert_eq!(git.current_branch(tmp.path()).unwrap(), "");
    }

    #[test]
    fn missing_binary_is_process_failed() {
        let git = GitCli {
            program: "scaffold-no-such-git".into(),
        };
        let tmp = tempfile::tempdir().unwrap();
        assert!(git.commits_ahead(tmp.path(), "main").is_err());
    }
}
