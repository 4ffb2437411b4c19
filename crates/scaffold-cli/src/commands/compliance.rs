//! `scaffold compliance`: run the containerised quality checks.

use tracing::{debug, instrument};

use scaffold_adapters::{DockerRuntime, GitCli, LocalFilesystem};
use scaffold_core::{application::ComplianceService, domain::CheckSelection};

use crate::{
    cli::ComplianceArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Run the selected checks and print the summary table.
///
/// An unknown check name fails before the engine is probed; an engine that
/// does not answer fails before any check runs.
#[instrument(skip_all, fields(check = %args.check))]
pub fn execute(args: ComplianceArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let selection: CheckSelection = args.check.parse()?;

    let cwd = std::env::current_dir().with_cli_context(|| "Failed to read the current directory")?;
    let settings = config.compliance_settings(&cwd);
    debug!(
        root = %settings.project_root.display(),
        engine = %config.compliance.container_engine,
        base = %settings.compare_branch,
        "Compliance settings"
    );

    let service = ComplianceService::new(
        Box::new(DockerRuntime::new(config.compliance.container_engine.clone())),
        Box::new(GitCli::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(output.clone()),
        settings,
    );

    output.banner("CODE QUALITY & COMPLIANCE CHECKS")?;
    let report = service.run(selection)?;
    output.summary(&report)?;

    if report.is_success() {
        return Ok(());
    }
    let err = CliError::ChecksFailed {
        failed: report.failed_count(),
    };
    output.error(&err.to_string())?;
    Err(err)
}
