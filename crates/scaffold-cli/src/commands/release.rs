//! `scaffold release`: show and update component versions.

use tracing::instrument;

use scaffold_adapters::{DockerRuntime, LocalFilesystem};
use scaffold_core::{
    application::release_manager_for,
    domain::{Component, VersionStatus},
};

use crate::{
    cli::{ReleaseAction, ReleaseArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(component = %args.component))]
pub fn execute(args: ReleaseArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let component: Component = args.component.parse()?;
    let manager = release_manager_for(
        component,
        Box::new(LocalFilesystem::new()),
        Box::new(DockerRuntime::new(config.compliance.container_engine.clone())),
        config.release_settings(),
    );

    match args.action {
        ReleaseAction::Current => output.value(&manager.current())?,
        ReleaseAction::Latest => {
            let latest = with_spinner(&output, || manager.latest());
            output.value(&latest)?;
        }
        ReleaseAction::Check => {
            let status = with_spinner(&output, || manager.check_update());
            return report_status(component, &status, &output);
        }
        ReleaseAction::Update { version } => {
            let written = match version.as_deref() {
                Some(v) => manager.update(Some(v))?,
                None => with_spinner(&output, || manager.update(None))?,
            };
            output.success(&format!("Updated {component} version to {written}"))?;
        }
    }
    Ok(())
}

fn report_status(
    component: Component,
    status: &VersionStatus,
    output: &OutputManager,
) -> CliResult<()> {
    output.print(&format!("Current {component} version: {}", status.current))?;
    output.print(&format!("Latest {component} version:  {}", status.latest))?;
    output.print("")?;

    if status.update_available {
        output.warning(&format!(
            "Updates available! Run 'scaffold release {component} update' to upgrade"
        ))?;
        return Err(CliError::UpdateAvailable {
            current: status.current.clone(),
            latest: status.latest.clone(),
        });
    }

    output.success(&format!("{} is up to date", capitalize(component.as_str())))?;
    Ok(())
}

/// Pulling the published image can take a while.
fn with_spinner<T>(output: &OutputManager, f: impl FnOnce() -> T) -> T {
    let spinner = output.spinner("Looking up the published version...");
    let result = f();
    spinner.finish_and_clear();
    result
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
