//! `scaffold merge`: build the configuration the provisioning pipeline reads.

use tracing::{debug, instrument};

use scaffold_adapters::LocalFilesystem;
use scaffold_core::application::{ConfigMergeService, MergeReport};

use crate::{cli::MergeArgs, config::AppConfig, error::CliResult, output::OutputManager};

const RULE_WIDTH: usize = 70;

/// Merge defaults with the project file and write the result.
///
/// Missing project file, parse errors and validation failures all come back
/// as core errors; `main` prints them with their suggestions.
#[instrument(skip_all)]
pub fn execute(args: MergeArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let paths = config.merge_paths(args.defaults, args.project, args.output);
    debug!(?paths, "Merge paths resolved");

    output.rule(RULE_WIDTH)?;
    output.print("Scaffold Configuration Merger")?;
    output.rule(RULE_WIDTH)?;

    let service = ConfigMergeService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(output.clone()),
    );
    let report = service.run(&paths)?;

    show_features(&report, &output)?;
    output.success(&format!("Generated {}", report.output.display()))?;

    output.rule(RULE_WIDTH)?;
    output.print(&format!("\u{1f389} Configuration ready for: {}", report.image_name))?;
    output.rule(RULE_WIDTH)?;
    output.print(&format!(
        "\nNext: the provisioning pipeline will use {} to generate the project",
        report.output.display()
    ))?;
    Ok(())
}

fn show_features(report: &MergeReport, output: &OutputManager) -> CliResult<()> {
    if report.features.is_empty() {
        return Ok(());
    }
    output.print("\nActivated features:")?;
    for (name, enabled) in &report.features {
        output.print(&feature_line(name, *enabled))?;
    }
    Ok(())
}

fn feature_line(name: &str, enabled: bool) -> String {
    let mark = if enabled { "\u{2713}" } else { "\u{25cb}" };
    format!("  {mark} {name}: {enabled}")
}
