//! `scaffold hook`: checks and housekeeping around template generation.

use tracing::{debug, instrument};

use scaffold_adapters::LocalFilesystem;
use scaffold_core::{
    application::{HookService, LicenseOutcome},
    domain::ProjectInputs,
};

use crate::{
    cli::{HookCommands, PostGenArgs, PreGenArgs},
    error::CliResult,
    output::OutputManager,
};

const RULE_WIDTH: usize = 60;

const HELP_URL: &str = "https://github.com/broadsage/docker-scaffold/discussions";
const DOCS_URL: &str = "https://github.com/broadsage/docker-scaffold/blob/main/README.md";

pub fn execute(cmd: HookCommands, output: OutputManager) -> CliResult<()> {
    let service = HookService::new(Box::new(LocalFilesystem::new()));
    match cmd {
        HookCommands::PreGen(args) => pre_gen(&service, args, &output),
        HookCommands::PostGen(args) => post_gen(&service, args, &output),
    }
}

#[instrument(skip_all)]
fn pre_gen(service: &HookService, args: PreGenArgs, output: &OutputManager) -> CliResult<()> {
    let inputs = ProjectInputs::new(args.project_name, args.email, args.organization);
    service.pre_generate(&inputs)?;

    output.print("")?;
    output.rule(RULE_WIDTH)?;
    output.success("Pre-generation validation successful!")?;
    output.rule(RULE_WIDTH)?;
    output.print(&format!("  Project:      {}", inputs.project_name))?;
    output.print(&format!("  Email:        {}", inputs.maintainer_email))?;
    output.print(&format!("  Organization: {}", inputs.organization_label()))?;
    output.rule(RULE_WIDTH)?;
    output.print("")?;
    Ok(())
}

#[instrument(skip_all, fields(slug = %args.project_slug))]
fn post_gen(service: &HookService, args: PostGenArgs, output: &OutputManager) -> CliResult<()> {
    match service.post_generate(&args.dir, &args.license)? {
        LicenseOutcome::NoLicense { removed } => {
            debug!(removed, "License templates removed");
            output.event("\u{1f4cb}", "No open source license selected")?;
        }
        LicenseOutcome::Installed { license, removed } => {
            debug!(removed, "License templates removed");
            output.event("\u{1f4dc}", &format!("License file created: {license}"))?;
        }
        LicenseOutcome::TemplateMissing { expected } => {
            output.event(
                "\u{26a0}\u{fe0f} ",
                &format!("License template not found: {expected}"),
            )?;
        }
    }

    next_steps(&args.project_slug, output)
}

fn next_steps(slug: &str, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.event("\u{2705}", &format!("Project '{slug}' initialized successfully"))?;
    output.event(
        "\u{1f4e6}",
        "Generated: project.yaml, Taskfile.yml, README.md, .gitignore, LICENSE",
    )?;
    output.event("\u{1f4dd}", &format!("Configuration: {slug}/project.yaml"))?;
    output.print("")?;
    output.event("\u{1f680}", "Next Steps:")?;
    output.print("")?;
    for line in step_lines(slug) {
        output.print(&line)?;
    }
    output.print("")?;
    output.event(
        "\u{1f4a1}",
        "Customize: Edit project.yaml and run 'task generate' again",
    )?;
    output.event("\u{2753}", &format!("Help: {HELP_URL}"))?;
    output.event("\u{1f4da}", &format!("Docs: {DOCS_URL}"))?;
    output.print("")?;
    Ok(())
}

fn step_lines(slug: &str) -> [String; 4] {
    [
        format!("  1. cd {slug}"),
        "  2. task generate           # Generate full project with Docker".into(),
        "  3. task build              # Build Docker image".into(),
        "  4. task compliance         # Run code quality checks".into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_enters_the_project() {
        let steps = step_lines("my-image");
        assert_eq!(steps[0], "  1. cd my-image");
        assert!(steps[3].contains("task compliance"));
    }
}
