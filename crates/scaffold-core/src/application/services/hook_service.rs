//! Generation hooks: checks before a project is rendered and license
//! housekeeping after.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{
        LicensePlan, LicenseSelection, ProjectInputs, license::LICENSE_FILE, plan_license,
    },
    error::ScaffoldResult,
};

/// What post-generation did with the license templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseOutcome {
    /// Closed source: templates removed, no `LICENSE`.
    NoLicense { removed: usize },
    /// `LICENSE` written from the chosen template; templates removed.
    Installed { license: String, removed: usize },
    /// The chosen template was absent; nothing was touched.
    TemplateMissing { expected: String },
}

pub struct HookService {
    filesystem: Box<dyn Filesystem>,
}

impl HookService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Validate template variables before anything is generated.
    #[instrument(skip_all, fields(project = %inputs.project_name))]
    pub fn pre_generate(&self, inputs: &ProjectInputs) -> ScaffoldResult<()> {
        inputs.validate()?;
        info!("Pre-generation inputs are valid");
        Ok(())
    }

    /// Resolve `LICENSE.<choice>` templates in `project_dir`.
    #[instrument(skip(self), fields(dir = %project_dir.display()))]
    pub fn post_generate(&self, project_dir: &Path, license: &str) -> ScaffoldResult<LicenseOutcome> {
        let files = self.filesystem.list_files(project_dir)?;
        let plan = plan_license(&LicenseSelection::parse(license), &files);
        debug!(?plan, "License plan");

        match plan {
            LicensePlan::RemoveAll { templates } => {
                let removed = self.remove_all(project_dir, &templates)?;
                Ok(LicenseOutcome::NoLicense { removed })
            }
            LicensePlan::Install {
                license,
                source,
                templates,
            } => {
                self.filesystem
                    .copy_file(&project_dir.join(&source), &project_dir.join(LICENSE_FILE))?;
                let removed = self.remove_all(project_dir, &templates)?;
                Ok(LicenseOutcome::Installed { license, removed })
            }
            LicensePlan::TemplateMissing { expected, .. } => {
                Ok(LicenseOutcome::TemplateMissing { expected })
            }
        }
    }

    fn remove_all(&self, dir: &Path, templates: &[String]) -> ScaffoldResult<usize> {
        for name in templates {
            let path: PathBuf = dir.join(name);
            self.filesystem.remove_file(&path)?;
        }
        Ok(templates.len())
    }
}
