//! Configuration merge service.
//!
//! Orchestrates the merge workflow:
//! 1. Load the project document (required) and defaults (optional)
//! 2. Activate feature bundles
//! 3. Validate the merged document
//! 4. Write it out

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ProgressReporter},
    },
    domain::{
        Document, FeatureFlags, activate, document::display_scalar, lookup, parse_document,
        render_document, summarize, validate_config,
    },
    error::ScaffoldResult,
};

/// Depth used when logging the merged document.
const SUMMARY_DEPTH: usize = 3;

/// Where the merge reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePaths {
    pub defaults: PathBuf,
    pub project: PathBuf,
    pub output: PathBuf,
}

impl Default for MergePaths {
    fn default() -> Self {
        Self {
            defaults: PathBuf::from("vars/defaults.yaml"),
            project: PathBuf::from("/tmp/project.yaml"),
            output: PathBuf::from("/tmp/merged_config.yaml"),
        }
    }
}

/// Outcome of a successful merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    /// `image.name` of the merged document, or `unknown`.
    pub image_name: String,
    /// Feature flags as declared in the project document.
    pub features: Vec<(String, bool)>,
    pub defaults_loaded: bool,
    pub output: PathBuf,
    pub merged: Document,
}

pub struct ConfigMergeService {
    filesystem: Box<dyn Filesystem>,
    reporter: Box<dyn ProgressReporter>,
}

impl ConfigMergeService {
    pub fn new(filesystem: Box<dyn Filesystem>, reporter: Box<dyn ProgressReporter>) -> Self {
        Self {
            filesystem,
            reporter,
        }
    }

    /// Run the whole merge. Nothing is written unless validation passes.
    #[instrument(skip_all, fields(project = %paths.project.display(), output = %paths.output.display()))]
    pub fn run(&self, paths: &MergePaths) -> ScaffoldResult<MergeReport> {
        if !self.filesystem.exists(&paths.project) {
            return Err(ApplicationError::MissingInput {
                path: paths.project.clone(),
            }
            .into());
        }

        let (defaults, defaults_loaded) = self.load_defaults(&paths.defaults)?;
        let project = self.load(&paths.project)?;
        self.reporter
            .ok(&format!("Loaded project from {}", paths.project.display()));

        self.reporter
            .info("Merging configurations with feature bundles...");
        let merged = activate(&defaults, &project);
        for line in summarize(&merged, SUMMARY_DEPTH) {
            debug!(target: "scaffold_core::merge", "{line}");
        }

        let features: Vec<(String, bool)> = FeatureFlags::from_project(&project)
            .iter()
            .map(|(name, on)| (name.to_owned(), on))
            .collect();

        self.reporter.info("Validating configuration...");
        let violations = validate_config(&merged);
        if !violations.is_empty() {
            warn!(count = violations.len(), "Merged configuration is invalid");
            return Err(ApplicationError::InvalidConfiguration {
                violations: violations.iter().map(ToString::to_string).collect(),
            }
            .into());
        }

        let image_name = lookup(&merged, "image.name")
            .map(display_scalar)
            .unwrap_or_else(|| "unknown".into());
        self.reporter
            .ok(&format!("Validation passed for image: {image_name}"));

        let rendered = render_document(&merged)?;
        self.filesystem.write_file(&paths.output, &rendered)?;
        info!(output = %paths.output.display(), "Merged configuration written");

        Ok(MergeReport {
            image_name,
            features,
            defaults_loaded,
            output: paths.output.clone(),
            merged,
        })
    }

    fn load_defaults(&self, path: &Path) -> ScaffoldResult<(Document, bool)> {
        if !self.filesystem.exists(path) {
            self.reporter.warn(&format!(
                "{} not found, using project file only",
                path.display()
            ));
            return Ok((Document::new(), false));
        }
        let defaults = self.load(path)?;
        self.reporter
            .ok(&format!("Loaded defaults from {}", path.display()));
        Ok((defaults, true))
    }

    fn load(&self, path: &Path) -> ScaffoldResult<Document> {
        let text = self.filesystem.read_to_string(path)?;
        parse_document(&text).map_err(|e| {
            ApplicationError::MalformedInput {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::{MockFilesystem, SilentReporter};
    use crate::error::{ErrorCategory, ScaffoldError};

    const DEFAULTS: &str = "\
metadata: {license: MIT}
image: {name: base, description: Base}
github: {workflows: true, issues: true}
";

    type Written = Arc<Mutex<HashMap<PathBuf, String>>>;

    fn filesystem(files: &[(&str, &str)], written: Written) -> MockFilesystem {
        let files: HashMap<PathBuf, String> = files
            .iter()
            .map(|(p, c)| (PathBuf::from(p), (*c).to_owned()))
            .collect();
        let present = files.clone();

        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(move |p| present.contains_key(p));
        fs.expect_read_to_string().returning(move |p| {
            files.get(p).cloned().ok_or_else(|| {
                ApplicationError::MissingInput {
                    path: p.to_path_buf(),
                }
                .into()
            })
        });
        fs.expect_write_file().returning(move |p, c| {
            written
                .lock()
                .unwrap()
                .insert(p.to_path_buf(), c.to_owned());
            Ok(())
        });
        fs
    }

    fn service(files: &[(&str, &str)]) -> (ConfigMergeService, Written) {
        let written: Written = Arc::default();
        let fs = filesystem(files, written.clone());
        (
            ConfigMergeService::new(Box::new(fs), Box::new(SilentReporter)),
            written,
        )
    }

    #[test]
    fn merges_and_writes_output() {
        let paths = MergePaths::default();
        let (svc, written) = service(&[
            ("vars/defaults.yaml", DEFAULTS),
            (
                "/tmp/project.yaml",
                "image: {name: myapp}\nfeatures: {github: true}\ngithub: {issues: false}",
            ),
        ]);

        let report = svc.run(&paths).unwrap();
        assert_eq!(report.image_name, "myapp");
        assert!(report.defaults_loaded);
        assert_eq!(report.features, [("github".to_owned(), true)]);

        let out = written.lock().unwrap();
        let text = out.get(&paths.output).expect("output written");
        let merged = parse_document(text).unwrap();
        assert_eq!(
            lookup(&merged, "github.workflows").and_then(|v| v.as_bool()),
            Some(true)
        );
        assert_eq!(
            lookup(&merged, "github.issues").and_then(|v| v.as_bool()),
            Some(false)
        );
    }

    #[test]
    fn missing_project_file_is_reported() {
        let (svc, written) = service(&[("vars/defaults.yaml", DEFAULTS)]);
        let err = svc.run(&MergePaths::default()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Application(ApplicationError::MissingInput { .. })
        ));
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_defaults_fall_back_to_project_only() {
        let (svc, _) = service(&[(
            "/tmp/project.yaml",
            "image: {name: solo}\nmetadata: {license: MIT}",
        )]);
        let report = svc.run(&MergePaths::default()).unwrap();
        assert!(!report.defaults_loaded);
        assert_eq!(report.image_name, "solo");
    }

    #[test]
    fn malformed_project_names_the_file() {
        let (svc, _) = service(&[("/tmp/project.yaml", "image: [unclosed")]);
        let err = svc.run(&MergePaths::default()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Malformed);
        assert!(err.to_string().contains("/tmp/project.yaml"));
    }

    #[test]
    fn validation_failure_writes_nothing() {
        let (svc, written) = service(&[
            ("vars/defaults.yaml", DEFAULTS),
            (
                "/tmp/project.yaml",
                "image: {name: ''}\nbuild: {platforms: [linux/bogus]}",
            ),
        ]);
        let err = svc.run(&MergePaths::default()).unwrap_err();
        assert_eq!(err.violations().len(), 2);
        assert!(err.violations()[1].contains("linux/bogus"));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn progress_is_reported() {
        let mut reporter = crate::application::ports::MockProgressReporter::new();
        reporter
            .expect_ok()
            .withf(|m: &str| m.starts_with("Loaded") || m.starts_with("Validation passed"))
            .times(3)
            .return_const(());
        reporter.expect_info().return_const(());
        reporter.expect_warn().never();

        let written: Written = Arc::default();
        let fs = filesystem(
            &[
                ("vars/defaults.yaml", DEFAULTS),
                ("/tmp/project.yaml", "image: {name: x}"),
            ],
            written,
        );
        let svc = ConfigMergeService::new(Box::new(fs), Box::new(reporter));
        svc.run(&MergePaths::default()).unwrap();
    }
}
