//! Release management for versioned components.
//!
//! [`ReleaseManager`] is the driving port; each supported [`Component`] has
//! one implementation, built by [`release_manager_for`].

use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ContainerRuntime, Filesystem},
    },
    domain::{
        Component, ContainerInvocation, VersionStatus, parse_document, read_template_version,
        release::{LATEST, UNKNOWN},
        set_template_version,
    },
    error::ScaffoldResult,
};

/// Version operations on one component.
pub trait ReleaseManager {
    /// Currently configured version, or `unknown`.
    fn current(&self) -> String;

    /// Latest published version, or `latest` when it cannot be determined.
    fn latest(&self) -> String;

    /// Set the configured version; `None` means the latest one.
    /// Returns the version that was written.
    fn update(&self, version: Option<&str>) -> ScaffoldResult<String>;

    fn check_update(&self) -> VersionStatus {
        VersionStatus::compare(self.current(), self.latest())
    }
}

/// Where the template version lives and where new releases come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSettings {
    pub project_file: PathBuf,
    pub image: String,
}

impl Default for ReleaseSettings {
    fn default() -> Self {
        Self {
            project_file: PathBuf::from("project.yaml"),
            image: "ghcr.io/broadsage/scaffold".into(),
        }
    }
}

/// Version of the template recorded in the project file.
pub struct TemplateReleaseManager {
    filesystem: Box<dyn Filesystem>,
    runtime: Box<dyn ContainerRuntime>,
    settings: ReleaseSettings,
}

/// Path of the version marker inside the published image.
const VERSION_FILE: &str = "/app/VERSION";

impl TemplateReleaseManager {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        runtime: Box<dyn ContainerRuntime>,
        settings: ReleaseSettings,
    ) -> Self {
        Self {
            filesystem,
            runtime,
            settings,
        }
    }

    fn latest_image(&self) -> String {
        format!("{}:latest", self.settings.image)
    }
}

impl ReleaseManager for TemplateReleaseManager {
    fn current(&self) -> String {
        let path = &self.settings.project_file;
        if !self.filesystem.exists(path) {
            return UNKNOWN.into();
        }
        let version = self
            .filesystem
            .read_to_string(path)
            .ok()
            .and_then(|text| parse_document(&text).ok())
            .and_then(|doc| read_template_version(&doc));
        version.unwrap_or_else(|| UNKNOWN.into())
    }

    #[instrument(skip(self), fields(image = %self.settings.image))]
    fn latest(&self) -> String {
        let image = self.latest_image();
        match self.runtime.pull(&image) {
            Ok(code) if code != 0 => debug!(code, "Pull exited non-zero; using local image"),
            Ok(_) => {}
            Err(e) => debug!(error = %e, "Pull could not run"),
        }

        let invocation = ContainerInvocation::new(image).args(["cat", VERSION_FILE]);
        match self.runtime.capture(&invocation) {
            Ok(out) if out.exit_code == 0 && !out.stdout.trim().is_empty() => {
                out.stdout.trim().to_owned()
            }
            Ok(out) => {
                debug!(code = out.exit_code, "No version in image");
                LATEST.into()
            }
            Err(e) => {
                warn!(error = %e, "Could not read the published version");
                LATEST.into()
            }
        }
    }

    fn update(&self, version: Option<&str>) -> ScaffoldResult<String> {
        let version = match version {
            Some(v) => v.to_owned(),
            None => self.latest(),
        };

        let path = &self.settings.project_file;
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::MissingInput { path: path.clone() }.into());
        }

        let text = self.filesystem.read_to_string(path)?;
        let updated = set_template_version(&text, &version)?;
        self.filesystem.write_file(path, &updated)?;
        info!(version = %version, file = %path.display(), "Template version updated");
        Ok(version)
    }
}

/// Build the manager for `component`.
pub fn release_manager_for(
    component: Component,
    filesystem: Box<dyn Filesystem>,
    runtime: Box<dyn ContainerRuntime>,
    settings: ReleaseSettings,
) -> Box<dyn ReleaseManager> {
    match component {
        Component::Template => Box::new(TemplateReleaseManager::new(filesystem, runtime, settings)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::{CapturedOutput, MockContainerRuntime, MockFilesystem};
    use crate::domain::DomainError;
    use crate::error::ScaffoldError;

    const PROJECT: &str = "template:\n  name: scaffold\n  version: '1.0.0' # pinned\n";

    fn fs_with(content: Option<&'static str>) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(move |_| content.is_some());
        fs.expect_read_to_string()
            .returning(move |_| Ok(content.unwrap_or_default().to_owned()));
        fs
    }

    fn runtime_reporting(version: &'static str, code: i32) -> MockContainerRuntime {
        let mut rt = MockContainerRuntime::new();
        rt.expect_pull()
            .withf(|image| image == "ghcr.io/broadsage/scaffold:latest")
            .returning(|_| Ok(0));
        rt.expect_capture()
            .withf(|inv| inv.args == ["cat", "/app/VERSION"])
            .returning(move |_| {
                Ok(CapturedOutput {
                    exit_code: code,
                    stdout: version.to_owned(),
                })
            });
        rt
    }

    fn manager(fs: MockFilesystem, rt: MockContainerRuntime) -> TemplateReleaseManager {
        TemplateReleaseManager::new(Box::new(fs), Box::new(rt), ReleaseSettings::default())
    }

    #[test]
    fn current_reads_project_file() {
        let m = manager(fs_with(Some(PROJECT)), MockContainerRuntime::new());
        assert_eq!(m.current(), "1.0.0");
    }

    #[test]
    fn current_is_unknown_without_file_or_field() {
        let m = manager(fs_with(None), MockContainerRuntime::new());
        assert_eq!(m.current(), UNKNOWN);

        let m = manager(fs_with(Some("name: x\n")), MockContainerRuntime::new());
        assert_eq!(m.current(), UNKNOWN);
    }

    #[test]
    fn latest_comes_from_the_image() {
        let m = manager(fs_with(None), runtime_reporting("1.4.2\n", 0));
        assert_eq!(m.latest(), "1.4.2");
    }

    #[test]
    fn latest_falls_back_when_image_has_no_version() {
        let m = manager(fs_with(None), runtime_reporting("", 0));
        assert_eq!(m.latest(), LATEST);

        let m = manager(fs_with(None), runtime_reporting("1.0", 125));
        assert_eq!(m.latest(), LATEST);
    }

    #[test]
    fn check_reports_available_update() {
        let m = manager(fs_with(Some(PROJECT)), runtime_reporting("1.1.0", 0));
        let status = m.check_update();
        assert!(status.update_available);
        assert_eq!(status.current, "1.0.0");
        assert_eq!(status.latest, "1.1.0");
    }

    #[test]
    fn update_preserves_formatting() {
        let written = Arc::new(Mutex::new(String::new()));
        let sink = written.clone();
        let mut fs = fs_with(Some(PROJECT));
        fs.expect_write_file().returning(move |_, content| {
            *sink.lock().unwrap() = content.to_owned();
            Ok(())
        });

        let m = manager(fs, MockContainerRuntime::new());
        assert_eq!(m.update(Some("2.0.0")).unwrap(), "2.0.0");
        assert_eq!(
            *written.lock().unwrap(),
            "template:\n  name: scaffold\n  version: '2.0.0' # pinned\n"
        );
    }

    #[test]
    fn update_without_version_uses_latest() {
        let mut fs = fs_with(Some(PROJECT));
        fs.expect_write_file()
            .withf(|_, content| content.contains("'3.0.0'"))
            .returning(|_, _| Ok(()));
        let m = manager(fs, runtime_reporting("3.0.0", 0));
        assert_eq!(m.update(None).unwrap(), "3.0.0");
    }

    #[test]
    fn update_requires_project_file_and_field() {
        let m = manager(fs_with(None), MockContainerRuntime::new());
        assert!(matches!(
            m.update(Some("1.0.0")),
            Err(ScaffoldError::Application(ApplicationError::MissingInput { .. }))
        ));

        let m = manager(fs_with(Some("template: {name: x}\n")), MockContainerRuntime::new());
        assert!(matches!(
            m.update(Some("1.0.0")),
            Err(ScaffoldError::Domain(DomainError::MissingField { .. }))
        ));
    }

    #[test]
    fn factory_builds_template_manager() {
        let m = release_manager_for(
            Component::Template,
            Box::new(fs_with(Some(PROJECT))),
            Box::new(MockContainerRuntime::new()),
            ReleaseSettings::default(),
        );
        assert_eq!(m.current(), "1.0.0");
    }
}
