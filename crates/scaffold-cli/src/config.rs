//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the settings structs
//! built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `SCAFFOLD_<SECTION>__<KEY>`
//! 3. `--config FILE`
//! 4. `.scaffold.toml` in the current directory
//! 5. Global `config.toml` in the platform config directory
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use scaffold_core::application::{MergePaths, ReleaseSettings};
use scaffold_core::domain::{CheckImages, ComplianceSettings};

/// Local override file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".scaffold.toml";

const ENV_PREFIX: &str = "SCAFFOLD";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub merge: MergeConfig,
    pub compliance: ComplianceConfig,
    pub release: ReleaseConfig,
    pub output: OutputConfig,
}

/// Where `scaffold merge` reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub defaults_file: PathBuf,
    pub project_file: PathBuf,
    pub output_file: PathBuf,
}

impl Default for MergeConfig {
    fn default() -> Self {
        let paths = MergePaths::default();
        Self {
            defaults_file: paths.defaults,
            project_file: paths.project,
            output_file: paths.output,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceConfig {
    /// Docker-compatible binary used for every check.
    pub container_engine: String,
    /// Branch commits are compared against by the commit check.
    pub compare_branch: String,
    /// Project to check; unset means the current directory.
    pub project_root: Option<PathBuf>,
    pub images: ImagesConfig,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            container_engine: "docker".into(),
            compare_branch: "main".into(),
            project_root: None,
            images: ImagesConfig::default(),
        }
    }
}

/// Container images per check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    pub lint: String,
    pub publiccode: String,
    pub reuse: String,
    pub conform: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        let images = CheckImages::default();
        Self {
            lint: images.lint,
            publiccode: images.publiccode,
            reuse: images.reuse,
            conform: images.conform,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Project document holding `template.version`.
    pub project_file: PathBuf,
    /// Published template image, without tag.
    pub image: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        let settings = ReleaseSettings::default();
        Self {
            project_file: settings.project_file,
            image: settings.image,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// `config_file` is the path passed via `--config`; it must exist.
    /// The global and local files are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(Self::config_path(), Path::new(LOCAL_CONFIG_FILE), config_file)
    }

    fn load_from(
        global: Option<PathBuf>,
        local: &Path,
        explicit: Option<&PathBuf>,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        if let Some(global) = global {
            debug!(path = %global.display(), "Global config layer");
            builder = builder.add_source(File::from(global).required(false));
        }
        builder = builder.add_source(File::from(local).required(false));
        if let Some(path) = explicit {
            debug!(path = %path.display(), "Explicit config layer");
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build config")?
            .try_deserialize::<Self>()
            .context("Failed to deserialize config")
    }

    /// Path to the global configuration file, if the platform has one.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "scaffold", "scaffold")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Merge paths, with `None` overrides left to configuration.
    pub fn merge_paths(
        &self,
        defaults: Option<PathBuf>,
        project: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> MergePaths {
        MergePaths {
            defaults: defaults.unwrap_or_else(|| self.merge.defaults_file.clone()),
            project: project.unwrap_or_else(|| self.merge.project_file.clone()),
            output: output.unwrap_or_else(|| self.merge.output_file.clone()),
        }
    }

    /// Compliance settings rooted at `cwd` unless a root is configured.
    pub fn compliance_settings(&self, cwd: &Path) -> ComplianceSettings {
        let images = &self.compliance.images;
        ComplianceSettings {
            project_root: self
                .compliance
                .project_root
                .clone()
                .unwrap_or_else(|| cwd.to_path_buf()),
            compare_branch: self.compliance.compare_branch.clone(),
            images: CheckImages {
                lint: images.lint.clone(),
                publiccode: images.publiccode.clone(),
                reuse: images.reuse.clone(),
                conform: images.conform.clone(),
            },
        }
    }

    pub fn release_settings(&self) -> ReleaseSettings {
        ReleaseSettings {
            project_file: self.release.project_file.clone(),
            image: self.release.image.clone(),
        }
    }
}
