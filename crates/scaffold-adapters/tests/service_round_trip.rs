//! Core services driven end to end over the in-memory filesystem.

use std::path::{Path, PathBuf};

use scaffold_adapters::MemoryFilesystem;
use scaffold_core::application::{
    ConfigMergeService, HookService, LicenseOutcome, MergePaths, SilentReporter,
};
use scaffold_core::domain::{lookup, parse_document};
use scaffold_core::error::ScaffoldError;

const DEFAULTS: &str = "\
metadata:
  license: Apache-2.0
build:
  platforms: [linux/amd64]
github:
  workflows: true
renovate:
  enabled: true
  schedule: [weekly]
";

fn paths() -> MergePaths {
    MergePaths {
        defaults: PathBuf::from("/work/vars/defaults.yaml"),
        project: PathBuf::from("/work/project.yaml"),
        output: PathBuf::from("/work/out/merged.yaml"),
    }
}

fn merge_service(fs: &MemoryFilesystem) -> ConfigMergeService {
    ConfigMergeService::new(Box::new(fs.clone()), Box::new(SilentReporter))
}

#[test]
fn merge_writes_activated_document() {
    let fs = MemoryFilesystem::new()
        .with_file("/work/vars/defaults.yaml", DEFAULTS)
        .with_file(
            "/work/project.yaml",
            "image: {name: demo}\nfeatures: {github: true}\n",
        );

    let report = merge_service(&fs).run(&paths()).unwrap();
    assert_eq!(report.image_name, "demo");
    assert!(report.defaults_loaded);

    let written = fs.read_file(Path::new("/work/out/merged.yaml")).unwrap();
    let merged = parse_document(&written).unwrap();
    assert_eq!(
        lookup(&merged, "github.workflows").and_then(|v| v.as_bool()),
        Some(true)
    );
    assert_eq!(
        lookup(&merged, "renovate.enabled").and_then(|v| v.as_bool()),
        Some(false)
    );
    assert_eq!(merged, report.merged);
}

#[test]
fn merge_without_defaults_uses_project_only() {
    let fs = MemoryFilesystem::new().with_file(
        "/work/project.yaml",
        "image: {name: solo}\nmetadata: {license: MIT}\n",
    );

    let report = merge_service(&fs).run(&paths()).unwrap();
    assert!(!report.defaults_loaded);
    assert!(fs.read_file(Path::new("/work/out/merged.yaml")).is_some());
}

#[test]
fn invalid_merge_writes_nothing() {
    let fs = MemoryFilesystem::new().with_file("/work/project.yaml", "image: {name: ''}\n");

    let err = merge_service(&fs).run(&paths()).unwrap_err();
    assert!(matches!(err, ScaffoldError::Application(_)));
    assert_eq!(fs.paths(), [PathBuf::from("/work/project.yaml")]);
}

#[test]
fn post_generate_installs_license_and_clears_templates() {
    let fs = MemoryFilesystem::new()
        .with_file("/gen/app/LICENSE.MIT", "MIT text")
        .with_file("/gen/app/LICENSE.Apache-2.0", "Apache text")
        .with_file("/gen/app/README.md", "# app");

    let outcome = HookService::new(Box::new(fs.clone()))
        .post_generate(Path::new("/gen/app"), "MIT")
        .unwrap();

    assert_eq!(
        outcome,
        LicenseOutcome::Installed {
            license: "MIT".into(),
            removed: 2
        }
    );
    assert_eq!(
        fs.read_file(Path::new("/gen/app/LICENSE")).as_deref(),
        Some("MIT text")
    );
    assert_eq!(
        fs.paths(),
        [
            PathBuf::from("/gen/app/LICENSE"),
            PathBuf::from("/gen/app/README.md")
        ]
    );
}

#[test]
fn post_generate_closed_source_removes_every_template() {
    let fs = MemoryFilesystem::new()
        .with_file("/gen/app/LICENSE.MIT", "MIT text")
        .with_file("/gen/app/LICENSE.", "stray");

    let outcome = HookService::new(Box::new(fs.clone()))
        .post_generate(Path::new("/gen/app"), "Not Open Source")
        .unwrap();

    assert_eq!(outcome, LicenseOutcome::NoLicense { removed: 2 });
    assert!(fs.paths().is_empty());
}
