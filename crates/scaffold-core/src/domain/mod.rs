// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Scaffold.
//!
//! Pure rules over YAML documents and check results. No filesystem, process
//! or network access happens here; those go through the ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: documents arrive as text and leave as text
//! - **Synchronous**: every operation is a plain function or method
//! - **Value semantics**: all domain types are `Clone + PartialEq`

pub mod compliance;
pub mod document;
pub mod error;
pub mod features;
pub mod inputs;
pub mod license;
pub mod release;
pub mod validation;
pub mod value_objects;

pub use compliance::{
    CheckImages, CheckResult, CheckStatus, ComplianceReport, ComplianceSettings,
    ContainerInvocation,
};
pub use document::{Document, deep_merge, lookup, parse_document, render_document, summarize};
pub use error::{DomainError, ErrorCategory};
pub use features::{FeatureFlags, activate, feature_bundles, safe_default};
pub use inputs::ProjectInputs;
pub use license::{LicensePlan, LicenseSelection, plan_license};
pub use release::{VersionStatus, read_template_version, set_template_version};
pub use validation::{ConfigViolation, validate_config};
pub use value_objects::{CheckKind, CheckSelection, Component, Platform};

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: &str = "\
organization: {name: Example}
metadata: {license: Apache-2.0, author: nobody}
build: {platforms: [linux/amd64]}
image: {name: base, description: Base image}
documentation: {enabled: true}
template: {version: 0.1.0}
github: {workflows: [ci], enabled: true}
renovate: {schedule: weekly, automerge: false}
";

    #[test]
    fn merged_project_passes_validation() {
        let defaults = parse_document(DEFAULTS).unwrap();
        let project = parse_document(
            "image: {name: myapp}\nfeatures: {github: true}\nbuild: {platforms: [linux/arm64]}",
        )
        .unwrap();

        let merged = activate(&defaults, &project);
        assert!(validate_config(&merged).is_empty());
        assert_eq!(
            lookup(&merged, "image.name").and_then(|v| v.as_str()),
            Some("myapp")
        );
        assert_eq!(
            lookup(&merged, "github.workflows").and_then(|v| v.as_sequence()).map(Vec::len),
            Some(1)
        );
        assert_eq!(
            lookup(&merged, "renovate.schedule").and_then(|v| v.as_str()),
            Some("weekly"),
            "disabled bundles keep their string values"
        );
    }

    #[test]
    fn broken_project_surfaces_violations() {
        let defaults = parse_document("image: {name: base}").unwrap();
        let project = parse_document("image: {name: ''}\nbuild: {platforms: [linux/mips]}").unwrap();

        let merged = activate(&defaults, &project);
        let violations = validate_config(&merged);
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn merged_document_round_trips_through_yaml() {
        let defaults = parse_document(DEFAULTS).unwrap();
        let merged = activate(&defaults, &Document::new());
        let text = render_document(&merged).unwrap();
        assert_eq!(parse_document(&text).unwrap(), merged);
    }
}
