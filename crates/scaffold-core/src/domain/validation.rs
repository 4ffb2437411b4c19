use std::fmt;

use serde_yaml::Value;

use crate::domain::{document::Document, value_objects::Platform};

/// A single constraint violation in a merged document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigViolation {
    /// A required field is absent.
    Missing { field: &'static str },
    /// A required field is present but empty or not a string.
    Empty { field: &'static str },
    /// The `metadata` section itself is absent.
    MissingMetadata,
    /// `build.platforms` is not a non-empty sequence.
    PlatformsNotAList,
    /// An entry of `build.platforms` is not a known platform.
    InvalidPlatform { platform: String },
}

impl fmt::Display for ConfigViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{field} not found: {field} is required"),
            Self::Empty { field } => write!(f, "{field} is empty: {field} must be a non-empty string"),
            Self::MissingMetadata => f.write_str("metadata section is required with license field"),
            Self::PlatformsNotAList => f.write_str("build.platforms must be a non-empty list"),
            Self::InvalidPlatform { platform } => write!(
                f,
                "Invalid platform: {platform}. Valid: {}",
                Platform::valid_list()
            ),
        }
    }
}

/// Check the merged document.
///
/// Rules, in order:
/// 1. `image.name` must be a non-empty string when `image` exists.
/// 2. `metadata.license` must be a non-empty string; `metadata` is mandatory.
/// 3. `build.platforms`, when present, must be a non-empty list of known
///    platforms. Each unknown entry yields its own violation.
pub fn validate_config(config: &Document) -> Vec<ConfigViolation> {
    let mut violations = Vec::new();

    if let Some(image) = config.get("image") {
        check_required_string(image, "name", "image.name", &mut violations);
    }

    match config.get("metadata") {
        Some(metadata) => {
            check_required_string(metadata, "license", "metadata.license", &mut violations)
        }
        None => violations.push(ConfigViolation::MissingMetadata),
    }

    let platforms = config
        .get("build")
        .and_then(Value::as_mapping)
        .and_then(|build| build.get("platforms"));
    if let Some(platforms) = platforms {
        match platforms.as_sequence() {
            Some(list) if !list.is_empty() => {
                for entry in list {
                    let valid = entry
                        .as_str()
                        .is_some_and(|s| s.parse::<Platform>().is_ok());
                    if !valid {
                        violations.push(ConfigViolation::InvalidPlatform {
                            platform: crate::domain::document::display_scalar(entry),
                        });
                    }
                }
            }
            _ => violations.push(ConfigViolation::PlatformsNotAList),
        }
    }

    violations
}

fn check_required_string(
    section: &Value,
    key: &str,
    field: &'static str,
    violations: &mut Vec<ConfigViolation>,
) {
    match section.as_mapping().and_then(|m| m.get(key)) {
        None => violations.push(ConfigViolation::Missing { field }),
        Some(Value::String(s)) if !s.trim().is_empty() => {}
        Some(_) => violations.push(ConfigViolation::Empty { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::parse_document;

    fn messages(yaml: &str) -> Vec<String> {
        validate_config(&parse_document(yaml).unwrap())
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn valid_document_has_no_violations() {
        let errs = messages(
            "image: {name: app}\nmetadata: {license: MIT}\nbuild: {platforms: [linux/amd64, linux/arm64]}",
        );
        assert!(errs.is_empty(), "{errs:?}");
    }

    #[test]
    fn empty_image_name_is_reported() {
        let errs = messages("image: {name: '', description: d}\nmetadata: {license: MIT}");
        assert_eq!(errs.len(), 1);
        assert!(errs[0].contains("empty"));
        assert!(errs[0].contains("image.name"));
    }

    #[test]
    fn whitespace_name_counts_as_empty() {
        let errs = messages("image: {name: '   '}\nmetadata: {license: MIT}");
        assert!(errs[0].contains("empty"));
    }

    #[test]
    fn missing_image_section_is_fine() {
        assert!(messages("metadata: {license: MIT}").is_empty());
    }

    #[test]
    fn missing_metadata_is_an_error() {
        let errs = messages("image: {name: x, description: y}");
        assert_eq!(errs, ["metadata section is required with license field"]);
    }

    #[test]
    fn missing_license_is_an_error() {
        let errs = messages("metadata: {author: me}");
        assert!(errs[0].contains("metadata.license"));
        assert!(errs[0].contains("not found"));
    }

    #[test]
    fn unknown_platform_lists_valid_set() {
        let errs = messages(
            "image: {name: x, description: y}\nbuild: {platforms: [linux/bogus]}\nmetadata: {license: MIT}",
        );
        assert_eq!(errs.len(), 1);
        assert!(errs[0].contains("linux/bogus"));
        for platform in Platform::ALL {
            assert!(errs[0].contains(platform.as_str()));
        }
    }

    #[test]
    fn one_violation_per_invalid_platform() {
        let errs = messages(
            "metadata: {license: MIT}\nbuild: {platforms: [linux/amd64, windows/amd64, plan9]}",
        );
        assert_eq!(errs.len(), 2);
        assert!(errs[0].contains("windows/amd64"));
        assert!(errs[1].contains("plan9"));
    }

    #[test]
    fn empty_or_scalar_platforms_rejected() {
        for yaml in [
            "metadata: {license: MIT}\nbuild: {platforms: []}",
            "metadata: {license: MIT}\nbuild: {platforms: linux/amd64}",
        ] {
            assert_eq!(messages(yaml), ["build.platforms must be a non-empty list"]);
        }
    }

    #[test]
    fn violations_keep_rule_order() {
        let errs = messages("image: {name: ''}\nbuild: {platforms: []}");
        assert_eq!(errs.len(), 3);
        assert!(errs[0].starts_with("image.name"));
        assert!(errs[1].starts_with("metadata"));
        assert!(errs[2].starts_with("build.platforms"));
    }
}
