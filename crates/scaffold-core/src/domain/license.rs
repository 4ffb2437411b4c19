//! License file selection after a project has been generated.
//!
//! The generated project carries one `LICENSE.<id>` template per offered
//! license. The chosen one becomes `LICENSE`; all templates are removed.

/// Choice that means "do not ship a license file".
pub const CLOSED_SOURCE: &str = "Not Open Source";

/// File name prefix shared by every license template.
pub const TEMPLATE_PREFIX: &str = "LICENSE.";

/// Destination of the selected license.
pub const LICENSE_FILE: &str = "LICENSE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseSelection {
    ClosedSource,
    Open(String),
}

impl LicenseSelection {
    pub fn parse(choice: &str) -> Self {
        if choice == CLOSED_SOURCE {
            Self::ClosedSource
        } else {
            Self::Open(choice.to_owned())
        }
    }
}

/// What the post-generation hook should do with the license templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicensePlan {
    /// Delete every template; no `LICENSE` is written.
    RemoveAll { templates: Vec<String> },
    /// Copy `source` to [`LICENSE_FILE`], then delete every template.
    Install {
        license: String,
        source: String,
        templates: Vec<String>,
    },
    /// The requested template does not exist; leave the tree alone.
    TemplateMissing { license: String, expected: String },
}

pub fn is_license_template(file_name: &str) -> bool {
    file_name.starts_with(TEMPLATE_PREFIX)
}

/// Decide the license actions from the selection and the files present.
///
/// `files` are plain file names in the project root; non-template names are
/// ignored.
pub fn plan_license<S: AsRef<str>>(selection: &LicenseSelection, files: &[S]) -> LicensePlan {
    let mut templates: Vec<String> = files
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| is_license_template(name))
        .map(str::to_owned)
        .collect();
    templates.sort();

    match selection {
        LicenseSelection::ClosedSource => LicensePlan::RemoveAll { templates },
        LicenseSelection::Open(license) => {
            let expected = format!("{TEMPLATE_PREFIX}{license}");
            if templates.contains(&expected) {
                LicensePlan::Install {
                    license: license.clone(),
                    source: expected,
                    templates,
                }
            } else {
                LicensePlan::TemplateMissing {
                    license: license.clone(),
                    expected,
                }
            }
        }
    }
}
