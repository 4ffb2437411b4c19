//! Template variables checked before a project is generated.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::DomainError;

/// Longest accepted project name.
pub const MAX_PROJECT_NAME_LEN: usize = 100;

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9\-_]*$").expect("valid regex"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

/// Values supplied by the templating tool for a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInputs {
    pub project_name: String,
    pub maintainer_email: String,
    pub organization: String,
}

impl ProjectInputs {
    pub fn new(
        project_name: impl Into<String>,
        maintainer_email: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            maintainer_email: maintainer_email.into(),
            organization: organization.into(),
        }
    }

    /// Name first, then email; the first failure is returned.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_project_name(&self.project_name)?;
        validate_email(&self.maintainer_email)
    }

    /// Organization for display; empty means "Not specified".
    pub fn organization_label(&self) -> &str {
        if self.organization.trim().is_empty() {
            "Not specified"
        } else {
            &self.organization
        }
    }
}

pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidProjectName {
        name: name.into(),
        reason: reason.into(),
    };

    if name.is_empty() {
        return Err(invalid("Project name cannot be empty"));
    }
    if !PROJECT_NAME.is_match(name) {
        return Err(invalid(
            "Project name must start with alphanumeric character and \
             contain only alphanumeric characters, hyphens, or underscores",
        ));
    }
    if name.len() > MAX_PROJECT_NAME_LEN {
        return Err(invalid("Project name must be less than 100 characters"));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if EMAIL.is_match(email) {
        Ok(())
    } else {
        Err(DomainError::InvalidEmail {
            email: email.into(),
        })
    }
}
