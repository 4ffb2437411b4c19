//! Domain value objects: Platform, CheckKind, CheckSelection, Component.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each carries its canonical string form and a `FromStr` parser.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

// ── Platform ─────────────────────────────────────────────────────────────────

/// A container build platform accepted in `build.platforms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    LinuxAmd64,
    LinuxArm64,
    LinuxArmV7,
    LinuxArmV6,
    Linux386,
    LinuxPpc64le,
    LinuxS390x,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Self::LinuxAmd64,
        Self::LinuxArm64,
        Self::LinuxArmV7,
        Self::LinuxArmV6,
        Self::Linux386,
        Self::LinuxPpc64le,
        Self::LinuxS390x,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LinuxAmd64 => "linux/amd64",
            Self::LinuxArm64 => "linux/arm64",
            Self::LinuxArmV7 => "linux/arm/v7",
            Self::LinuxArmV6 => "linux/arm/v6",
            Self::Linux386 => "linux/386",
            Self::LinuxPpc64le => "linux/ppc64le",
            Self::LinuxS390x => "linux/s390x",
        }
    }

    /// Comma-separated list of every valid identifier.
    pub fn valid_list() -> String {
        Self::ALL
            .iter()
            .map(Platform::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    /// Exact match only; platform identifiers are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| s.to_owned())
    }
}

// ── CheckKind ────────────────────────────────────────────────────────────────

/// One of the containerised compliance checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Lint,
    PublicCode,
    License,
    Commit,
}

impl CheckKind {
    /// Execution order for `all`.
    pub const ALL: [CheckKind; 4] = [Self::Lint, Self::PublicCode, Self::License, Self::Commit];

    /// Name accepted on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lint => "lint",
            Self::PublicCode => "publiccodelint",
            Self::License => "license",
            Self::Commit => "commit",
        }
    }

    /// Name shown in the summary table.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Lint => "Lint",
            Self::PublicCode => "publiccode.yaml",
            Self::License => "License",
            Self::Commit => "Commit",
        }
    }

    /// Section header printed before the check runs.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Lint => "LINTER HEALTH (MEGALINTER - python flavor)",
            Self::PublicCode => "LINTER publiccode.yaml (publiccode-parser-go)",
            Self::License => "LICENSE HEALTH (REUSE)",
            Self::Commit => "COMMIT HEALTH (CONFORM)",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| DomainError::UnknownCheck { name: s.into() })
    }
}

/// The positional `CHECK` argument: one check, or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckSelection {
    #[default]
    All,
    Only(CheckKind),
}

impl CheckSelection {
    pub fn kinds(&self) -> Vec<CheckKind> {
        match self {
            Self::All => CheckKind::ALL.to_vec(),
            Self::Only(kind) => vec![*kind],
        }
    }

    /// Every accepted name, sorted.
    pub fn valid_names() -> Vec<&'static str> {
        let mut names: Vec<_> = CheckKind::ALL.iter().map(CheckKind::as_str).collect();
        names.push("all");
        names.sort_unstable();
        names
    }
}

impl FromStr for CheckSelection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

// ── Component ────────────────────────────────────────────────────────────────

/// A versioned component handled by the release manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Template,
}

impl Component {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Template => "template",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Component {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "template" => Ok(Self::Template),
            other => Err(DomainError::UnsupportedComponent {
                component: other.into(),
            }),
        }
    }
}
