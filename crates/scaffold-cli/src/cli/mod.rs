//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "scaffold",
    bin_name = "scaffold",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered project configuration, generation hooks and compliance checks",
    long_about = "Scaffold merges base defaults with a project file into one \
                  configuration, validates template inputs, keeps the template \
                  version current and runs containerised compliance checks.",
    after_help = "EXAMPLES:\n\
        \x20 scaffold merge\n\
        \x20 scaffold compliance lint\n\
        \x20 scaffold release template check\n\
        \x20 scaffold completions bash > /usr/share/bash-completion/completions/scaffold",
    arg_required_else_help = true,
    subcommand_required    = true,
    propagate_version      = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge defaults and project overrides into the final configuration.
    #[command(
        visible_alias = "m",
        about = "Merge defaults and project configuration",
        after_help = "EXAMPLES:\n\
            \x20 scaffold merge\n\
            \x20 scaffold merge --project ./project.yaml --output ./merged.yaml\n\
            \x20 SCAFFOLD_MERGE__DEFAULTS_FILE=ansible/vars/defaults.yaml scaffold merge"
    )]
    Merge(MergeArgs),

    /// Run containerised code quality and compliance checks.
    #[command(
        visible_alias = "check",
        about = "Run compliance checks",
        after_help = "EXAMPLES:\n\
            \x20 scaffold compliance\n\
            \x20 scaffold compliance license\n\
            \x20 scaffold compliance commit --debug"
    )]
    Compliance(ComplianceArgs),

    /// Inspect or update versioned components.
    #[command(
        about = "Release management",
        after_help = "EXAMPLES:\n\
            \x20 scaffold release template check\n\
            \x20 scaffold release template update\n\
            \x20 scaffold release template update 1.2.0"
    )]
    Release(ReleaseArgs),

    /// Template generation hooks.
    #[command(
        about = "Pre/post generation hooks",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 scaffold hook pre-gen --project-name my-app --email dev@example.org\n\
            \x20 scaffold hook post-gen --license MIT --project-slug my-app"
    )]
    Hook(HookCommands),

    /// Initialise a Scaffold configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 scaffold init           # default location\n\
            \x20 scaffold init --global  # global config\n\
            \x20 scaffold init --local   # local config in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 scaffold completions bash > ~/.local/share/bash-completion/completions/scaffold\n\
            \x20 scaffold completions zsh  > ~/.zfunc/_scaffold\n\
            \x20 scaffold completions fish > ~/.config/fish/completions/scaffold.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Scaffold configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 scaffold config get compliance.container_engine\n\
            \x20 scaffold config list\n\
            \x20 scaffold config path"
    )]
    Config(ConfigCommands),
}

// ── merge ─────────────────────────────────────────────────────────────────────

/// Arguments for `scaffold merge`. Unset paths come from configuration.
#[derive(Debug, Args)]
pub struct MergeArgs {
    #[arg(long = "defaults", value_name = "FILE", help = "Base defaults document")]
    pub defaults: Option<PathBuf>,

    #[arg(long = "project", value_name = "FILE", help = "Project override document")]
    pub project: Option<PathBuf>,

    #[arg(long = "output", value_name = "FILE", help = "Where to write the merged document")]
    pub output: Option<PathBuf>,
}

// ── compliance ────────────────────────────────────────────────────────────────

/// Arguments for `scaffold compliance`.
#[derive(Debug, Args)]
pub struct ComplianceArgs {
    /// Check to run. Parsed by the core so an unknown name gets suggestions.
    #[arg(
        value_name = "CHECK",
        default_value = "all",
        help = "Check to run: all|lint|publiccodelint|license|commit"
    )]
    pub check: String,

    /// Raise logging to DEBUG for this run.
    #[arg(long = "debug", help = "Enable debug output")]
    pub debug: bool,
}

// ── release ───────────────────────────────────────────────────────────────────

/// Arguments for `scaffold release`.
#[derive(Debug, Args)]
pub struct ReleaseArgs {
    /// Component to manage (currently only `template`).
    #[arg(value_name = "COMPONENT", help = "Component to manage")]
    pub component: String,

    #[command(subcommand)]
    pub action: ReleaseAction,
}

/// What to do with the component's version.
#[derive(Debug, Clone, Subcommand)]
pub enum ReleaseAction {
    /// Show current version.
    Current,
    /// Show latest available version.
    Latest,
    /// Compare current vs latest (exit 1 if update available).
    Check,
    /// Update to version (or latest if not specified).
    Update {
        #[arg(id = "target_version", value_name = "VERSION")]
        version: Option<String>,
    },
}

// ── hook ──────────────────────────────────────────────────────────────────────

/// Subcommands for `scaffold hook`.
#[derive(Debug, Subcommand)]
pub enum HookCommands {
    /// Validate template variables before generation.
    #[command(name = "pre-gen")]
    PreGen(PreGenArgs),
    /// Select the license file and print next steps after generation.
    #[command(name = "post-gen")]
    PostGen(PostGenArgs),
}

#[derive(Debug, Args)]
pub struct PreGenArgs {
    #[arg(long = "project-name", value_name = "NAME")]
    pub project_name: String,

    #[arg(long = "email", value_name = "EMAIL")]
    pub email: String,

    #[arg(long = "organization", value_name = "ORG", default_value = "")]
    pub organization: String,
}

#[derive(Debug, Args)]
pub struct PostGenArgs {
    /// License choice, or `Not Open Source`.
    #[arg(long = "license", value_name = "LICENSE")]
    pub license: String,

    #[arg(long = "project-slug", value_name = "SLUG")]
    pub project_slug: String,

    /// Generated project directory.
    #[arg(long = "dir", value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `scaffold init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the global config location.
    #[arg(long = "global", conflicts_with = "local", help = "Create global configuration")]
    pub global: bool,

    /// Write to `.scaffold.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `scaffold completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `scaffold config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `compliance.compare_branch`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the path to the global configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
