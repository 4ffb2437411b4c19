//! Flags shared by every `scaffold` subcommand.
//!
//! All of them are `global = true`, so `scaffold merge -vv` and
//! `scaffold -vv merge` parse the same way.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log level: none = warnings, -v = info, -vv = debug, -vvv = trace.
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        long_help = "Raise the tracing level written to stderr.\n\
                     -v    progress of merges, hooks and releases\n\
                     -vv   merged document summary, container command lines\n\
                     -vvv  everything, including adapter internals\n\
                     RUST_LOG overrides this flag."
    )]
    pub verbose: u8,

    /// Print only answers and errors.
    ///
    /// Version numbers and config values are still written to stdout so
    /// scripts can capture them.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never emit ANSI colour (also set by `NO_COLOR`).
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Extra TOML settings file, applied above the global and `.scaffold.toml`
    /// files and below `SCAFFOLD_*` environment variables.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Terminal styling for banners, tables and spinners.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

/// Terminal styling mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when stdout is piped.
    #[default]
    Auto,
    /// Colour, spinners and coloured table borders.
    Human,
    /// No colour and no spinner; suited to CI logs.
    Plain,
}
