//! Tracing subscriber initialisation.
//!
//! Only the CLI crate is allowed to call [`init_logging`]; `scaffold-core`
//! and `scaffold-adapters` only *emit* spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)               | Filter level |
//! |-----------------------|--------------|
//! | (none)                | WARN         |
//! | `-v`                  | INFO         |
//! | `-vv`, `compliance --debug` | DEBUG  |
//! | `-vvv`                | TRACE        |
//! | `--quiet`             | ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Crates whose events are shown.
const TARGETS: [&str; 3] = ["scaffold", "scaffold_core", "scaffold_adapters"];

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire.
/// `debug` raises the level to at least DEBUG.
pub fn init_logging(args: &GlobalArgs, debug: bool) -> anyhow::Result<()> {
    let level = derive_level(args, debug);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn filter_directives(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Translate the verbosity counter, quiet flag and `--debug` to a level string.
fn derive_level(args: &GlobalArgs, debug: bool) -> &'static str {
    if args.quiet {
        return "error";
    }
    match (args.verbose, debug) {
        (0, false) => "warn",
        (1, false) => "info",
        (0..=2, _) => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::global::OutputFormat;

    fn args_with(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn level_quiet() {
        assert_eq!(derive_level(&args_with(0, true), false), "error");
    }

    #[test]
    fn level_default() {
        assert_eq!(derive_level(&args_with(0, false), false), "warn");
    }

    #[test]
    fn level_verbose_one() {
        assert_eq!(derive_level(&args_with(1, false), false), "info");
    }

    #[test]
    fn level_verbose_two() {
        assert_eq!(derive_level(&args_with(2, false), false), "debug");
    }

    #[test]
    fn level_verbose_three_plus() {
        assert_eq!(derive_level(&args_with(3, false), false), "trace");
        assert_eq!(derive_level(&args_with(10, false), false), "trace");
    }

    #[test]
    fn debug_flag_raises_to_debug() {
        assert_eq!(derive_level(&args_with(0, false), true), "debug");
        assert_eq!(derive_level(&args_with(1, false), true), "debug");
        assert_eq!(derive_level(&args_with(3, false), true), "trace");
    }

    // quiet takes precedence over verbose
    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(derive_level(&args_with(3, true), true), "error");
    }

    #[test]
    fn every_crate_gets_the_level() {
        assert_eq!(
            filter_directives("info"),
            "scaffold=info,scaffold_core=info,scaffold_adapters=info"
        );
    }
}
