//! Output management and formatting.
//!
//! Everything the user reads goes through [`OutputManager`]; tracing output
//! goes to stderr separately.

use std::io::{self, IsTerminal};
use std::time::Duration;

use chrono::Local;
use console::{Term, measure_text_width};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use scaffold_core::application::ProgressReporter;
use scaffold_core::domain::{CheckStatus, ComplianceReport};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::CliError;

const BANNER_TIME: &str = "%Y-%m-%d %H:%M:%S";
const EVENT_TIME: &str = "%H:%M:%S";

/// Manages CLI output based on configuration. Clones write to the same
/// terminal.
#[derive(Debug, Clone)]
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
    err_term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// The answer a command exists to print (a version, a path, a value).
    /// Written even in quiet mode.
    pub fn value(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>` on stderr.  *Not* suppressed in quiet
    /// mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.err_term.write_line(&line)
    }

    /// Full report of a failed command on stderr: message, causes when
    /// verbose, and suggestions. Colour also needs stderr to be a terminal.
    pub fn report_error(&self, err: &CliError, verbose: bool) -> io::Result<()> {
        let text = if self.no_color || !self.err_term.is_term() {
            err.format_plain(verbose)
        } else {
            err.format_colored(verbose)
        };
        self.err_term.write_str(&text)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg)
        };
        self.term.write_line(&line)
    }

    /// Section header with a timestamp: `  <text> [YYYY-MM-DD HH:MM:SS]`.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let time = Local::now().format(BANNER_TIME).to_string();
        let line = if self.no_color {
            format!("  {text} [{time}]")
        } else {
            format!("  {} [{}]", text.blue().bold(), time.blue().dimmed())
        };
        self.term.write_line(&line)
    }

    /// Main banner: `➜  <text> [YYYY-MM-DD HH:MM:SS]`, padded by blank lines.
    pub fn banner(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let time = Local::now().format(BANNER_TIME).to_string();
        let line = if self.no_color {
            format!("\n\u{279c}  {text} [{time}]\n")
        } else {
            format!("\n\u{279c}  {} [{}]\n", text.cyan().bold(), time.cyan().dimmed())
        };
        self.term.write_line(&line)
    }

    /// Timestamped event: `<emoji> <msg> • HH:MM:SS`.
    pub fn event(&self, emoji: &str, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let time = Local::now().format(EVENT_TIME).to_string();
        self.term.write_line(&format!("{emoji} {msg} \u{2022} {time}"))
    }

    /// Horizontal rule of `=` characters.
    pub fn rule(&self, width: usize) -> io::Result<()> {
        self.print(&"=".repeat(width))
    }

    /// Box-drawn table of check results, preceded by a banner.
    pub fn summary(&self, report: &ComplianceReport) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.banner("CODE QUALITY & COMPLIANCE SUMMARY")?;
        for line in render_summary(report, !self.no_color) {
            self.term.write_line(&line)?;
        }
        self.term.write_line("")
    }

    /// Spinner on stderr for slow steps; hidden when quiet, in plain
    /// output, or when stderr is not a TTY.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || self.resolved_format == OutputFormat::Plain || !self.err_term.is_term() {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(msg.to_owned());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }
}

/// Services report progress through the same terminal as the commands.
impl ProgressReporter for OutputManager {
    fn header(&self, title: &str) {
        let _ = OutputManager::header(self, title);
    }

    fn info(&self, message: &str) {
        let _ = OutputManager::info(self, message);
    }

    fn ok(&self, message: &str) {
        let _ = self.success(message);
    }

    fn warn(&self, message: &str) {
        let _ = self.warning(message);
    }
}

/// Render the summary table rows.
///
/// ```text
/// ┌────────────┬────────┐
/// │ Check Name │ Status │
/// ┼────────────┼────────┤
/// │ Lint       │ ✓ PASS │
/// └────────────┴────────┘
/// ```
pub fn render_summary(report: &ComplianceReport, color: bool) -> Vec<String> {
    const NAME: &str = "Check Name";
    const STATUS: &str = "Status";

    let name_width = report
        .results()
        .iter()
        .map(|r| measure_text_width(&r.name))
        .chain([NAME.len()])
        .max()
        .unwrap_or(NAME.len());
    let status_width = report
        .results()
        .iter()
        .map(|r| measure_text_width(r.status.label()))
        .chain([STATUS.len()])
        .max()
        .unwrap_or(STATUS.len());

    let border = |s: &str| -> String {
        if color {
            s.cyan().to_string()
        } else {
            s.to_owned()
        }
    };
    let bar = |n: usize| border(&"\u{2500}".repeat(n + 2));
    let v = border("\u{2502}");

    let mut lines = Vec::with_capacity(report.results().len() + 4);
    lines.push(format!(
        "{}{}{}{}{}",
        border("\u{250c}"),
        bar(name_width),
        border("\u{252c}"),
        bar(status_width),
        border("\u{2510}")
    ));
    lines.push(format!(
        "{v} {} {v} {} {v}",
        pad(NAME, name_width),
        pad(STATUS, status_width)
    ));
    lines.push(format!(
        "{}{}{}{}{}",
        border("\u{253c}"),
        bar(name_width),
        border("\u{253c}"),
        bar(status_width),
        border("\u{2524}")
    ));

    for result in report.results() {
        let status = pad(result.status.label(), status_width);
        let status = if color {
            match result.status {
                CheckStatus::Pass => status.green().to_string(),
                CheckStatus::Fail => status.red().to_string(),
                CheckStatus::Skip => status.yellow().to_string(),
            }
        } else {
            status
        };
        lines.push(format!(
            "{v} {} {v} {} {v}",
            pad(&result.name, name_width),
            status
        ));
    }

    lines.push(format!(
        "{}{}{}{}{}",
        border("\u{2514}"),
        bar(name_width),
        border("\u{2534}"),
        bar(status_width),
        border("\u{2518}")
    ));
    lines
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(measure_text_width(text));
    format!("{text}{}", " ".repeat(fill))
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use scaffold_core::domain::{CheckKind, CheckResult};

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: OutputFormat::Human,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    fn report() -> ComplianceReport {
        [
            CheckResult::from_exit_code(CheckKind::Lint, 0, "ok", "bad"),
            CheckResult::skip(CheckKind::PublicCode, "publiccode.yaml not found"),
            CheckResult::fail(CheckKind::Commit, "Check failed"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.spinner("working").is_hidden());
    }

    #[test]
    fn error_not_suppressed_in_quiet_mode() {
        let out = make_manager(true, true);
        assert!(out.error("something went wrong").is_ok());
        assert!(
            out.report_error(&CliError::ChecksFailed { failed: 1 }, false)
                .is_ok()
        );
    }

    #[test]
    fn no_color_flag_reported() {
        assert!(!make_manager(false, false).no_color);
        assert!(make_manager(false, true).no_color);
    }

    #[test]
    fn config_can_disable_color() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Human,
        };
        assert!(OutputManager::new(&args, &config).no_color);
    }

    #[test]
    fn plain_format_disables_color_and_spinner() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Plain,
        };
        let out = OutputManager::new(&args, &AppConfig::default());
        assert_eq!(out.resolved_format, OutputFormat::Plain);
        assert!(out.no_color);
        assert!(out.spinner("Fetching latest version...").is_hidden());
    }

    #[test]
    fn summary_rows_line_up() {
        let lines = render_summary(&report(), false);
        assert_eq!(lines.len(), 3 + 3 + 1);
        assert_eq!(lines[1], "│ Check Name      │ Status │");
        assert_eq!(lines[3], "│ Lint            │ ✓ PASS │");
        assert_eq!(lines[4], "│ publiccode.yaml │ ⊘ SKIP │");
        assert_eq!(lines[5], "│ Commit          │ ✗ FAIL │");

        let width = measure_text_width(&lines[0]);
        assert!(lines.iter().all(|l| measure_text_width(l) == width));
    }

    #[test]
    fn empty_report_still_has_header() {
        let lines = render_summary(&ComplianceReport::new(), false);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with('┌'));
        assert!(lines[3].starts_with('└'));
    }

    #[test]
    fn colored_summary_keeps_visible_width() {
        let plain = render_summary(&report(), false);
        let colored = render_summary(&report(), true);
        for (p, c) in plain.iter().zip(&colored) {
            assert_eq!(measure_text_width(p), measure_text_width(c));
        }
    }
}
