//! Arguments and setup shared by every subcommand.

use super::Host;
use crate::policy::{ConflictSeverity, PolicyCell, PolicyDatabase, UsagePolicy};
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use owo_colors::OwoColorize;
use std::io::Write;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments accepted by every subcommand
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to a policy file (default is the built-in policy set)
    #[arg(long, value_name = "PATH", global = true)]
    pub policies: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl CommonArgs {
    /// A policy cell for the selected policy file
    #[must_use]
    pub fn policy_cell(&self, severity: ConflictSeverity) -> PolicyCell {
        PolicyCell::new(self.policies.clone()).with_severity(severity)
    }
}

/// Initialize logger based on log level
///
/// Repeated calls are harmless, the first logger installed stays in place.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let _ = env_logger::Builder::from_env(env)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

/// Print the records that were skipped and the families that disagree to the error stream
pub fn report_policy_problems<H: Host>(host: &mut H, db: &PolicyDatabase) {
    let mut err = host.error();

    if !db.skipped().is_empty() {
        let _ = writeln!(err, "\n⚠️  Skipped records:");
        for skipped in db.skipped() {
            let _ = writeln!(err, "   {skipped}");
        }
    }

    if db.has_conflicts() {
        let _ = writeln!(err, "\n⚠️  Family conflicts:");
        for conflict in db.conflicts() {
            let _ = writeln!(err, "   {conflict}");
        }
    }
}

/// Render a usage policy, padded to a fixed width so verdicts line up
#[must_use]
pub fn format_verdict(verdict: UsagePolicy, use_colors: bool) -> String {
    let text = format!("{:<12}", verdict.to_string());
    if !use_colors {
        return text;
    }

    match verdict {
        UsagePolicy::Allow => text.green().bold().to_string(),
        UsagePolicy::Deny => text.red().bold().to_string(),
        UsagePolicy::NeedsReview => text.yellow().bold().to_string(),
        UsagePolicy::Undefined => text.dimmed().to_string(),
    }
}
