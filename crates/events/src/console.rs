//! Console output for the end of a stacktrace run.
//!
//! This module is allowed to use println!/eprintln! as it's the output layer.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Display;
use std::io::{self, IsTerminal};
use std::path::Path;

const BOLD: &str = "\x1b[1m";
const NORMAL_INTENSITY: &str = "\x1b[22m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Where the end of a run is announced.
///
/// [`Console`] prints to the terminal; hosts may supply their own sink.
pub trait RunSummary: Send + Sync {
    /// The report was written to `path`.
    fn report_saved(&self, path: &Path);

    /// The report could not be written.
    fn report_failed(&self, error: &dyn Display);
}

/// Console configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Whether messages on stdout use ANSI colors.
    pub stdout_colors: bool,
    /// Whether messages on stderr use ANSI colors.
    pub stderr_colors: bool,
}

impl ConsoleConfig {
    /// Force colors on or off for both streams.
    #[must_use]
    pub fn forced(colors: bool) -> Self {
        Self {
            stdout_colors: colors,
            stderr_colors: colors,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            stdout_colors: io::stdout().is_terminal(),
            stderr_colors: io::stderr().is_terminal(),
        }
    }
}

/// Prints the end-of-run messages.
///
/// Success goes to stdout, failure to stderr; each stream decides on
/// colors by itself.
#[derive(Debug, Clone, Default)]
pub struct Console {
    config: ConsoleConfig,
}

impl Console {
    /// Create a console with terminal color detection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a console with the given configuration.
    #[must_use]
    pub fn with_config(config: ConsoleConfig) -> Self {
        Self { config }
    }

    /// The console's configuration.
    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }
}

impl RunSummary for Console {
    fn report_saved(&self, path: &Path) {
        println!("{}", format_report_saved(path, self.config.stdout_colors));
    }

    fn report_failed(&self, error: &dyn Display) {
        eprintln!("{}", format_report_failed(error, self.config.stderr_colors));
    }
}

/// Format the message announcing the saved report.
#[must_use]
pub fn format_report_saved(path: &Path, colors: bool) -> String {
    let path = path.display();
    if colors {
        format!(
            "{BOLD}\nStackTrace:\n\nTrace information is saved into {GREEN}{path}{RESET}\n{NORMAL_INTENSITY}"
        )
    } else {
        format!("\nStackTrace:\n\nTrace information is saved into {path}\n")
    }
}

/// Format the message announcing a failed report.
#[must_use]
pub fn format_report_failed(error: &dyn Display, colors: bool) -> String {
    if colors {
        format!(
            "{BOLD}\nStackTrace:\n\nTrace report could not be saved: {RED}{error}{RESET}\n{NORMAL_INTENSITY}"
        )
    } else {
        format!("\nStackTrace:\n\nTrace report could not be saved: {error}\n")
    }
}
