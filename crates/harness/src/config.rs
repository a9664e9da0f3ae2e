//! Report configuration
//!
//! Reports land in `<defaultPath>/<directoryName>` unless overridden by the
//! `directory` key or, above all, the `STACKTRACE_REPORT_DIR` environment
//! variable.
//!
//! ```toml
//! defaultPath = "spec"
//! directoryName = "stack_trace"
//! printSummary = true
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use stacktrace_events::{Console, ConsoleConfig};
use std::path::{Path, PathBuf};

/// Environment variable overriding the report directory
pub const REPORT_DIR_ENV: &str = "STACKTRACE_REPORT_DIR";

/// Default test root, matching the framework's default spec path
pub const DEFAULT_PATH: &str = "spec";

/// Default report directory name below [`DEFAULT_PATH`]
pub const DEFAULT_DIRECTORY_NAME: &str = "stack_trace";

/// Where and how reports are written
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Root of the test suite
    pub default_path: PathBuf,

    /// Report directory name below `default_path`
    pub directory_name: String,

    /// Full report directory, replacing `default_path/directory_name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Artifact extension; the renderer's own extension when unset.
    ///
    /// It must name the format the renderer writes: a run built with
    /// [`RunLifecycle::from_config`](crate::RunLifecycle::from_config) only
    /// accepts `json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// Print the end-of-run message
    pub print_summary: bool,

    /// Force ANSI colors on or off; terminal detection when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<bool>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_path: PathBuf::from(DEFAULT_PATH),
            directory_name: DEFAULT_DIRECTORY_NAME.to_string(),
            directory: None,
            extension: None,
            print_summary: true,
            colors: None,
        }
    }
}

impl ReportConfig {
    /// Parse a configuration from TOML
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] on malformed TOML, unknown keys or a
    /// blank directory name
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| Error::configuration(format!("Failed to parse report config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Configuration`] if it does not parse
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|e| Error::io(e, path, "read_to_string"))?;
        Self::from_toml_str(&source)
    }

    /// Check invariants serde cannot express
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the directory name or the
    /// extension is blank or contains a path separator
    pub fn validate(&self) -> Result<()> {
        let name = self.directory_name.trim();
        if name.is_empty() {
            return Err(Error::configuration("directoryName must not be blank"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(Error::configuration(format!(
                "directoryName must be a single path component, got {name:?}"
            )));
        }
        if let Some(extension) = self.extension() {
            if extension.is_empty() {
                return Err(Error::configuration("extension must not be blank"));
            }
            if extension.contains(['/', '\\']) {
                return Err(Error::configuration(format!(
                    "extension must not contain a path separator, got {extension:?}"
                )));
            }
        }
        Ok(())
    }

    /// Configured extension without a leading dot
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.extension
            .as_deref()
            .map(|ext| ext.trim().trim_start_matches('.'))
    }

    /// Resolve the directory reports are written into
    #[must_use]
    pub fn report_directory(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(REPORT_DIR_ENV)
            && !dir.is_empty()
        {
            return PathBuf::from(dir);
        }

        self.directory
            .clone()
            .unwrap_or_else(|| self.default_path.join(&self.directory_name))
    }

    /// Console for the end-of-run message, `None` when it is disabled
    #[must_use]
    pub fn console(&self) -> Option<Console> {
        if !self.print_summary {
            return None;
        }
        Some(match self.colors {
            Some(colors) => Console::with_config(ConsoleConfig::forced(colors)),
            None => Console::new(),
        })
    }
}
