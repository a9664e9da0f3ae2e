//! Tracing subscriber setup for traced test runs
//!
//! Diagnostics go to stderr so they never mix with the test framework's own
//! stdout. `RUST_LOG` wins over the configured level when set.

use std::io;
use std::sync::OnceLock;
pub use tracing::Level;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Pretty-printed human-readable format
    Pretty,
    /// Compact single-line format
    Compact,
    /// Structured JSON format
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown log format: {s}")),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Level for the stacktrace crates when no filter is given
    pub level: Level,
    /// Explicit filter directive, e.g. `stacktrace=debug`
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Compact,
            level: Level::WARN, // Stay quiet inside test output
            filter: None,
        }
    }
}

static RUN_ID: OnceLock<Uuid> = OnceLock::new();

/// Correlation id shared by every log line of this process
///
/// [`RunLifecycle`](crate::RunLifecycle) stamps it on its `example` and
/// `suite` spans, so every event of a run carries it.
pub fn run_id() -> Uuid {
    *RUN_ID.get_or_init(Uuid::new_v4)
}

fn level_str(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Build the filter for `config`, honouring `RUST_LOG`
///
/// # Errors
///
/// Returns an error if the filter directive does not parse
pub fn build_filter(config: &LoggingConfig) -> miette::Result<EnvFilter> {
    if let Some(filter) = &config.filter {
        return EnvFilter::try_new(filter)
            .map_err(|e| miette::miette!("Failed to create tracing filter: {e}"));
    }

    EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level = level_str(config.level);
            EnvFilter::try_new(format!(
                "stacktrace={level},stacktrace_core={level},stacktrace_report={level},stacktrace_harness={level}"
            ))
        })
        .map_err(|e| miette::miette!("Failed to create tracing filter: {e}"))
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> miette::Result<()> {
    let env_filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match config.format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(io::stderr)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(io::stderr)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_current_span(true),
            )
            .try_init(),
    };
    installed.map_err(|e| miette::miette!("Failed to install tracing subscriber: {e}"))?;

    tracing::info!(
        run_id = %run_id(),
        version = env!("CARGO_PKG_VERSION"),
        format = ?config.format,
        "Logging initialized"
    );

    Ok(())
}
