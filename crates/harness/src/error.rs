//! Error types for the run lifecycle

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

/// Main error type for run lifecycle operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Storing a trace failed (duplicate id, finalized store, bad metadata)
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] stacktrace_core::Error),

    /// Assembling the report failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Report(#[from] stacktrace_report::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    #[diagnostic(code(stacktrace::config::invalid))]
    Configuration {
        /// The error message describing the configuration issue
        message: String,
    },

    /// I/O error with path context
    #[error("I/O error during {operation}: {source}")]
    #[diagnostic(code(stacktrace::io))]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// The path where the I/O error occurred, if applicable
        path: Option<Box<Path>>,
        /// Description of the operation that failed
        operation: String,
    },
}

impl Error {
    /// Create a configuration error with a message
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with path context
    #[must_use]
    pub fn io(
        source: std::io::Error,
        path: impl AsRef<Path>,
        operation: impl Into<String>,
    ) -> Self {
        Self::Io {
            source,
            path: Some(path.as_ref().into()),
            operation: operation.into(),
        }
    }

    /// The store error, if this is one
    #[must_use]
    pub fn as_store(&self) -> Option<&stacktrace_core::Error> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }

    /// The report error, if this is one
    #[must_use]
    pub fn as_report(&self) -> Option<&stacktrace_report::Error> {
        match self {
            Self::Report(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for run lifecycle operations
pub type Result<T> = std::result::Result<T, Error>;
