//! Error types for report assembly

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure reported by a [`Renderer`](crate::Renderer)
#[derive(Error, Debug)]
#[error("{message}")]
pub struct RenderError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RenderError {
    /// Create a render error with a message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a render error wrapping an underlying cause
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The render failure message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error type for report assembly
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The report directory could not be created or is not a directory
    #[error("Report directory {} is unavailable", path.display())]
    #[diagnostic(
        code(stacktrace::report::directory_unavailable),
        help("Check that the parent directory exists and is writable")
    )]
    DirectoryUnavailable {
        /// Directory that could not be ensured
        path: Box<Path>,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The renderer rejected the records
    #[error("Failed to render report: {source}")]
    #[diagnostic(code(stacktrace::report::render))]
    Render {
        /// The renderer's error
        #[source]
        source: RenderError,
    },

    /// Writing or renaming the report file failed
    #[error("Failed to write report {} during {operation}", path.display())]
    #[diagnostic(
        code(stacktrace::report::write),
        help("Check free disk space and permissions of the report directory")
    )]
    WriteFailure {
        /// Final path of the report
        path: Box<Path>,
        /// Operation that failed (e.g., "create", "write", "sync", "rename")
        operation: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a directory unavailable error
    #[must_use]
    pub fn directory_unavailable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::DirectoryUnavailable {
            path: path.as_ref().into(),
            source,
        }
    }

    /// Create a write failure error
    #[must_use]
    pub fn write_failure(
        path: impl AsRef<Path>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::WriteFailure {
            path: path.as_ref().into(),
            operation: operation.into(),
            source,
        }
    }

    /// Path the failure relates to, if any
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        match self {
            Self::DirectoryUnavailable { path, .. } | Self::WriteFailure { path, .. } => {
                Some(path.to_path_buf())
            }
            Self::Render { .. } => None,
        }
    }

    /// Check if the report directory was unavailable
    #[must_use]
    pub fn is_directory_unavailable(&self) -> bool {
        matches!(self, Self::DirectoryUnavailable { .. })
    }

    /// Check if rendering failed
    #[must_use]
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render { .. })
    }

    /// Check if writing the file failed
    #[must_use]
    pub fn is_write_failure(&self) -> bool {
        matches!(self, Self::WriteFailure { .. })
    }
}

impl From<RenderError> for Error {
    fn from(source: RenderError) -> Self {
        Self::Render { source }
    }
}

/// Result type for report assembly
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        let error: Error = RenderError::new("unsupported trace").into();
        assert_eq!(error.to_string(), "Failed to render report: unsupported trace");
        assert!(error.is_render());
        assert!(error.path().is_none());
    }

    #[test]
    fn test_render_error_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::other("boom");
        let error = RenderError::with_source("template failed", io);
        assert_eq!(error.message(), "template failed");
        assert_eq!(error.source().map(|s| s.to_string()).as_deref(), Some("boom"));
    }

    #[test]
    fn test_write_failure_display() {
        let error = Error::write_failure(
            "/tmp/r/a.json",
            "rename",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert_eq!(
            error.to_string(),
            "Failed to write report /tmp/r/a.json during rename"
        );
        assert!(error.is_write_failure());
        assert_eq!(error.path(), Some(PathBuf::from("/tmp/r/a.json")));
    }
}
