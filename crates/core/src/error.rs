//! Error types for the trace store

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use crate::ScopedId;
use miette::Diagnostic;
use thiserror::Error;

/// Error type for trace store operations
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two examples reported the same scoped id within one run
    #[error("Duplicate scoped id: {scoped_id}")]
    #[diagnostic(
        code(stacktrace::store::duplicate_key),
        help("Each example must report a unique scoped id; this points at a framework adapter bug")
    )]
    DuplicateKey {
        /// The scoped id that was already present
        scoped_id: ScopedId,
    },

    /// A trace arrived after the store was snapshotted
    #[error("Trace store is finalized; rejected trace for {scoped_id}")]
    #[diagnostic(
        code(stacktrace::store::finalized),
        help("A hook fired after the suite finished; check the order of after-suite callbacks")
    )]
    StoreFinalized {
        /// The scoped id of the rejected trace
        scoped_id: ScopedId,
    },

    /// Example metadata failed validation
    #[error("Invalid example metadata: {field} {reason}")]
    #[diagnostic(code(stacktrace::metadata::invalid))]
    InvalidMetadata {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl Error {
    /// Create a duplicate key error
    #[must_use]
    pub fn duplicate_key(scoped_id: ScopedId) -> Self {
        Self::DuplicateKey { scoped_id }
    }

    /// Create a store finalized error
    #[must_use]
    pub fn store_finalized(scoped_id: ScopedId) -> Self {
        Self::StoreFinalized { scoped_id }
    }

    /// Create an invalid metadata error
    #[must_use]
    pub fn invalid_metadata(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidMetadata {
            field,
            reason: reason.into(),
        }
    }

    /// Check if this is a duplicate key error.
    #[must_use]
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    /// Check if this error was caused by a finalized store.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        matches!(self, Self::StoreFinalized { .. })
    }
}

/// Result type for trace store operations
pub type Result<T> = std::result::Result<T, Error>;
