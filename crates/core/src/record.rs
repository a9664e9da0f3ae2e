//! A single stored trace

use crate::{ExampleMetadata, ScopedId};
use serde::Serialize;

/// One example's trace together with its metadata.
///
/// The trace is moved in on construction and owned by the record from then
/// on. Serializes as the flattened metadata fields plus a `trace` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceRecord<T> {
    #[serde(flatten)]
    metadata: ExampleMetadata,
    trace: T,
}

impl<T> TraceRecord<T> {
    /// Create a record from a trace and its metadata
    #[must_use]
    pub fn new(trace: T, metadata: ExampleMetadata) -> Self {
        Self { metadata, trace }
    }

    /// The captured trace
    #[must_use]
    pub fn trace(&self) -> &T {
        &self.trace
    }

    /// The example's metadata
    #[must_use]
    pub fn metadata(&self) -> &ExampleMetadata {
        &self.metadata
    }

    /// Shortcut for `metadata().scoped_id()`
    #[must_use]
    pub fn scoped_id(&self) -> &ScopedId {
        self.metadata.scoped_id()
    }

    /// Shortcut for `metadata().file_path()`
    #[must_use]
    pub fn file_path(&self) -> &str {
        self.metadata.file_path()
    }

    /// Shortcut for `metadata().line_number()`
    #[must_use]
    pub fn line_number(&self) -> u32 {
        self.metadata.line_number()
    }

    /// Shortcut for `metadata().description()`
    #[must_use]
    pub fn description(&self) -> &str {
        self.metadata.description()
    }

    /// Shortcut for `metadata().full_description()`
    #[must_use]
    pub fn full_description(&self) -> &str {
        self.metadata.full_description()
    }

    /// Split the record back into trace and metadata
    #[must_use]
    pub fn into_parts(self) -> (T, ExampleMetadata) {
        (self.trace, self.metadata)
    }
}
