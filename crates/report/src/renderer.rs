//! Renderers turn a run's records into report bytes

use crate::RenderError;
use serde::Serialize;
use stacktrace_core::TraceRecord;

/// Format version written into every JSON report
pub const REPORT_FORMAT_VERSION: u32 = 1;

/// Turns an ordered sequence of records into the bytes of a report.
///
/// Implementations must be deterministic: identical records produce
/// identical bytes.
pub trait Renderer<T> {
    /// Render every record, in the given order
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the records cannot be rendered
    fn render(&self, records: &[TraceRecord<T>]) -> Result<Vec<u8>, RenderError>;

    /// File extension for the rendered artifact, without the dot
    fn extension(&self) -> &str;
}

impl<T, R: Renderer<T> + ?Sized> Renderer<T> for &R {
    fn render(&self, records: &[TraceRecord<T>]) -> Result<Vec<u8>, RenderError> {
        (**self).render(records)
    }

    fn extension(&self) -> &str {
        (**self).extension()
    }
}

#[derive(Serialize)]
struct ReportDocument<'a, T> {
    version: u32,
    example_count: usize,
    examples: &'a [TraceRecord<T>],
}

/// Renders a self-contained JSON document of every record
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    /// Create a renderer with compact output.
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Create a renderer with pretty-printed output.
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl<T: Serialize> Renderer<T> for JsonRenderer {
    fn render(&self, records: &[TraceRecord<T>]) -> Result<Vec<u8>, RenderError> {
        let document = ReportDocument {
            version: REPORT_FORMAT_VERSION,
            example_count: records.len(),
            examples: records,
        };

        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&document)
        } else {
            serde_json::to_vec(&document)
        };
        bytes.map_err(|e| RenderError::with_source("Failed to serialize trace records", e))
    }

    fn extension(&self) -> &str {
        "json"
    }
}
