//! End-of-run report assembly
//!
//! ## Finish Sequence
//!
//! ```text
//! 1. store.snapshot()          - freeze the run, records in insertion order
//! 2. directories.ensure(dir)   - DirectoryUnavailable on failure, nothing written
//! 3. paths.next(dir)           - fresh, unique file path
//! 4. renderer.render(records)  - Render on failure, nothing written
//! 5. write_atomic(path, bytes) - WriteFailure on failure, no file at path
//! 6. return path
//! ```
//!
//! Nothing is retried; every failure is returned to the caller as its own
//! variant.

use crate::writer::write_atomic;
use crate::{
    DirectoryEnsurer, Error, FsDirectoryEnsurer, JsonRenderer, PathProvider, Renderer, Result,
    UuidPathProvider,
};
use stacktrace_core::TraceStore;
use stacktrace_events::{emit_report_rendered, emit_report_saved};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Turns a finished [`TraceStore`] into one report file.
///
/// Holds only its injected collaborators and the target directory; every
/// [`finish`](Self::finish) call produces a new, independent artifact.
#[derive(Debug, Clone)]
pub struct ReportAssembler<R, P, D> {
    directory: PathBuf,
    renderer: R,
    paths: P,
    directories: D,
}

impl ReportAssembler<JsonRenderer, UuidPathProvider, FsDirectoryEnsurer> {
    /// Assembler writing pretty JSON reports named `<uuid>.json` into `directory`
    #[must_use]
    pub fn json(directory: impl Into<PathBuf>) -> Self {
        Self::new(
            directory,
            JsonRenderer::pretty(),
            UuidPathProvider::new("json"),
            FsDirectoryEnsurer,
        )
    }
}

impl<R, P, D> ReportAssembler<R, P, D>
where
    P: PathProvider,
    D: DirectoryEnsurer,
{
    /// Create an assembler from its collaborators
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, renderer: R, paths: P, directories: D) -> Self {
        Self {
            directory: directory.into(),
            renderer,
            paths,
            directories,
        }
    }

    /// Directory reports are written into
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The injected renderer
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Snapshot `store`, render it and persist the report.
    ///
    /// Callers must not call this while examples may still add traces; any
    /// late `add` will fail with `StoreFinalized`.
    ///
    /// # Errors
    ///
    /// - [`Error::DirectoryUnavailable`] if the directory cannot be ensured
    /// - [`Error::Render`] if the renderer fails
    /// - [`Error::WriteFailure`] if the temp write or the rename fails
    ///
    /// In every case no partial report is left behind.
    #[instrument(skip_all, fields(directory = %self.directory.display()))]
    pub fn finish<T>(&self, store: &TraceStore<T>) -> Result<PathBuf>
    where
        R: Renderer<T>,
    {
        let records = store.snapshot();

        self.directories
            .ensure(&self.directory)
            .map_err(|e| Error::directory_unavailable(&self.directory, e))?;

        let path = self.paths.next(&self.directory);
        debug!(path = %path.display(), examples = records.len(), "Rendering report");

        let bytes = self.renderer.render(&records)?;
        emit_report_rendered!(records.len(), bytes.len());

        write_atomic(&path, &bytes)?;
        emit_report_saved!(path.display());

        Ok(path)
    }
}
