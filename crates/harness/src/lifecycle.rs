//! Run lifecycle integration
//!
//! [`RunLifecycle`] is what a test framework's hooks talk to:
//!
//! - around each example: [`RunLifecycle::around_example`] runs the example
//!   inside the tracer and stores the trace with the example's metadata
//! - after the suite: [`RunLifecycle::on_suite_complete`] finalizes the store,
//!   writes the report and tells the user where it is
//!
//! One `RunLifecycle` owns the store of one suite run. Build it at suite
//! start and share it (e.g. behind an `Arc`) with every hook; there is no
//! process-wide state.

use crate::logging::run_id;
use crate::{Error, MetadataSource, ReportConfig, Result, Tracer};
use serde::Serialize;
use stacktrace_core::{ExampleMetadata, RecordHandle, TraceStore};
use stacktrace_events::{Console, RunSummary, emit_example_traced, emit_report_failed};
use stacktrace_report::{
    DirectoryEnsurer, FsDirectoryEnsurer, JsonRenderer, PathProvider, Renderer, ReportAssembler,
    UuidPathProvider,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument};

/// Hooks for one traced suite run
pub struct RunLifecycle<Tr: Tracer, R, P, D> {
    tracer: Tr,
    store: TraceStore<Tr::Trace>,
    assembler: ReportAssembler<R, P, D>,
    summary: Option<Box<dyn RunSummary>>,
}

impl<Tr> RunLifecycle<Tr, JsonRenderer, UuidPathProvider, FsDirectoryEnsurer>
where
    Tr: Tracer,
    Tr::Trace: Serialize,
{
    /// Build a lifecycle writing JSON reports as described by `config`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] if `config` is invalid or
    /// names an extension other than `json`
    pub fn from_config(tracer: Tr, config: &ReportConfig) -> Result<Self> {
        config.validate()?;

        let renderer = JsonRenderer::pretty();
        let extension = Renderer::<Tr::Trace>::extension(&renderer).to_string();
        if let Some(configured) = config.extension()
            && !configured.eq_ignore_ascii_case(&extension)
        {
            return Err(Error::configuration(format!(
                "extension {configured:?} does not match the {extension} renderer"
            )));
        }
        let directory = config.report_directory();
        info!(
            run_id = %run_id(),
            directory = %directory.display(),
            %extension,
            "Trace reports enabled"
        );

        let assembler = ReportAssembler::new(
            directory,
            renderer,
            UuidPathProvider::new(extension),
            FsDirectoryEnsurer,
        );
        Ok(Self::new(tracer, assembler).with_console(config.console()))
    }
}

impl<Tr, R, P, D> RunLifecycle<Tr, R, P, D>
where
    Tr: Tracer,
    R: Renderer<Tr::Trace>,
    P: PathProvider,
    D: DirectoryEnsurer,
{
    /// Create a lifecycle with an empty store and no end-of-run output
    #[must_use]
    pub fn new(tracer: Tr, assembler: ReportAssembler<R, P, D>) -> Self {
        Self {
            tracer,
            store: TraceStore::new(),
            assembler,
            summary: None,
        }
    }

    /// Print end-of-run messages to `console`, or nothing when `None`
    #[must_use]
    pub fn with_console(self, console: Option<Console>) -> Self {
        match console {
            Some(console) => self.with_summary(console),
            None => self,
        }
    }

    /// Announce the end of the run to `summary`
    #[must_use]
    pub fn with_summary(mut self, summary: impl RunSummary + 'static) -> Self {
        self.summary = Some(Box::new(summary));
        self
    }

    /// The run's trace store
    #[must_use]
    pub fn store(&self) -> &TraceStore<Tr::Trace> {
        &self.store
    }

    /// Run one example under the tracer and store its trace.
    ///
    /// The example's own result is returned untouched once the trace is
    /// stored. Metadata is read after the example ran, as frameworks may
    /// fill it in during the run.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Store`] if the metadata is invalid, the scoped
    /// id was already traced or the suite has already completed
    #[instrument(name = "example", skip_all, fields(run_id = %run_id()))]
    pub fn around_example<S, F, O>(&self, source: &S, example: F) -> Result<O>
    where
        S: MetadataSource + ?Sized,
        F: FnOnce() -> O,
    {
        let started = Instant::now();
        let (output, trace) = self.tracer.trace(example);
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let metadata = source.metadata()?;
        emit_example_traced!(metadata.scoped_id(), duration_ms);

        self.on_example_complete(trace, metadata)?;
        Ok(output)
    }

    /// Store the trace of an example that already ran
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Store`] on a duplicate scoped id or when the
    /// suite has already completed
    pub fn on_example_complete(
        &self,
        trace: Tr::Trace,
        metadata: ExampleMetadata,
    ) -> Result<RecordHandle> {
        Ok(self.store.add(trace, metadata)?)
    }

    /// Finalize the run and write the report.
    ///
    /// On success the report path is announced to the run summary (if any)
    /// and returned. On failure the error is announced and returned; no success
    /// message is ever printed for a report that was not written.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Report`] if the directory, rendering or the
    /// write fails
    #[instrument(
        name = "suite",
        skip_all,
        fields(run_id = %run_id(), examples = self.store.size())
    )]
    pub fn on_suite_complete(&self) -> Result<PathBuf> {
        match self.assembler.finish(&self.store) {
            Ok(path) => {
                if let Some(summary) = &self.summary {
                    summary.report_saved(&path);
                }
                Ok(path)
            }
            Err(e) => {
                emit_report_failed!(e);
                if let Some(summary) = &self.summary {
                    summary.report_failed(&e);
                }
                Err(e.into())
            }
        }
    }
}

impl<Tr: Tracer, R, P, D> std::fmt::Debug for RunLifecycle<Tr, R, P, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunLifecycle")
            .field("store", &self.store)
            .field("summary", &self.summary.is_some())
            .finish_non_exhaustive()
    }
}
