//! Test-run integration for stacktrace
//!
//! This crate connects a test framework's lifecycle to the trace store and
//! the report assembler:
//! - [`Tracer`] and [`MetadataSource`]: what the host framework provides
//! - [`RunLifecycle`]: the around-each-example and after-suite hooks
//! - [`ReportConfig`]: where reports go and whether the run summary prints
//! - [`logging`]: tracing subscriber setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use stacktrace_harness::{ReportConfig, RunLifecycle};
//!
//! // suite start
//! let run = RunLifecycle::from_config(MyTracer::default(), &ReportConfig::default())?;
//!
//! // around each example
//! run.around_example(&example_metadata, || example.run())?;
//!
//! // suite end: prints "Trace information is saved into spec/stack_trace/<uuid>.json"
//! let report = run.on_suite_complete()?;
//! ```

pub mod config;
mod error;
pub mod lifecycle;
pub mod logging;
mod tracer;

pub use config::{REPORT_DIR_ENV, ReportConfig};
pub use error::{Error, Result};
pub use lifecycle::RunLifecycle;
pub use tracer::{MetadataSource, Tracer};

// Re-exported so hosts only need this crate
pub use stacktrace_events::{Console, ConsoleConfig, RunSummary};
pub use stacktrace_core::{ExampleMetadata, RecordHandle, ScopedId, TraceRecord, TraceStore};
pub use stacktrace_report::{
    DirectoryEnsurer, FsDirectoryEnsurer, JsonRenderer, PathProvider, RenderError, Renderer,
    ReportAssembler, UuidPathProvider,
};
