//! Report assembly for stacktrace runs
//!
//! This crate turns a finished [`TraceStore`](stacktrace_core::TraceStore)
//! into a single report file:
//! - [`Renderer`]: records to bytes ([`JsonRenderer`] built in)
//! - [`PathProvider`]: a unique file name per report ([`UuidPathProvider`])
//! - [`DirectoryEnsurer`]: the report directory exists before writing
//!   ([`FsDirectoryEnsurer`])
//! - [`ReportAssembler`]: drives the above and writes atomically
//!
//! # Overview
//!
//! The collaborators are injected once, at run start. Reports are never
//! partially visible: bytes go to a temporary file in the report directory
//! which is then renamed into place.

mod assembler;
mod directory;
mod error;
mod paths;
mod renderer;
pub mod writer;

pub use assembler::ReportAssembler;
pub use directory::{DirectoryEnsurer, FsDirectoryEnsurer};
pub use error::{Error, RenderError, Result};
pub use paths::{PathProvider, UuidPathProvider};
pub use renderer::{JsonRenderer, REPORT_FORMAT_VERSION, Renderer};
