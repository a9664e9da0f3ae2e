//! Trace records and the per-run trace store for stacktrace
//!
//! This crate holds the data side of a traced test run:
//! - [`ExampleMetadata`]: the five descriptive fields of an example
//! - [`TraceRecord`]: one example's trace plus its metadata
//! - [`TraceStore`]: the ordered, deduplicated, thread-safe accumulator that
//!   is snapshotted once at the end of the run
//!
//! The trace type is generic; the store never inspects it.
//!
//! # Example
//!
//! ```
//! use stacktrace_core::{ExampleMetadata, TraceStore};
//!
//! let store = TraceStore::new();
//! let meta = ExampleMetadata::new("./spec/calc_spec.rb", 3, "ex1", "adds", "Calc adds")?;
//! store.add(vec!["Calc#add"], meta)?;
//!
//! let snapshot = store.snapshot();
//! assert_eq!(snapshot.len(), 1);
//! # Ok::<(), stacktrace_core::Error>(())
//! ```

mod error;
mod metadata;
mod record;
pub mod store;

pub use error::{Error, Result};
pub use metadata::{ExampleMetadata, ScopedId};
pub use record::TraceRecord;
pub use store::{RecordHandle, Snapshot, TraceStore};
