//! Structured events for stacktrace report runs.
//!
//! Every lifecycle step of a run (a trace stored, the store finalized, the
//! report rendered and saved) is emitted as a `tracing` event with a stable
//! `target` and an `event_type` field, so any subscriber can follow a run
//! without the core crates printing anything themselves.
//!
//! The only place allowed to write to the terminal is [`console`], which
//! renders the end-of-run message.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stacktrace_events::{emit_trace_stored, emit_report_saved};
//!
//! emit_trace_stored!("./spec/user_spec.rb[1:1]", 0_usize);
//! emit_report_saved!("spec/stack_trace/5c1f.json");
//! ```

pub mod console;

pub use console::{
    Console, ConsoleConfig, RunSummary, format_report_failed, format_report_saved,
};

// ============================================================================
// Store Events
// ============================================================================

/// Emit a trace stored event.
///
/// # Example
/// ```rust,ignore
/// emit_trace_stored!("./spec/user_spec.rb[1:1]", 0_usize);
/// ```
#[macro_export]
macro_rules! emit_trace_stored {
    ($scoped_id:expr, $position:expr) => {
        ::tracing::debug!(
            target: "stacktrace::store",
            event_type = "store.trace_stored",
            scoped_id = %$scoped_id,
            position = $position,
        )
    };
}

/// Emit a trace rejected event (duplicate id or finalized store).
#[macro_export]
macro_rules! emit_trace_rejected {
    ($scoped_id:expr, $reason:expr) => {
        ::tracing::warn!(
            target: "stacktrace::store",
            event_type = "store.trace_rejected",
            scoped_id = %$scoped_id,
            reason = %$reason,
        )
    };
}

/// Emit a store finalized event.
#[macro_export]
macro_rules! emit_store_finalized {
    ($records:expr) => {
        ::tracing::info!(
            target: "stacktrace::store",
            event_type = "store.finalized",
            records = $records,
        )
    };
}

// ============================================================================
// Report Events
// ============================================================================

/// Emit a report rendered event.
///
/// # Example
/// ```rust,ignore
/// emit_report_rendered!(3_usize, 1024_usize);
/// ```
#[macro_export]
macro_rules! emit_report_rendered {
    ($examples:expr, $bytes:expr) => {
        ::tracing::info!(
            target: "stacktrace::report",
            event_type = "report.rendered",
            examples = $examples,
            bytes = $bytes,
        )
    };
}

/// Emit a report saved event.
#[macro_export]
macro_rules! emit_report_saved {
    ($path:expr) => {
        ::tracing::info!(
            target: "stacktrace::report",
            event_type = "report.saved",
            path = %$path,
        )
    };
}

/// Emit a report failed event.
#[macro_export]
macro_rules! emit_report_failed {
    ($error:expr) => {
        ::tracing::error!(
            target: "stacktrace::report",
            event_type = "report.failed",
            error = %$error,
        )
    };
}

// ============================================================================
// Run Events
// ============================================================================

/// Emit an example traced event.
#[macro_export]
macro_rules! emit_example_traced {
    ($scoped_id:expr, $duration_ms:expr) => {
        ::tracing::debug!(
            target: "stacktrace::run",
            event_type = "run.example_traced",
            scoped_id = %$scoped_id,
            duration_ms = $duration_ms,
        )
    };
}
