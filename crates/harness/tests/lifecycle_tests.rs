//! Integration tests for the run lifecycle hooks.

use stacktrace_harness::{
    Error, ExampleMetadata, FsDirectoryEnsurer, JsonRenderer, MetadataSource, ReportAssembler,
    ReportConfig, RunLifecycle, RunSummary, Tracer, UuidPathProvider, logging,
};
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tempfile::TempDir;

// =============================================================================
// Test collaborators
// =============================================================================

/// Tracer whose trace is the sequence number of the traced call
#[derive(Default)]
struct SequenceTracer {
    calls: AtomicUsize,
}

impl Tracer for SequenceTracer {
    type Trace = Vec<String>;

    fn trace<F, O>(&self, unit: F) -> (O, Self::Trace)
    where
        F: FnOnce() -> O,
    {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let output = unit();
        (output, vec![format!("call-{n}")])
    }
}

/// Metadata source whose framework never filled in a line number
struct MissingLine;

impl MetadataSource for MissingLine {
    fn metadata(&self) -> stacktrace_core::Result<ExampleMetadata> {
        ExampleMetadata::new("./spec/broken_spec.rb", 0, "broken", "d", "fd")
    }
}

/// Summary that records every announcement instead of printing it
#[derive(Clone, Default)]
struct RecordingSummary {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingSummary {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl RunSummary for RecordingSummary {
    fn report_saved(&self, path: &Path) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("saved {}", path.display()));
    }

    fn report_failed(&self, error: &dyn Display) {
        self.lines.lock().unwrap().push(format!("failed {error}"));
    }
}

/// Log sink shared between the subscriber and the test
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn example(id: &str) -> ExampleMetadata {
    ExampleMetadata::new(
        "./spec/models/order_spec.rb",
        10,
        id,
        "totals",
        format!("Order totals ({id})"),
    )
    .unwrap()
}

type JsonRun = RunLifecycle<SequenceTracer, JsonRenderer, UuidPathProvider, FsDirectoryEnsurer>;

fn json_run(dir: &Path) -> JsonRun {
    RunLifecycle::new(SequenceTracer::default(), ReportAssembler::json(dir))
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_around_example_returns_example_output() {
    let temp = TempDir::new().unwrap();
    let run = json_run(temp.path());

    let output = run.around_example(&example("ex1"), || 40 + 2).unwrap();

    assert_eq!(output, 42);
    assert_eq!(run.store().size(), 1);
}

#[test]
fn test_suite_report_contains_examples_in_run_order() {
    let temp = TempDir::new().unwrap();
    let run = json_run(temp.path());

    for id in ["ex1", "ex2", "ex3"] {
        run.around_example(&example(id), || ()).unwrap();
    }
    let path = run.on_suite_complete().unwrap();

    let json = read_json(&path);
    assert_eq!(json["example_count"], 3);
    assert_eq!(json["examples"][0]["scoped_id"], "ex1");
    assert_eq!(json["examples"][1]["scoped_id"], "ex2");
    assert_eq!(json["examples"][2]["scoped_id"], "ex3");
    assert_eq!(json["examples"][2]["trace"][0], "call-2");
    assert_eq!(json["examples"][0]["full_description"], "Order totals (ex1)");
}

#[test]
fn test_duplicate_example_is_reported() {
    let temp = TempDir::new().unwrap();
    let run = json_run(temp.path());

    run.around_example(&example("ex1"), || ()).unwrap();
    let err = run.around_example(&example("ex1"), || ()).unwrap_err();

    assert!(err.as_store().is_some_and(|e| e.is_duplicate_key()));
    assert_eq!(run.store().size(), 1);
}

#[test]
fn test_invalid_metadata_is_reported() {
    let temp = TempDir::new().unwrap();
    let run = json_run(temp.path());

    let err = run.around_example(&MissingLine, || ()).unwrap_err();
    assert!(matches!(
        err,
        Error::Store(stacktrace_core::Error::InvalidMetadata { field: "line_number", .. })
    ));
    assert_eq!(run.store().size(), 0);
}

#[test]
fn test_example_after_suite_is_rejected() {
    let temp = TempDir::new().unwrap();
    let run = json_run(temp.path());
    run.around_example(&example("ex1"), || ()).unwrap();
    let path = run.on_suite_complete().unwrap();

    let ran = AtomicUsize::new(0);
    let err = run
        .around_example(&example("ex2"), || ran.fetch_add(1, Ordering::SeqCst))
        .unwrap_err();

    assert_eq!(ran.load(Ordering::SeqCst), 1);
    assert!(err.as_store().is_some_and(|e| e.is_finalized()));
    assert_eq!(read_json(&path)["example_count"], 1);
}

#[test]
fn test_on_example_complete_stores_given_trace() {
    let temp = TempDir::new().unwrap();
    let run = json_run(temp.path());

    let handle = run
        .on_example_complete(vec!["external".to_string()], example("ex1"))
        .unwrap();
    assert_eq!(handle.position(), 0);
    assert_eq!(handle.scoped_id().as_str(), "ex1");
}

#[test]
fn test_unavailable_directory_propagates() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("spec");
    fs::write(&blocker, b"").unwrap();

    let run = json_run(&blocker.join("stack_trace"));
    run.around_example(&example("ex1"), || ()).unwrap();

    let err = run.on_suite_complete().unwrap_err();
    assert!(err.as_report().is_some_and(|e| e.is_directory_unavailable()));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn test_parallel_examples() {
    let temp = TempDir::new().unwrap();
    let run = Arc::new(json_run(temp.path()));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let run = Arc::clone(&run);
            thread::spawn(move || {
                for i in 0..25 {
                    run.around_example(&example(&format!("t{t}-ex{i}")), || ())
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let path = run.on_suite_complete().unwrap();
    assert_eq!(read_json(&path)["example_count"], 100);
}

#[test]
fn test_from_config_uses_directory_and_extension() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("reports");
    let config = ReportConfig {
        directory: Some(dir.clone()),
        extension: Some(".JSON".to_string()),
        print_summary: false,
        ..ReportConfig::default()
    };

    let path = temp_env::with_var_unset(stacktrace_harness::REPORT_DIR_ENV, || {
        let run = RunLifecycle::from_config(SequenceTracer::default(), &config).unwrap();
        run.around_example(&example("ex1"), || ()).unwrap();
        run.on_suite_complete().unwrap()
    });

    assert!(path.starts_with(&dir));
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
    assert_eq!(read_json(&path)["examples"][0]["trace"][0], "call-0");
}

#[test]
fn test_from_config_rejects_foreign_extension() {
    let config = ReportConfig {
        extension: Some("html".to_string()),
        ..ReportConfig::default()
    };

    let err = RunLifecycle::from_config(SequenceTracer::default(), &config).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().contains("\"html\""));
}

#[test]
fn test_from_config_rejects_extension_with_separator() {
    let config = ReportConfig {
        extension: Some("json/../../escape".to_string()),
        ..ReportConfig::default()
    };

    let err = RunLifecycle::from_config(SequenceTracer::default(), &config).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_from_config_rejects_invalid_config() {
    let config = ReportConfig {
        directory_name: String::new(),
        ..ReportConfig::default()
    };

    let err = RunLifecycle::from_config(SequenceTracer::default(), &config).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_custom_json_renderer_lifecycle() {
    let temp = TempDir::new().unwrap();
    let assembler = ReportAssembler::new(
        temp.path(),
        JsonRenderer::new(),
        UuidPathProvider::new("json"),
        FsDirectoryEnsurer,
    );
    let run = RunLifecycle::new(SequenceTracer::default(), assembler);
    run.around_example(&example("ex1"), || ()).unwrap();

    let first = run.on_suite_complete().unwrap();
    let second = run.on_suite_complete().unwrap();

    assert_ne!(first, second);
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_summary_announces_saved_report() {
    let temp = TempDir::new().unwrap();
    let summary = RecordingSummary::default();
    let run = json_run(temp.path()).with_summary(summary.clone());
    run.around_example(&example("ex1"), || ()).unwrap();

    let path = run.on_suite_complete().unwrap();

    assert_eq!(summary.lines(), vec![format!("saved {}", path.display())]);
}

#[test]
fn test_failed_report_is_never_announced_as_saved() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("spec");
    fs::write(&blocker, b"").unwrap();

    let summary = RecordingSummary::default();
    let run = json_run(&blocker.join("stack_trace")).with_summary(summary.clone());
    run.around_example(&example("ex1"), || ()).unwrap();

    let err = run.on_suite_complete().unwrap_err();

    let lines = summary.lines();
    assert_eq!(lines, vec![format!("failed {err}")]);
    assert!(lines.iter().all(|line| !line.starts_with("saved")));
}

#[test]
fn test_run_events_carry_run_id() {
    let temp = TempDir::new().unwrap();
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let path: PathBuf = tracing::subscriber::with_default(subscriber, || {
        let run = json_run(temp.path());
        run.around_example(&example("ex1"), || ()).unwrap();
        run.on_suite_complete().unwrap()
    });

    let output = logs.contents();
    let run_id = logging::run_id().to_string();
    let lines: Vec<&str> = output.lines().filter(|l| !l.trim().is_empty()).collect();

    assert!(!lines.is_empty());
    assert!(output.contains(&path.display().to_string()));
    for line in lines {
        assert!(line.contains(&run_id), "missing run id: {line}");
    }
}
