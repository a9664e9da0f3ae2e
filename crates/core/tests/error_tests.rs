//! Tests for error types

use stacktrace_core::{Error, ExampleMetadata, ScopedId};

#[test]
fn test_duplicate_key_error() {
    let error = Error::duplicate_key(ScopedId::new("ex1").unwrap());
    assert_eq!(error.to_string(), "Duplicate scoped id: ex1");
    assert!(error.is_duplicate_key());
    assert!(!error.is_finalized());
}

#[test]
fn test_store_finalized_error() {
    let error = Error::store_finalized(ScopedId::new("ex2").unwrap());
    assert_eq!(
        error.to_string(),
        "Trace store is finalized; rejected trace for ex2"
    );
    assert!(error.is_finalized());
}

#[test]
fn test_invalid_metadata_error() {
    let error = ExampleMetadata::new("spec.rb", 0, "ex1", "d", "fd").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Invalid example metadata: line_number must be 1 or greater"
    );
}

#[test]
fn test_diagnostic_codes() {
    use miette::Diagnostic;

    let error = Error::duplicate_key(ScopedId::new("ex1").unwrap());
    let code = error.code().map(|c| c.to_string());
    assert_eq!(code.as_deref(), Some("stacktrace::store::duplicate_key"));
    assert!(error.help().is_some());
}
