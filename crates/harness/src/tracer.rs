//! Seams to the host test framework
//!
//! The harness does not capture traces or read framework metadata itself;
//! it is handed a [`Tracer`] and, per example, a [`MetadataSource`].

use stacktrace_core::ExampleMetadata;

/// Captures the execution trace of one unit of work
pub trait Tracer {
    /// Opaque trace value produced for one example
    type Trace;

    /// Run `unit` and return its result together with the trace of exactly
    /// that run
    fn trace<F, O>(&self, unit: F) -> (O, Self::Trace)
    where
        F: FnOnce() -> O;
}

impl<Tr: Tracer> Tracer for &Tr {
    type Trace = Tr::Trace;

    fn trace<F, O>(&self, unit: F) -> (O, Self::Trace)
    where
        F: FnOnce() -> O,
    {
        (**self).trace(unit)
    }
}

/// Supplies the metadata of the currently running example
pub trait MetadataSource {
    /// Extract file path, line number, scoped id and both descriptions
    ///
    /// # Errors
    ///
    /// Returns [`stacktrace_core::Error::InvalidMetadata`] if a field is
    /// missing or malformed
    fn metadata(&self) -> stacktrace_core::Result<ExampleMetadata>;
}

impl MetadataSource for ExampleMetadata {
    fn metadata(&self) -> stacktrace_core::Result<ExampleMetadata> {
        Ok(self.clone())
    }
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn metadata(&self) -> stacktrace_core::Result<ExampleMetadata> {
        (**self).metadata()
    }
}
