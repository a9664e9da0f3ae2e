//! Example metadata captured alongside each trace

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Identifier of one example within one run (e.g. `./spec/user_spec.rb[1:2:1]`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ScopedId(String);

impl ScopedId {
    /// Create a scoped id, rejecting blank values
    ///
    /// # Errors
    ///
    /// Returns error if the id is empty or only whitespace
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::invalid_metadata("scoped_id", "must not be blank"));
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScopedId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The five descriptive fields recorded for every traced example.
///
/// All fields are required at construction; there is no way to backfill
/// metadata once an example has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleMetadata {
    file_path: String,
    line_number: u32,
    scoped_id: ScopedId,
    description: String,
    full_description: String,
}

impl ExampleMetadata {
    /// Build metadata for one example.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMetadata`] if the file path or scoped id is
    /// blank, or if the line number is zero (lines are 1-based).
    pub fn new(
        file_path: impl Into<String>,
        line_number: u32,
        scoped_id: impl Into<String>,
        description: impl Into<String>,
        full_description: impl Into<String>,
    ) -> Result<Self> {
        let file_path = file_path.into();
        if file_path.trim().is_empty() {
            return Err(Error::invalid_metadata("file_path", "must not be blank"));
        }
        if line_number == 0 {
            return Err(Error::invalid_metadata("line_number", "must be 1 or greater"));
        }

        Ok(Self {
            file_path,
            line_number,
            scoped_id: ScopedId::new(scoped_id)?,
            description: description.into(),
            full_description: full_description.into(),
        })
    }

    /// Source file of the example
    #[must_use]
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Line of the example within [`Self::file_path`]
    #[must_use]
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// Run-unique id of the example
    #[must_use]
    pub fn scoped_id(&self) -> &ScopedId {
        &self.scoped_id
    }

    /// Short description of the example
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Description including all enclosing groups
    #[must_use]
    pub fn full_description(&self) -> &str {
        &self.full_description
    }
}
