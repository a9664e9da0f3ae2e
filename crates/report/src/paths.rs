//! Unique report file names

use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Chooses the file a report is written to.
///
/// Every call must return a path no earlier call returned, so that runs
/// sharing a directory never overwrite each other's reports.
pub trait PathProvider {
    /// Next report path inside `directory`
    fn next(&self, directory: &Path) -> PathBuf;
}

impl<P: PathProvider + ?Sized> PathProvider for &P {
    fn next(&self, directory: &Path) -> PathBuf {
        (**self).next(directory)
    }
}

/// Names reports `<uuid v4>.<extension>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UuidPathProvider {
    extension: String,
}

impl UuidPathProvider {
    /// Create a provider for the given extension (leading dots are ignored)
    #[must_use]
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Extension appended to every file name
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl PathProvider for UuidPathProvider {
    fn next(&self, directory: &Path) -> PathBuf {
        let id = Uuid::new_v4();
        if self.extension.is_empty() {
            directory.join(id.to_string())
        } else {
            directory.join(format!("{id}.{}", self.extension))
        }
    }
}
