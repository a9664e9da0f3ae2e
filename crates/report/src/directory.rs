//! Making sure the report directory exists

use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Creates the report directory before anything is written into it
pub trait DirectoryEnsurer {
    /// Create `path` if absent
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the directory cannot be created or the path
    /// exists but is not a directory
    fn ensure(&self, path: &Path) -> io::Result<()>;
}

impl<D: DirectoryEnsurer + ?Sized> DirectoryEnsurer for &D {
    fn ensure(&self, path: &Path) -> io::Result<()> {
        (**self).ensure(path)
    }
}

/// Creates directories on the local filesystem, parents included
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryEnsurer;

impl DirectoryEnsurer for FsDirectoryEnsurer {
    fn ensure(&self, path: &Path) -> io::Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a directory", path.display()),
            ));
        }

        debug!(path = %path.display(), "Creating report directory");
        fs::create_dir_all(path)
    }
}
