//! Atomic report writes
//!
//! The bytes go to a temporary file in the destination directory, are
//! synced, and the file is then renamed onto the final path. A failure at
//! any step drops the temporary file, so the final path either holds the
//! complete report or does not exist.

use crate::{Error, Result};
use std::io::Write;
use std::path::Path;
use tracing::debug;

const TEMP_PREFIX: &str = ".stacktrace-";
const TEMP_SUFFIX: &str = ".tmp";

/// Write `bytes` to `path` atomically, refusing to replace an existing file.
///
/// # Errors
///
/// Returns [`Error::WriteFailure`] naming the failed step (`create`,
/// `write`, `sync` or `rename`). No file is left at `path` or in its
/// directory on failure.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(directory)
        .map_err(|e| Error::write_failure(path, "create", e))?;

    file.write_all(bytes)
        .map_err(|e| Error::write_failure(path, "write", e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| Error::write_failure(path, "sync", e))?;

    debug!(
        temp = %file.path().display(),
        path = %path.display(),
        bytes = bytes.len(),
        "Renaming report into place"
    );

    // On failure the returned PersistError owns the temp file and deletes it on drop
    file.persist_noclobber(path)
        .map_err(|e| Error::write_failure(path, "rename", e.error))?;

    Ok(())
}
