//! Filesystem helpers shared across the exporter crates.

use std::io;
use std::path::Path;

/// Remove a file, treating an already-absent file as success.
///
/// Returns `true` when a file was actually deleted.
pub fn remove_file_if_exists(path: &Path) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
