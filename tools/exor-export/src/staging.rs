//! Intermediate file ownership
//!
//! A `StagedFbx` is created only after the host has written the file, and
//! removes it when dropped, so cleanup happens on every exit path that
//! follows a successful write.

use std::path::{Path, PathBuf};

use exor_shared::fs::remove_file_if_exists;

/// Guard owning one intermediate FBX file
#[derive(Debug)]
pub struct StagedFbx {
    path: PathBuf,
    removed: bool,
}

impl StagedFbx {
    /// Take ownership of a file written by the delegate
    pub fn adopt(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            removed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now.
    ///
    /// Returns whether a file was deleted. A missing file is not an error.
    pub fn remove(mut self) -> std::io::Result<bool> {
        self.removed = true;
        remove_file_if_exists(&self.path)
    }
}

impl Drop for StagedFbx {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        match remove_file_if_exists(&self.path) {
            Ok(true) => tracing::debug!(path = %self.path.display(), "Removed intermediate file"),
            Ok(false) => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove intermediate file"
            ),
        }
    }
}
