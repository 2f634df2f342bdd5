//! Export delegate
//!
//! Hands the descriptor to the host's FBX writer and takes ownership of the
//! files it produced.

mod batch;
mod blender;

pub use batch::{new_fbx_files, snapshot_fbx_files, FbxSnapshot};
pub use blender::{BlenderFbxWriter, EXPORT_SCRIPT};

use std::path::PathBuf;

use crate::descriptor::ExportDescriptor;
use crate::error::{DelegateError, Result};
use crate::staging::StagedFbx;

/// The host application's FBX exporter.
///
/// Receives the descriptor unmodified and returns every FBX file it wrote:
/// exactly one when batch mode is off, one per scene/collection otherwise.
pub trait FbxWriter {
    fn write(&self, descriptor: &ExportDescriptor) -> std::result::Result<Vec<PathBuf>, DelegateError>;
}

/// Run the writer and stage its output for cleanup.
///
/// Writer failures propagate unchanged; nothing is staged in that case.
pub fn write_intermediate(
    writer: &dyn FbxWriter,
    descriptor: &ExportDescriptor,
) -> Result<Vec<StagedFbx>> {
    tracing::info!(path = %descriptor.fbx_path().display(), "Writing intermediate FBX");

    let written = writer.write(descriptor)?;

    if written.is_empty() {
        if !descriptor.is_batch() {
            return Err(DelegateError::MissingOutput(descriptor.fbx_path().to_path_buf()).into());
        }
        tracing::warn!(
            batch_mode = ?descriptor.options().batch_mode,
            "Batch export produced no files"
        );
    }

    Ok(written.into_iter().map(StagedFbx::adopt).collect())
}
