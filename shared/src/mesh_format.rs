//! File format constants for EXOR meshes.
//!
//! `MeshFormat` is the single source of truth for the extensions used on
//! both sides of the conversion, plus the name of the converter binary that
//! ships alongside the exporter.
//!
//! # Example
//!
//! ```
//! use exor_shared::EXOR_MESH_FORMAT;
//! use std::path::Path;
//!
//! assert_eq!(EXOR_MESH_FORMAT.extension, "mesh");
//!
//! let fbx = EXOR_MESH_FORMAT.intermediate_path(Path::new("rig.mesh"));
//! assert_eq!(fbx, Path::new("rig.fbx"));
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Format specification for the exporter's input/output files.
#[derive(Debug, Clone, Copy)]
pub struct MeshFormat {
    /// Final file extension without dot (e.g., "mesh")
    pub extension: &'static str,

    /// Extension of the intermediate file handed to the converter
    pub intermediate_ext: &'static str,

    /// File browser filter for the final format
    pub filter_glob: &'static str,

    /// File name of the converter executable
    pub converter_exe: &'static str,
}

impl MeshFormat {
    pub const fn new(
        extension: &'static str,
        intermediate_ext: &'static str,
        filter_glob: &'static str,
        converter_exe: &'static str,
    ) -> Self {
        Self {
            extension,
            intermediate_ext,
            filter_glob,
            converter_exe,
        }
    }

    /// Path of the intermediate file for a requested output path.
    ///
    /// The extension is always replaced (or added) so the result ends in the
    /// intermediate extension, whatever the caller asked for.
    pub fn intermediate_path(&self, requested: &Path) -> PathBuf {
        requested.with_extension(self.intermediate_ext)
    }

    /// Append the final extension unless the path already carries it.
    ///
    /// Comparison is case-insensitive, and a foreign extension is kept
    /// (`rig.obj` becomes `rig.obj.mesh`).
    pub fn ensure_extension(&self, path: &Path) -> PathBuf {
        if self.has_extension(path) {
            return path.to_path_buf();
        }
        let mut raw: OsString = path.as_os_str().to_owned();
        raw.push(".");
        raw.push(self.extension);
        PathBuf::from(raw)
    }

    /// Whether `path` ends with the final extension.
    pub fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(self.extension))
            .unwrap_or(false)
    }

    /// Where the converter is expected to leave its output by convention.
    pub fn expected_output(&self, intermediate: &Path) -> PathBuf {
        intermediate.with_extension(self.extension)
    }
}

/// EXOR mesh format: `.mesh` output, staged through `.fbx`.
pub const EXOR_MESH_FORMAT: MeshFormat =
    MeshFormat::new("mesh", "fbx", "*.mesh", "fbx_tool_win_release.exe");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intermediate_path_replaces_extension() {
        let fbx = EXOR_MESH_FORMAT.intermediate_path(Path::new("out/rig.mesh"));
        assert_eq!(fbx, PathBuf::from("out/rig.fbx"));
    }

    #[test]
    fn test_intermediate_path_adds_missing_extension() {
        let fbx = EXOR_MESH_FORMAT.intermediate_path(Path::new("scene"));
        assert_eq!(fbx, PathBuf::from("scene.fbx"));
    }

    #[test]
    fn test_intermediate_path_ignores_dotted_directories() {
        let fbx = EXOR_MESH_FORMAT.intermediate_path(Path::new("v1.mesh/rig.mesh"));
        assert_eq!(fbx, PathBuf::from("v1.mesh/rig.fbx"));
    }

    #[test]
    fn test_ensure_extension() {
        assert_eq!(
            EXOR_MESH_FORMAT.ensure_extension(Path::new("rig")),
            PathBuf::from("rig.mesh")
        );
        assert_eq!(
            EXOR_MESH_FORMAT.ensure_extension(Path::new("rig.MESH")),
            PathBuf::from("rig.MESH")
        );
        assert_eq!(
            EXOR_MESH_FORMAT.ensure_extension(Path::new("rig.obj")),
            PathBuf::from("rig.obj.mesh")
        );
    }

    #[test]
    fn test_expected_output() {
        let out = EXOR_MESH_FORMAT.expected_output(Path::new("rig.fbx"));
        assert_eq!(out, PathBuf::from("rig.mesh"));
    }
}
