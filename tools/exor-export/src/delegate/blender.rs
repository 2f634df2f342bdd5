//! Headless Blender as the FBX writer
//!
//! Runs `blender --background` with a short Python expression that feeds the
//! descriptor's keyword bundle to the bundled FBX exporter.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::converter::ConversionOutcome;
use crate::descriptor::ExportDescriptor;
use crate::error::DelegateError;

use super::batch::{new_fbx_files, snapshot_fbx_files};
use super::FbxWriter;

/// Python run inside the host. The keyword JSON follows `--` on the command line.
pub const EXPORT_SCRIPT: &str = r#"import json, sys
import bpy
from mathutils import Matrix
from io_scene_fbx import export_fbx_bin

class Reporter:
    def report(self, kind, message):
        print("%s: %s" % (", ".join(sorted(kind)), message), file=sys.stderr)

keywords = json.loads(sys.argv[sys.argv.index("--") + 1])
keywords["global_matrix"] = Matrix(keywords["global_matrix"])
keywords["object_types"] = set(keywords["object_types"])
result = export_fbx_bin.save(Reporter(), bpy.context, **keywords)
if "FINISHED" not in result:
    sys.exit(1)
"#;

/// How many trailing stderr lines end up in error messages
const STDERR_TAIL: usize = 10;

/// FBX writer backed by a Blender executable
#[derive(Debug, Clone)]
pub struct BlenderFbxWriter {
    program: PathBuf,
    blend_file: Option<PathBuf>,
}

impl BlenderFbxWriter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            blend_file: None,
        }
    }

    /// Locate Blender: explicit path, then `PATH`.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, DelegateError> {
        if let Some(path) = explicit {
            return Ok(Self::new(path));
        }
        which::which("blender")
            .map(Self::new)
            .map_err(|e| DelegateError::NotFound(format!("blender ({})", e)))
    }

    /// Scene file to open before exporting (startup file otherwise)
    pub fn with_blend_file(mut self, blend_file: impl Into<PathBuf>) -> Self {
        self.blend_file = Some(blend_file.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Build the host command line for a descriptor
    pub fn command(&self, descriptor: &ExportDescriptor) -> Result<Command, DelegateError> {
        let keywords = descriptor.keywords().to_json()?;

        let mut cmd = Command::new(&self.program);
        cmd.arg("--background");
        if let Some(blend) = &self.blend_file {
            cmd.arg(blend);
        }
        cmd.args(["--python-exit-code", "1", "--python-expr", EXPORT_SCRIPT])
            .arg("--")
            .arg(keywords);
        Ok(cmd)
    }
}

impl FbxWriter for BlenderFbxWriter {
    fn write(&self, descriptor: &ExportDescriptor) -> Result<Vec<PathBuf>, DelegateError> {
        let fbx_path = descriptor.fbx_path();
        let own_dir = descriptor.options().use_batch_own_dir;
        let before = descriptor
            .is_batch()
            .then(|| snapshot_fbx_files(fbx_path, own_dir));

        let mut cmd = self.command(descriptor)?;
        tracing::debug!(program = %self.program.display(), "Launching FBX exporter");

        let output = cmd.output().map_err(|source| DelegateError::Launch {
            program: self.program.clone(),
            source,
        })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            tracing::trace!(target: "exor_export::host", "{}", line);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let lines: Vec<&str> = stderr.lines().collect();
            let tail = lines[lines.len().saturating_sub(STDERR_TAIL)..].join("\n");
            let status = ConversionOutcome::from_status(output.status).describe();
            return Err(DelegateError::failed(status, tail));
        }

        match before {
            Some(before) => {
                let after = snapshot_fbx_files(fbx_path, own_dir);
                Ok(new_fbx_files(&before, &after))
            }
            None if fbx_path.is_file() => Ok(vec![fbx_path.to_path_buf()]),
            None => Err(DelegateError::MissingOutput(fbx_path.to_path_buf())),
        }
    }
}
