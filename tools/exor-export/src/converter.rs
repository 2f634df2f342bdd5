//! External `.mesh` converter
//!
//! The converter is a closed-box executable invoked as
//! `<tool> <fbx_path> 1 1 1 0 <remove_bones>`. The four leading flags are
//! fixed protocol constants; only the last one is derived from the options.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use exor_shared::EXOR_MESH_FORMAT;

use crate::error::ConversionError;

/// Fixed leading arguments of the converter protocol
pub const FIXED_ARGS: [&str; 4] = ["1", "1", "1", "0"];

/// Arguments derived from the export options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterFlags {
    /// Strip bones that do not deform any mesh
    pub remove_non_deform_bones: bool,
}

impl ConverterFlags {
    /// Flags for a given "only deform bones" export setting.
    ///
    /// When the FBX already holds deform bones only, nothing is stripped;
    /// otherwise the converter is asked to strip them itself.
    pub fn from_deform_only(deform_only: bool) -> Self {
        Self {
            remove_non_deform_bones: !deform_only,
        }
    }

    pub fn remove_bones_arg(&self) -> &'static str {
        if self.remove_non_deform_bones {
            "1"
        } else {
            "0"
        }
    }

    /// Full argument list for one FBX file
    pub fn args(&self, fbx_path: &Path) -> Vec<String> {
        let mut args = Vec::with_capacity(6);
        args.push(fbx_path.to_string_lossy().into_owned());
        args.extend(FIXED_ARGS.iter().map(|s| s.to_string()));
        args.push(self.remove_bones_arg().to_string());
        args
    }
}

/// What the converter reported after running to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOutcome {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl ConversionOutcome {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn from_status(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn describe(&self) -> String {
        self.code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Something that turns an FBX file into a `.mesh` file.
///
/// Implementations return `Err` only when the conversion could not be
/// attempted at all; an unsuccessful run is an `Ok` outcome.
pub trait Converter {
    fn convert(
        &self,
        fbx_path: &Path,
        flags: ConverterFlags,
    ) -> Result<ConversionOutcome, ConversionError>;
}

/// Runs the converter executable as a child process
#[derive(Debug, Clone)]
pub struct ProcessConverter {
    program: PathBuf,
}

impl ProcessConverter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate the converter: explicit path, sibling of the running binary,
    /// then `PATH`.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ConversionError> {
        find_converter(explicit).map(Self::new)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Converter for ProcessConverter {
    fn convert(
        &self,
        fbx_path: &Path,
        flags: ConverterFlags,
    ) -> Result<ConversionOutcome, ConversionError> {
        let args = flags.args(fbx_path);
        tracing::debug!(program = %self.program.display(), ?args, "Running converter");

        // Blocks until the tool exits; stdout/stderr are inherited.
        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|source| ConversionError::Launch {
                program: self.program.clone(),
                source,
            })?;

        let outcome = ConversionOutcome::from_status(status);
        tracing::debug!(code = %outcome.describe(), "Converter exited");
        Ok(outcome)
    }
}

/// Find the converter executable
fn find_converter(explicit: Option<&Path>) -> Result<PathBuf, ConversionError> {
    let exe_name = EXOR_MESH_FORMAT.converter_exe;

    // 1. Explicitly configured
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(ConversionError::NotFound(format!(
            "configured converter does not exist: {}",
            path.display()
        )));
    }

    // 2. Shipped next to the exporter binary
    if let Ok(current_exe) = std::env::current_exe() {
        if let Some(exe_dir) = current_exe.parent() {
            let sibling = exe_dir.join(exe_name);
            if sibling.exists() {
                return Ok(sibling);
            }
        }
    }

    // 3. Installed on PATH
    if let Ok(path) = which::which(exe_name) {
        return Ok(path);
    }

    Err(ConversionError::NotFound(format!(
        "{exe_name}\n\
        Options:\n\
        - Set `converter` in the tool configuration\n\
        - Place {exe_name} next to the exor-export binary\n\
        - Add its directory to PATH"
    )))
}
