//! Export pipeline: collect -> delegate -> invoke -> cleanup
//!
//! One call exports one request. Batch exports convert the delegate's files
//! one after another; there is no retry and the first fatal error ends the
//! run (files not yet converted are still removed).

use std::path::{Path, PathBuf};

use exor_shared::EXOR_MESH_FORMAT;

use crate::config::ConverterFailurePolicy;
use crate::converter::{ConversionOutcome, Converter, ConverterFlags};
use crate::delegate::{write_intermediate, FbxWriter};
use crate::descriptor::ExportDescriptor;
use crate::error::{ConversionError, Result};
use crate::options::ExportOptions;
use crate::staging::StagedFbx;

/// Result of converting one intermediate file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub fbx_path: PathBuf,
    /// Where the converter conventionally writes its output (not verified)
    pub expected_output: PathBuf,
    pub outcome: ConversionOutcome,
    /// Whether the intermediate file was found and deleted
    pub intermediate_removed: bool,
}

/// Summary of one export invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub requested_path: PathBuf,
    pub files: Vec<FileReport>,
}

impl ExportReport {
    /// Whether every converter run exited successfully
    pub fn all_converted(&self) -> bool {
        self.files.iter().all(|f| f.outcome.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.outcome.is_success())
    }
}

/// The full export pipeline over pluggable collaborators
pub struct ExportPipeline {
    writer: Box<dyn FbxWriter>,
    converter: Box<dyn Converter>,
    policy: ConverterFailurePolicy,
}

impl ExportPipeline {
    pub fn new(writer: impl FbxWriter + 'static, converter: impl Converter + 'static) -> Self {
        Self {
            writer: Box::new(writer),
            converter: Box::new(converter),
            policy: ConverterFailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ConverterFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the descriptor and run the pipeline.
    ///
    /// An empty `output_path` fails before anything is written or launched.
    pub fn export(&self, options: ExportOptions, output_path: impl AsRef<Path>) -> Result<ExportReport> {
        let descriptor = ExportDescriptor::new(options, output_path)?;
        self.run(&descriptor)
    }

    pub fn run(&self, descriptor: &ExportDescriptor) -> Result<ExportReport> {
        for note in descriptor.options().inert_settings() {
            tracing::warn!("{}", note);
        }

        let staged = write_intermediate(self.writer.as_ref(), descriptor)?;
        let flags = descriptor.converter_flags();

        let mut files = Vec::with_capacity(staged.len());
        for fbx in staged {
            files.push(self.convert_one(fbx, flags)?);
        }

        Ok(ExportReport {
            requested_path: descriptor.requested_path().to_path_buf(),
            files,
        })
    }

    fn convert_one(&self, fbx: StagedFbx, flags: ConverterFlags) -> Result<FileReport> {
        let fbx_path = fbx.path().to_path_buf();
        tracing::info!(
            path = %fbx_path.display(),
            remove_bones = flags.remove_bones_arg(),
            "Converting"
        );

        let converted = self.converter.convert(&fbx_path, flags);

        // Cleanup runs before any conversion error is surfaced.
        let intermediate_removed = match fbx.remove() {
            Ok(removed) => removed,
            Err(e) => {
                tracing::warn!(path = %fbx_path.display(), error = %e, "Failed to remove intermediate file");
                false
            }
        };

        let outcome = converted?;
        let expected_output = EXOR_MESH_FORMAT.expected_output(&fbx_path);

        if outcome.is_success() {
            tracing::debug!(
                output = %expected_output.display(),
                present = expected_output.exists(),
                "Converter finished"
            );
        } else {
            match self.policy {
                ConverterFailurePolicy::Ignore => tracing::warn!(
                    path = %fbx_path.display(),
                    code = %outcome.describe(),
                    "Converter exited unsuccessfully; continuing"
                ),
                ConverterFailurePolicy::Strict => {
                    return Err(ConversionError::ExitStatus {
                        path: fbx_path,
                        code: outcome.describe(),
                    }
                    .into())
                }
            }
        }

        Ok(FileReport {
            fbx_path,
            expected_output,
            outcome,
            intermediate_removed,
        })
    }
}
