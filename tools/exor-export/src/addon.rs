//! Add-on metadata and lifecycle
//!
//! The exporter is described by a static [`AddonInfo`] and driven through a
//! [`MeshExportAddon`]: `start()` resolves the host exporter and converter
//! and builds the pipeline, `stop()` tears it down.

use std::path::{Path, PathBuf};

use exor_shared::EXOR_MESH_FORMAT;

use crate::config::ToolConfig;
use crate::converter::ProcessConverter;
use crate::delegate::BlenderFbxWriter;
use crate::descriptor::ExportDescriptor;
use crate::error::{ExportError, Result};
use crate::options::ExportOptions;
use crate::pipeline::{ExportPipeline, ExportReport};

/// Registration metadata
#[derive(Debug, Clone, Copy)]
pub struct AddonInfo {
    pub name: &'static str,
    pub author: &'static str,
    pub version: (u32, u32, u32),
    /// Minimum host version
    pub host_version: (u32, u32, u32),
    pub location: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub operator_id: &'static str,
    pub operator_label: &'static str,
    pub menu_label: &'static str,
    pub filename_ext: &'static str,
    pub filter_glob: &'static str,
}

impl AddonInfo {
    /// Full menu path, e.g. "File > Export > EXOR Mesh (.mesh)"
    pub fn menu_entry(&self) -> String {
        format!("{} > {}", self.location, self.menu_label)
    }

    pub fn version_string(&self) -> String {
        let (major, minor, patch) = self.version;
        format!("{}.{}.{}", major, minor, patch)
    }
}

pub const EXOR_MESH_ADDON: AddonInfo = AddonInfo {
    name: "EXOR Mesh format",
    author: "lukaasm",
    version: (1, 0, 0),
    host_version: (2, 81, 6),
    location: "File > Export",
    description: "Export EXOR Mesh",
    category: "Export",
    operator_id: "export_scene.mesh",
    operator_label: "Export EXOR Mesh",
    menu_label: "EXOR Mesh (.mesh)",
    filename_ext: ".mesh",
    filter_glob: EXOR_MESH_FORMAT.filter_glob,
};

/// Add-on instance with explicit start/stop hooks
pub struct MeshExportAddon {
    info: AddonInfo,
    config: ToolConfig,
    blend_file: Option<PathBuf>,
    pipeline: Option<ExportPipeline>,
}

impl MeshExportAddon {
    pub fn new(config: ToolConfig) -> Self {
        Self {
            info: EXOR_MESH_ADDON,
            config,
            blend_file: None,
            pipeline: None,
        }
    }

    /// Scene file the host opens for each export
    pub fn with_blend_file(mut self, blend_file: impl Into<PathBuf>) -> Self {
        self.blend_file = Some(blend_file.into());
        self
    }

    pub fn is_started(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Resolve the host exporter and converter. Does nothing when already
    /// started.
    pub fn start(&mut self) -> Result<()> {
        if self.is_started() {
            return Ok(());
        }

        let mut writer = BlenderFbxWriter::locate(self.config.blender.as_deref())?;
        if let Some(blend) = &self.blend_file {
            writer = writer.with_blend_file(blend);
        }
        let converter = ProcessConverter::locate(self.config.converter.as_deref())?;

        tracing::info!(
            addon = self.info.name,
            version = %self.info.version_string(),
            host = %writer.program().display(),
            converter = %converter.program().display(),
            "Registered exporter"
        );

        self.start_with(ExportPipeline::new(writer, converter));
        Ok(())
    }

    /// Start with an already-built pipeline (custom collaborators)
    pub fn start_with(&mut self, pipeline: ExportPipeline) {
        self.pipeline = Some(pipeline.with_policy(self.config.on_converter_failure));
    }

    /// Drop the pipeline. Safe to call when not started.
    pub fn stop(&mut self) {
        if self.pipeline.take().is_some() {
            tracing::info!(addon = self.info.name, "Unregistered exporter");
        }
    }

    fn pipeline(&self) -> Result<&ExportPipeline> {
        self.pipeline.as_ref().ok_or_else(|| {
            ExportError::configuration(format!("{} is not started", self.info.name))
        })
    }

    /// Run one export through the started pipeline
    pub fn export(&self, options: ExportOptions, output_path: impl AsRef<Path>) -> Result<ExportReport> {
        self.pipeline()?.export(options, output_path)
    }

    /// Run an already-built descriptor through the started pipeline
    pub fn run(&self, descriptor: &ExportDescriptor) -> Result<ExportReport> {
        self.pipeline()?.run(descriptor)
    }
}
