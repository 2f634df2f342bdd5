//! exor-export library
//!
//! Exports scenes to the EXOR `.mesh` format. The host application writes an
//! intermediate FBX file, an external converter turns it into `.mesh`, and
//! the intermediate file is removed afterwards.
//!
//! The pipeline is `collect -> delegate -> invoke -> cleanup`:
//!
//! - [`ExportDescriptor`] collects and validates the export options
//! - [`FbxWriter`] is the host exporter the descriptor is handed to
//! - [`Converter`] runs the external conversion tool
//! - [`StagedFbx`] owns the intermediate file and deletes it on drop

pub mod addon;
pub mod config;
pub mod converter;
pub mod delegate;
pub mod descriptor;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod preset;
pub mod staging;

pub use exor_shared::{MeshFormat, EXOR_MESH_FORMAT};

pub use addon::{AddonInfo, MeshExportAddon, EXOR_MESH_ADDON};
pub use config::{ConverterFailurePolicy, ToolConfig};
pub use converter::{ConversionOutcome, Converter, ConverterFlags, ProcessConverter};
pub use delegate::{BlenderFbxWriter, FbxWriter};
pub use descriptor::{ExportDescriptor, FbxKeywords};
pub use error::{ConversionError, DelegateError, ExportError, Result};
pub use options::{axis_conversion, Axis, ExportOptions};
pub use pipeline::{ExportPipeline, ExportReport, FileReport};
pub use preset::PresetStore;
pub use staging::StagedFbx;
