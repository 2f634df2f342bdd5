//! Tool configuration (`<config dir>/exor-export/config.toml`)
//!
//! ```toml
//! # Optional: explicit executables (otherwise PATH / sibling lookup)
//! blender = "/opt/blender/blender"
//! converter = "C:/tools/fbx_tool_win_release.exe"
//!
//! # "ignore" (default) or "strict"
//! on_converter_failure = "ignore"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

const CONFIG_FILE: &str = "config.toml";

/// What to do when the converter runs but exits unsuccessfully
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterFailurePolicy {
    /// Log a warning and carry on; the intermediate file is still removed
    #[default]
    Ignore,
    /// Fail the export with a conversion error
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub blender: Option<PathBuf>,
    #[serde(default)]
    pub converter: Option<PathBuf>,
    #[serde(default)]
    pub on_converter_failure: ConverterFailurePolicy,
}

pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "exor-export")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

impl ToolConfig {
    /// Load from an explicit file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ExportError::configuration(format!("invalid tool configuration: {}", e)))
    }

    /// Load from the user config directory, falling back to defaults when
    /// the file does not exist
    pub fn load_default() -> Result<Self> {
        match config_dir().map(|dir| dir.join(CONFIG_FILE)) {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}
