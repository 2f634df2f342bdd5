//! Error types for the export pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error returned by an export invocation.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Missing or invalid export settings. Raised before any I/O happens.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The host FBX writer failed. No intermediate file is left behind.
    #[error(transparent)]
    Delegate(#[from] DelegateError),

    /// The external converter could not be run or (in strict mode) failed.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("preset error: {0}")]
    Preset(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn configuration(message: impl Into<String>) -> Self {
        ExportError::Configuration(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error was raised before touching the filesystem
    pub fn is_configuration(&self) -> bool {
        matches!(self, ExportError::Configuration(_))
    }
}

/// Failure reported by the host FBX writer
#[derive(Error, Debug)]
pub enum DelegateError {
    /// The host application could not be started
    #[error("failed to launch FBX exporter {program}: {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The host exporter ran but reported a failure
    #[error("FBX exporter failed ({status}): {message}")]
    Failed { status: String, message: String },

    /// The exporter claimed success but no file exists at the target path
    #[error("FBX exporter produced no file at {0}")]
    MissingOutput(PathBuf),

    #[error("failed to serialize export keywords: {0}")]
    Keywords(#[from] serde_json::Error),

    /// No host executable could be located
    #[error("FBX exporter executable not found: {0}")]
    NotFound(String),
}

impl DelegateError {
    pub fn failed(status: impl Into<String>, message: impl Into<String>) -> Self {
        DelegateError::Failed {
            status: status.into(),
            message: message.into(),
        }
    }
}

/// Failure of the external converter
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The converter executable could not be started
    #[error("failed to launch converter {program}: {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The converter exited unsuccessfully
    #[error("converter failed on {path} (exit code: {code})")]
    ExitStatus { path: PathBuf, code: String },

    /// No converter executable could be located
    #[error("converter executable not found: {0}")]
    NotFound(String),
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;
