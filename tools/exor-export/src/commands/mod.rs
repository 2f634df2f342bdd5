//! Subcommand implementations

pub mod export;
pub mod info;
pub mod matrix;
pub mod options;
pub mod preset;

use anyhow::{Context, Result};
use exor_export::PresetStore;
use std::path::PathBuf;

/// Preset store at an explicit directory or the user config location
pub fn preset_store(dir: Option<PathBuf>) -> Result<PresetStore> {
    match dir {
        Some(dir) => Ok(PresetStore::new(dir)),
        None => PresetStore::default_location()
            .context("Could not determine the user config directory; pass --preset-dir"),
    }
}
