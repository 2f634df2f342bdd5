//! Named option presets stored as TOML files
//!
//! Keys missing from a preset file take their default values, so presets
//! written by older versions keep loading.

use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};
use crate::options::ExportOptions;

const PRESET_EXT: &str = "toml";

/// Directory of `<name>.toml` preset files
#[derive(Debug, Clone)]
pub struct PresetStore {
    dir: PathBuf,
}

fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(ExportError::Preset(format!(
            "invalid preset name '{}' (use letters, digits, '_' and '-')",
            name
        )));
    }
    Ok(())
}

impl PresetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the user config directory
    pub fn default_location() -> Option<Self> {
        crate::config::config_dir().map(|dir| Self::new(dir.join("presets")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{}.{}", name, PRESET_EXT)))
    }

    pub fn save(&self, name: &str, options: &ExportOptions) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        options.validate()?;

        std::fs::create_dir_all(&self.dir).map_err(|e| ExportError::io(&self.dir, e))?;
        let content = toml::to_string_pretty(options)
            .map_err(|e| ExportError::Preset(format!("failed to serialize '{}': {}", name, e)))?;
        std::fs::write(&path, content).map_err(|e| ExportError::io(&path, e))?;

        tracing::debug!(preset = name, path = %path.display(), "Saved preset");
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<ExportOptions> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(ExportError::Preset(format!("preset '{}' not found", name)));
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ExportError::io(&path, e))?;
        Self::parse(&content)
            .map_err(|e| ExportError::Preset(format!("preset '{}': {}", name, e)))
    }

    /// Parse preset contents
    pub fn parse(content: &str) -> std::result::Result<ExportOptions, toml::de::Error> {
        toml::from_str(content)
    }

    /// Preset names, sorted. A missing directory means no presets.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ExportError::io(&self.dir, e)),
        };

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(PRESET_EXT))
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(String::from))
            .filter(|name| validate_name(name).is_ok())
            .collect();
        names.sort();
        Ok(names)
    }

    /// Delete a preset; returns whether it existed
    pub fn remove(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name)?;
        exor_shared::fs::remove_file_if_exists(&path).map_err(|e| ExportError::io(&path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Axis, BatchMode, ObjectType};
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = PresetStore::new(dir.path().join("presets"));

        let options = ExportOptions {
            use_armature_deform_only: true,
            axis_forward: Axis::NegZ,
            batch_mode: BatchMode::Scene,
            object_types: [ObjectType::Armature, ObjectType::Mesh].into_iter().collect(),
            ..Default::default()
        };
        let path = store.save("characters", &options).unwrap();
        assert!(path.ends_with("characters.toml"));

        assert_eq!(store.load("characters").unwrap(), options);
    }

    #[test]
    fn test_partial_preset_uses_defaults() {
        let options = PresetStore::parse(
            r#"
use_armature_deform_only = true
axis_up = "Z"
"#,
        )
        .unwrap();
        assert!(options.use_armature_deform_only);
        assert_eq!(options.axis_up, Axis::Z);
        assert_eq!(options.axis_forward, Axis::X);
        assert!((options.global_scale - 0.01).abs() < f32::EPSILON);
    }

    #[test]
    fn test_list_and_remove() {
        let dir = tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        assert!(store.list().unwrap().is_empty());

        store.save("props", &ExportOptions::default()).unwrap();
        store.save("characters", &ExportOptions::default()).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        assert_eq!(store.list().unwrap(), vec!["characters", "props"]);
        assert!(store.remove("props").unwrap());
        assert!(!store.remove("props").unwrap());
        assert_eq!(store.list().unwrap(), vec!["characters"]);
    }

    #[test]
    fn test_missing_directory_lists_nothing() {
        let dir = tempdir().unwrap();
        let store = PresetStore::new(dir.path().join("nope"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_names_rejected() {
        let dir = tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        for name in ["", "../escape", "a b", "x.toml"] {
            assert!(store.save(name, &ExportOptions::default()).is_err(), "{name}");
        }
    }

    #[test]
    fn test_missing_preset() {
        let dir = tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        let err = store.load("ghost").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_out_of_range_preset_not_saved() {
        let dir = tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        let options = ExportOptions {
            global_scale: 5000.0,
            ..Default::default()
        };
        assert!(store.save("huge", &options).is_err());
        assert!(store.list().unwrap().is_empty());
    }
}
