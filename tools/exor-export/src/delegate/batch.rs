//! Batch output discovery
//!
//! In batch mode the host prefixes each file with the full name of the
//! requested file (`level.fbx` + `Props` + `.fbx`), optionally inside a
//! directory of the same prefixed name. The written files are found by
//! comparing the target directory before and after the export.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::{DirEntry, WalkDir};

use exor_shared::EXOR_MESH_FORMAT;

/// FBX candidates with their modification times
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FbxSnapshot {
    files: BTreeMap<PathBuf, Option<SystemTime>>,
}

fn has_prefix(entry: &DirEntry, prefix: &str) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|n| n.starts_with(prefix))
        .unwrap_or(false)
}

fn is_intermediate(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(EXOR_MESH_FORMAT.intermediate_ext))
        .unwrap_or(false)
}

/// Record the FBX files the host could produce for `fbx_path`.
///
/// With `own_dir`, per-file directories one level below are searched too.
pub fn snapshot_fbx_files(fbx_path: &Path, own_dir: bool) -> FbxSnapshot {
    let dir = match fbx_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let prefix = fbx_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let files = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(if own_dir { 2 } else { 1 })
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| has_prefix(e, prefix))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_intermediate(e.path()))
        .map(|e| {
            let modified = e.metadata().ok().and_then(|m| m.modified().ok());
            (e.into_path(), modified)
        })
        .collect();

    FbxSnapshot { files }
}

/// Files present in `after` that are new or were rewritten since `before`.
pub fn new_fbx_files(before: &FbxSnapshot, after: &FbxSnapshot) -> Vec<PathBuf> {
    after
        .files
        .iter()
        .filter(|(path, modified)| before.files.get(*path) != Some(*modified))
        .map(|(path, _)| path.clone())
        .collect()
}
