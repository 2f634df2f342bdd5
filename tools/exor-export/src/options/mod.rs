//! Export option surface
//!
//! `ExportOptions` mirrors the operator's property panels (Main, Include,
//! Transform, Geometry, Armature, Bake Animation). Enum values serialize to
//! the host exporter's identifiers so presets and the keyword bundle share
//! one vocabulary.

mod axis;

pub use axis::{axis_conversion, global_matrix, Axis};

use std::collections::BTreeSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// How referenced file paths (textures) are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum PathMode {
    /// Use relative paths where possible
    #[default]
    Auto,
    Absolute,
    Relative,
    /// Match the paths stored in the scene
    Match,
    /// Filename only
    Strip,
    /// Copy files next to the export (allows embedding)
    Copy,
}

/// Which set of files a single export produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchMode {
    /// Active scene to one file
    #[default]
    Off,
    /// Each scene as a file
    Scene,
    /// Each data-block collection as a file
    Collection,
    /// Each collection of each scene as a file
    SceneCollection,
    /// Each collection of the active scene as a file
    ActiveSceneCollection,
}

/// Which objects are considered for export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncludeScope {
    /// Selected and visible objects only
    #[default]
    Selection,
    /// Objects of the active collection and its children
    ActiveCollection,
    /// Whole scene
    Scene,
}

impl IncludeScope {
    /// Host keyword pair `(use_selection, use_active_collection)`
    pub fn as_flags(self) -> (bool, bool) {
        match self {
            IncludeScope::Selection => (true, false),
            IncludeScope::ActiveCollection => (false, true),
            IncludeScope::Scene => (false, false),
        }
    }
}

/// Object kinds the exporter can include
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObjectType {
    Empty,
    Camera,
    Light,
    Armature,
    Mesh,
    /// Curves, metaballs etc. (converted to meshes)
    Other,
}

impl ObjectType {
    pub const ALL: [ObjectType; 6] = [
        ObjectType::Empty,
        ObjectType::Camera,
        ObjectType::Light,
        ObjectType::Armature,
        ObjectType::Mesh,
        ObjectType::Other,
    ];
}

/// How custom and unit scaling end up in the FBX file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplyScaleOptions {
    /// Both scalings applied to objects, FBX scale stays 1.0
    #[default]
    #[value(name = "all-local")]
    FbxScaleNone,
    /// Custom scale to objects, unit scale to FBX scale
    #[value(name = "units")]
    FbxScaleUnits,
    /// Custom scale to FBX scale, unit scale to objects
    #[value(name = "custom")]
    FbxScaleCustom,
    /// Both scalings to FBX scale
    #[value(name = "all")]
    FbxScaleAll,
}

/// Smoothing data written with meshes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum SmoothType {
    /// Normals only
    #[default]
    Off,
    Face,
    Edge,
}

/// FBX node type used for armature objects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArmatureNodeType {
    #[default]
    Null,
    Root,
    LimbNode,
}

/// Valid range for `global_scale`
pub const GLOBAL_SCALE_RANGE: (f32, f32) = (0.001, 1000.0);
/// Valid range for `bake_anim_step`
pub const BAKE_STEP_RANGE: (f32, f32) = (0.01, 100.0);
/// Valid range for `bake_anim_simplify_factor`
pub const SIMPLIFY_RANGE: (f32, f32) = (0.0, 100.0);

/// User-facing export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    // === Main ===
    pub path_mode: PathMode,
    /// Embed textures in the FBX (only with `PathMode::Copy`)
    pub embed_textures: bool,
    pub batch_mode: BatchMode,
    /// Create a directory for each batch file
    pub use_batch_own_dir: bool,

    // === Include ===
    pub scope: IncludeScope,
    pub object_types: BTreeSet<ObjectType>,
    pub use_custom_props: bool,

    // === Transform ===
    pub global_scale: f32,
    pub apply_scale_options: ApplyScaleOptions,
    pub axis_forward: Axis,
    pub axis_up: Axis,
    /// Take the scene's unit settings into account
    pub apply_unit_scale: bool,
    /// Bake the space transform into object data (experimental)
    pub bake_space_transform: bool,

    // === Geometry ===
    pub mesh_smooth_type: SmoothType,
    pub use_subsurf: bool,
    pub use_mesh_modifiers: bool,
    pub use_mesh_modifiers_render: bool,
    /// Export loose edges as two-vertex polygons
    pub use_mesh_edges: bool,
    /// Add binormal and tangent vectors
    pub use_tspace: bool,

    // === Armature ===
    pub primary_bone_axis: Axis,
    pub secondary_bone_axis: Axis,
    pub armature_nodetype: ArmatureNodeType,
    /// Only write deforming bones (and their non-deforming parents)
    pub use_armature_deform_only: bool,
    pub add_leaf_bones: bool,

    // === Bake Animation ===
    pub bake_anim: bool,
    pub bake_anim_use_all_bones: bool,
    pub bake_anim_use_nla_strips: bool,
    pub bake_anim_use_all_actions: bool,
    pub bake_anim_force_startend_keying: bool,
    /// Sampling step in frames
    pub bake_anim_step: f32,
    pub bake_anim_simplify_factor: f32,

    // Not exposed in any panel
    pub use_metadata: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            path_mode: PathMode::Auto,
            embed_textures: false,
            batch_mode: BatchMode::Off,
            use_batch_own_dir: true,

            scope: IncludeScope::Selection,
            object_types: ObjectType::ALL.into_iter().collect(),
            use_custom_props: false,

            global_scale: 0.01,
            apply_scale_options: ApplyScaleOptions::FbxScaleNone,
            axis_forward: Axis::X,
            axis_up: Axis::Y,
            apply_unit_scale: true,
            bake_space_transform: true,

            mesh_smooth_type: SmoothType::Off,
            use_subsurf: false,
            use_mesh_modifiers: true,
            use_mesh_modifiers_render: true,
            use_mesh_edges: false,
            use_tspace: false,

            primary_bone_axis: Axis::Y,
            secondary_bone_axis: Axis::X,
            armature_nodetype: ArmatureNodeType::Null,
            use_armature_deform_only: false,
            add_leaf_bones: true,

            bake_anim: true,
            bake_anim_use_all_bones: true,
            bake_anim_use_nla_strips: true,
            bake_anim_use_all_actions: true,
            bake_anim_force_startend_keying: true,
            bake_anim_step: 1.0,
            bake_anim_simplify_factor: 1.0,

            use_metadata: true,
        }
    }
}

fn check_range(name: &str, value: f32, (min, max): (f32, f32)) -> Result<()> {
    if value.is_nan() || value < min || value > max {
        return Err(ExportError::configuration(format!(
            "{} = {} is out of range ({}..={})",
            name, value, min, max
        )));
    }
    Ok(())
}

impl ExportOptions {
    /// Check per-field ranges.
    ///
    /// Cross-field combinations are never rejected here; see
    /// [`ExportOptions::inert_settings`].
    pub fn validate(&self) -> Result<()> {
        check_range("global_scale", self.global_scale, GLOBAL_SCALE_RANGE)?;
        check_range("bake_anim_step", self.bake_anim_step, BAKE_STEP_RANGE)?;
        check_range(
            "bake_anim_simplify_factor",
            self.bake_anim_simplify_factor,
            SIMPLIFY_RANGE,
        )?;
        Ok(())
    }

    /// Settings that have no effect given the rest of the combination.
    ///
    /// These are the options the host greys out in its panels.
    pub fn inert_settings(&self) -> Vec<String> {
        let mut notes = Vec::new();

        if self.embed_textures && self.path_mode != PathMode::Copy {
            notes.push(format!(
                "embed_textures only applies with path mode COPY (current: {:?})",
                self.path_mode
            ));
        }

        if self.batch_mode != BatchMode::Off && self.scope != IncludeScope::Scene {
            notes.push(format!(
                "include scope {:?} is ignored in batch mode {:?}",
                self.scope, self.batch_mode
            ));
        }

        if self.batch_mode == BatchMode::Off && !self.use_batch_own_dir {
            notes.push("use_batch_own_dir has no effect while batch mode is OFF".to_string());
        }

        if !self.bake_anim && self.bake_settings_changed() {
            notes.push("bake animation settings are ignored while bake_anim is off".to_string());
        }

        if self.primary_bone_axis.index() == self.secondary_bone_axis.index() {
            notes.push(format!(
                "primary bone axis {} and secondary bone axis {} share an axis",
                self.primary_bone_axis, self.secondary_bone_axis
            ));
        }

        notes
    }

    fn bake_settings_changed(&self) -> bool {
        let defaults = ExportOptions::default();
        self.bake_anim_use_all_bones != defaults.bake_anim_use_all_bones
            || self.bake_anim_use_nla_strips != defaults.bake_anim_use_nla_strips
            || self.bake_anim_use_all_actions != defaults.bake_anim_use_all_actions
            || self.bake_anim_force_startend_keying != defaults.bake_anim_force_startend_keying
            || self.bake_anim_step != defaults.bake_anim_step
            || self.bake_anim_simplify_factor != defaults.bake_anim_simplify_factor
    }
}
