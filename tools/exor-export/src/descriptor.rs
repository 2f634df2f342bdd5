//! Export job descriptor
//!
//! The descriptor is built once per export, before any I/O, and is never
//! mutated afterwards. It carries the validated options, the intermediate
//! FBX path and the orientation matrix derived from the forward/up pair.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glam::Mat4;
use serde::Serialize;

use exor_shared::EXOR_MESH_FORMAT;

use crate::converter::ConverterFlags;
use crate::error::{ExportError, Result};
use crate::options::{
    global_matrix, ApplyScaleOptions, ArmatureNodeType, Axis, BatchMode, ExportOptions,
    ObjectType, PathMode, SmoothType,
};

/// Immutable bundle of everything the delegate needs
#[derive(Debug, Clone)]
pub struct ExportDescriptor {
    options: ExportOptions,
    requested_path: PathBuf,
    fbx_path: PathBuf,
    global_matrix: Mat4,
}

impl ExportDescriptor {
    /// Validate `options` and build the descriptor for `output_path`.
    ///
    /// Fails with a configuration error when the path is empty or has no
    /// file name, a value is out of range or the forward/up axes are
    /// collinear.
    pub fn new(options: ExportOptions, output_path: impl AsRef<Path>) -> Result<Self> {
        let requested_path = output_path.as_ref();
        let blank = requested_path
            .to_str()
            .map(|s| s.trim().is_empty())
            .unwrap_or(false);
        if blank {
            return Err(ExportError::configuration("filepath not set"));
        }
        if requested_path.file_name().is_none() {
            return Err(ExportError::configuration(format!(
                "filepath {} does not name a file",
                requested_path.display()
            )));
        }

        options.validate()?;
        let global_matrix = global_matrix(options.axis_forward, options.axis_up)?;

        Ok(Self {
            fbx_path: EXOR_MESH_FORMAT.intermediate_path(requested_path),
            requested_path: requested_path.to_path_buf(),
            options,
            global_matrix,
        })
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// The path the user asked for (usually ending in `.mesh`)
    pub fn requested_path(&self) -> &Path {
        &self.requested_path
    }

    /// Where the host writes the intermediate file; always ends in `.fbx`
    pub fn fbx_path(&self) -> &Path {
        &self.fbx_path
    }

    pub fn global_matrix(&self) -> Mat4 {
        self.global_matrix
    }

    pub fn is_batch(&self) -> bool {
        self.options.batch_mode != BatchMode::Off
    }

    pub fn converter_flags(&self) -> ConverterFlags {
        ConverterFlags::from_deform_only(self.options.use_armature_deform_only)
    }

    /// Keyword bundle for the host exporter, with the matrix and the
    /// rewritten path injected.
    pub fn keywords(&self) -> FbxKeywords {
        let o = &self.options;
        let (use_selection, use_active_collection) = o.scope.as_flags();
        FbxKeywords {
            filepath: self.fbx_path.clone(),
            global_matrix: self.global_matrix.transpose().to_cols_array_2d(),
            use_selection,
            use_active_collection,
            global_scale: o.global_scale,
            apply_unit_scale: o.apply_unit_scale,
            apply_scale_options: o.apply_scale_options,
            bake_space_transform: o.bake_space_transform,
            axis_forward: o.axis_forward,
            axis_up: o.axis_up,
            object_types: o.object_types.clone(),
            use_mesh_modifiers: o.use_mesh_modifiers,
            use_mesh_modifiers_render: o.use_mesh_modifiers_render,
            mesh_smooth_type: o.mesh_smooth_type,
            use_subsurf: o.use_subsurf,
            use_mesh_edges: o.use_mesh_edges,
            use_tspace: o.use_tspace,
            use_custom_props: o.use_custom_props,
            add_leaf_bones: o.add_leaf_bones,
            primary_bone_axis: o.primary_bone_axis,
            secondary_bone_axis: o.secondary_bone_axis,
            use_armature_deform_only: o.use_armature_deform_only,
            armature_nodetype: o.armature_nodetype,
            bake_anim: o.bake_anim,
            bake_anim_use_all_bones: o.bake_anim_use_all_bones,
            bake_anim_use_nla_strips: o.bake_anim_use_nla_strips,
            bake_anim_use_all_actions: o.bake_anim_use_all_actions,
            bake_anim_force_startend_keying: o.bake_anim_force_startend_keying,
            bake_anim_step: o.bake_anim_step,
            bake_anim_simplify_factor: o.bake_anim_simplify_factor,
            path_mode: o.path_mode,
            embed_textures: o.embed_textures,
            batch_mode: o.batch_mode,
            use_batch_own_dir: o.use_batch_own_dir,
            use_metadata: o.use_metadata,
        }
    }
}

/// Keyword arguments for the host's FBX `save` function.
///
/// Field names are the host's keyword names; `global_matrix` is row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FbxKeywords {
    pub filepath: PathBuf,
    pub global_matrix: [[f32; 4]; 4],
    pub use_selection: bool,
    pub use_active_collection: bool,
    pub global_scale: f32,
    pub apply_unit_scale: bool,
    pub apply_scale_options: ApplyScaleOptions,
    pub bake_space_transform: bool,
    pub axis_forward: Axis,
    pub axis_up: Axis,
    pub object_types: BTreeSet<ObjectType>,
    pub use_mesh_modifiers: bool,
    pub use_mesh_modifiers_render: bool,
    pub mesh_smooth_type: SmoothType,
    pub use_subsurf: bool,
    pub use_mesh_edges: bool,
    pub use_tspace: bool,
    pub use_custom_props: bool,
    pub add_leaf_bones: bool,
    pub primary_bone_axis: Axis,
    pub secondary_bone_axis: Axis,
    pub use_armature_deform_only: bool,
    pub armature_nodetype: ArmatureNodeType,
    pub bake_anim: bool,
    pub bake_anim_use_all_bones: bool,
    pub bake_anim_use_nla_strips: bool,
    pub bake_anim_use_all_actions: bool,
    pub bake_anim_force_startend_keying: bool,
    pub bake_anim_step: f32,
    pub bake_anim_simplify_factor: f32,
    pub path_mode: PathMode,
    pub embed_textures: bool,
    pub batch_mode: BatchMode,
    pub use_batch_own_dir: bool,
    pub use_metadata: bool,
}

impl FbxKeywords {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
