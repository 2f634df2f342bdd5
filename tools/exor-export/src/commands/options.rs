//! Export option flags, grouped like the exporter's panels.
//!
//! Every flag is optional: unset flags keep the value from the preset (or
//! the defaults), so a preset can be tweaked from the command line.

use clap::Args;
use exor_export::options::{
    ApplyScaleOptions, ArmatureNodeType, Axis, BatchMode, ExportOptions, IncludeScope,
    ObjectType, PathMode, SmoothType,
};

#[derive(Args, Debug, Default, Clone)]
pub struct OptionArgs {
    // === Main ===
    /// How texture paths are written
    #[arg(long, value_enum, help_heading = "Main")]
    pub path_mode: Option<PathMode>,

    /// Embed textures in the FBX (only with --path-mode copy)
    #[arg(long, value_name = "BOOL", help_heading = "Main")]
    pub embed_textures: Option<bool>,

    /// Export one file per scene/collection
    #[arg(long, value_enum, help_heading = "Main")]
    pub batch_mode: Option<BatchMode>,

    /// Create a directory for each batch file
    #[arg(long, value_name = "BOOL", help_heading = "Main")]
    pub use_batch_own_dir: Option<bool>,

    // === Include ===
    /// Which objects are considered
    #[arg(long, value_enum, help_heading = "Include")]
    pub scope: Option<IncludeScope>,

    /// Object kinds to export (comma separated)
    #[arg(long, value_enum, value_delimiter = ',', num_args = 1.., help_heading = "Include")]
    pub object_types: Option<Vec<ObjectType>>,

    /// Export custom properties
    #[arg(long, value_name = "BOOL", help_heading = "Include")]
    pub use_custom_props: Option<bool>,

    // === Transform ===
    /// Scale all data (0.001 - 1000)
    #[arg(long, help_heading = "Transform")]
    pub global_scale: Option<f32>,

    /// How custom and unit scaling are applied
    #[arg(long, value_enum, help_heading = "Transform")]
    pub apply_scale_options: Option<ApplyScaleOptions>,

    /// Forward axis (X, Y, Z, -X, -Y, -Z)
    #[arg(long, allow_hyphen_values = true, help_heading = "Transform")]
    pub axis_forward: Option<Axis>,

    /// Up axis (X, Y, Z, -X, -Y, -Z)
    #[arg(long, allow_hyphen_values = true, help_heading = "Transform")]
    pub axis_up: Option<Axis>,

    /// Take scene unit settings into account
    #[arg(long, value_name = "BOOL", help_heading = "Transform")]
    pub apply_unit_scale: Option<bool>,

    /// Bake space transform into object data (experimental)
    #[arg(long, value_name = "BOOL", help_heading = "Transform")]
    pub bake_space_transform: Option<bool>,

    // === Geometry ===
    /// Smoothing information to write
    #[arg(long, value_enum, help_heading = "Geometry")]
    pub mesh_smooth_type: Option<SmoothType>,

    /// Export the last subdivision modifier as FBX subdivision
    #[arg(long, value_name = "BOOL", help_heading = "Geometry")]
    pub use_subsurf: Option<bool>,

    /// Apply modifiers (prevents exporting shape keys)
    #[arg(long, value_name = "BOOL", help_heading = "Geometry")]
    pub use_mesh_modifiers: Option<bool>,

    /// Use render settings when applying modifiers
    #[arg(long, value_name = "BOOL", help_heading = "Geometry")]
    pub use_mesh_modifiers_render: Option<bool>,

    /// Export loose edges
    #[arg(long, value_name = "BOOL", help_heading = "Geometry")]
    pub use_mesh_edges: Option<bool>,

    /// Add binormal and tangent vectors
    #[arg(long, value_name = "BOOL", help_heading = "Geometry")]
    pub use_tspace: Option<bool>,

    // === Armature ===
    #[arg(long, allow_hyphen_values = true, help_heading = "Armature")]
    pub primary_bone_axis: Option<Axis>,

    #[arg(long, allow_hyphen_values = true, help_heading = "Armature")]
    pub secondary_bone_axis: Option<Axis>,

    /// FBX node type used for armatures
    #[arg(long, value_enum, help_heading = "Armature")]
    pub armature_nodetype: Option<ArmatureNodeType>,

    /// Only write deforming bones
    #[arg(long, value_name = "BOOL", help_heading = "Armature")]
    pub use_armature_deform_only: Option<bool>,

    /// Append a final bone to the end of each chain
    #[arg(long, value_name = "BOOL", help_heading = "Armature")]
    pub add_leaf_bones: Option<bool>,

    // === Bake Animation ===
    /// Export baked keyframe animation
    #[arg(long, value_name = "BOOL", help_heading = "Bake Animation")]
    pub bake_anim: Option<bool>,

    /// Key all bones
    #[arg(long, value_name = "BOOL", help_heading = "Bake Animation")]
    pub bake_anim_use_all_bones: Option<bool>,

    /// Export each non-muted NLA strip as an animation stack
    #[arg(long, value_name = "BOOL", help_heading = "Bake Animation")]
    pub bake_anim_use_nla_strips: Option<bool>,

    /// Export each action as an animation stack
    #[arg(long, value_name = "BOOL", help_heading = "Bake Animation")]
    pub bake_anim_use_all_actions: Option<bool>,

    /// Always key the start and end of actions
    #[arg(long, value_name = "BOOL", help_heading = "Bake Animation")]
    pub bake_anim_force_startend_keying: Option<bool>,

    /// Sampling rate in frames (0.01 - 100)
    #[arg(long, help_heading = "Bake Animation")]
    pub bake_anim_step: Option<f32>,

    /// Simplification factor (0 disables, up to 100)
    #[arg(long, help_heading = "Bake Animation")]
    pub bake_anim_simplify_factor: Option<f32>,
}

macro_rules! overlay {
    ($args:expr, $options:expr; $($field:ident),* $(,)?) => {
        $(
            if let Some(value) = $args.$field {
                $options.$field = value;
            }
        )*
    };
}

impl OptionArgs {
    /// Overlay the flags that were given onto `options`
    pub fn apply(&self, options: &mut ExportOptions) {
        overlay!(self, options;
            path_mode, embed_textures, batch_mode, use_batch_own_dir,
            scope, use_custom_props,
            global_scale, apply_scale_options, axis_forward, axis_up,
            apply_unit_scale, bake_space_transform,
            mesh_smooth_type, use_subsurf, use_mesh_modifiers, use_mesh_modifiers_render,
            use_mesh_edges, use_tspace,
            primary_bone_axis, secondary_bone_axis, armature_nodetype,
            use_armature_deform_only, add_leaf_bones,
            bake_anim, bake_anim_use_all_bones, bake_anim_use_nla_strips,
            bake_anim_use_all_actions, bake_anim_force_startend_keying,
            bake_anim_step, bake_anim_simplify_factor,
        );
        if let Some(types) = &self.object_types {
            options.object_types = types.iter().copied().collect();
        }
    }
}
