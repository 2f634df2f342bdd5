//! Export command - File > Export > EXOR Mesh (.mesh)
//!
//! Builds the descriptor from defaults, an optional preset and the flags,
//! then runs it through the add-on: host FBX export, converter, cleanup.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use exor_export::options::BatchMode;
use exor_export::{
    ConverterFailurePolicy, ExportDescriptor, ExportOptions, ExportReport, MeshExportAddon,
    ToolConfig, EXOR_MESH_FORMAT,
};

use super::options::OptionArgs;

/// Arguments for the export command
#[derive(Args)]
pub struct ExportArgs {
    /// Output .mesh file (prefix for batch exports)
    pub output: String,

    /// Scene file to export (defaults to the host's startup file)
    #[arg(short, long)]
    pub blend: Option<PathBuf>,

    /// Start from a saved preset
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Directory holding presets (defaults to the user config directory)
    #[arg(long)]
    pub preset_dir: Option<PathBuf>,

    /// Tool configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Blender executable (overrides configuration)
    #[arg(long)]
    pub blender: Option<PathBuf>,

    /// Converter executable (overrides configuration)
    #[arg(long)]
    pub converter: Option<PathBuf>,

    /// Fail when the converter exits unsuccessfully
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub options: OptionArgs,
}

fn load_config(args: &ExportArgs) -> Result<ToolConfig> {
    let mut config = match &args.config {
        Some(path) => ToolConfig::load(path)?,
        None => ToolConfig::load_default()?,
    };
    if let Some(blender) = &args.blender {
        config.blender = Some(blender.clone());
    }
    if let Some(converter) = &args.converter {
        config.converter = Some(converter.clone());
    }
    if args.strict {
        config.on_converter_failure = ConverterFailurePolicy::Strict;
    }
    Ok(config)
}

fn collect_options(args: &ExportArgs) -> Result<ExportOptions> {
    let mut options = match &args.preset {
        Some(name) => super::preset_store(args.preset_dir.clone())?
            .load(name)
            .with_context(|| format!("Failed to load preset '{}'", name))?,
        None => ExportOptions::default(),
    };
    args.options.apply(&mut options);
    Ok(options)
}

/// Execute the export command
pub fn execute(args: ExportArgs) -> Result<()> {
    let options = collect_options(&args)?;

    // Batch exports use the path as a prefix, so no extension is forced.
    // An empty path is left for the descriptor to reject.
    let requested = PathBuf::from(&args.output);
    let output = if options.batch_mode == BatchMode::Off && !args.output.trim().is_empty() {
        EXOR_MESH_FORMAT.ensure_extension(&requested)
    } else {
        requested
    };

    let descriptor = ExportDescriptor::new(options, &output)?;

    let mut addon = MeshExportAddon::new(load_config(&args)?);
    if let Some(blend) = &args.blend {
        addon = addon.with_blend_file(blend);
    }
    addon.start().context("Failed to start exporter")?;

    println!("Exporting {}...", output.display());
    let result = addon.run(&descriptor);
    addon.stop();

    print_report(&result?);
    Ok(())
}

fn print_report(report: &ExportReport) {
    if report.files.is_empty() {
        println!("  Nothing exported.");
        return;
    }
    for file in &report.files {
        let status = if file.outcome.is_success() {
            "ok".to_string()
        } else {
            format!("converter exit code {}", file.outcome.describe())
        };
        println!(
            "  {} -> {} ({})",
            file.fbx_path.display(),
            file.expected_output.display(),
            status
        );
    }
    if !report.all_converted() {
        println!(
            "  Warning: {} file(s) failed to convert; intermediate files were removed.",
            report.failed().count()
        );
    }
}
