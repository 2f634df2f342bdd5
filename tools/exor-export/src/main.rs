//! exor-export - EXOR mesh export tool
//!
//! Exports a Blender scene to `.mesh`: the host writes an intermediate FBX,
//! the EXOR converter turns it into `.mesh`, and the FBX is removed.
//!
//! # Commands
//!
//! - `exor-export export` - Export a scene (File > Export > EXOR Mesh)
//! - `exor-export preset` - Manage option presets
//! - `exor-export info` - Show add-on metadata and resolved tools
//! - `exor-export matrix` - Print the orientation matrix for an axis pair
//!
//! # Usage
//!
//! ```bash
//! # Export the selection of a scene with deform bones only
//! exor-export export out/rig.mesh --blend scene.blend --use-armature-deform-only true
//!
//! # Save the current settings as a preset and reuse them
//! exor-export preset save characters --axis-forward -Z --axis-up Y
//! exor-export export out/hero.mesh --blend hero.blend --preset characters
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{export, info, matrix, preset};

#[derive(Parser)]
#[command(name = "exor-export")]
#[command(about = "Export scenes to the EXOR .mesh format")]
#[command(version)]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a scene to .mesh
    Export(export::ExportArgs),

    /// Manage option presets
    #[command(subcommand)]
    Preset(preset::PresetCommand),

    /// Show add-on metadata and resolved tools
    Info(info::InfoArgs),

    /// Print the orientation matrix for a forward/up axis pair
    Matrix(matrix::MatrixArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match cli.command {
        Commands::Export(args) => export::execute(args),
        Commands::Preset(command) => preset::execute(command),
        Commands::Info(args) => info::execute(args),
        Commands::Matrix(args) => matrix::execute(args),
    }
}
