//! Info command - add-on metadata and resolved tools

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use exor_export::{
    BlenderFbxWriter, PresetStore, ProcessConverter, ToolConfig, EXOR_MESH_ADDON, EXOR_MESH_FORMAT,
};

#[derive(Args)]
pub struct InfoArgs {
    /// Tool configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: InfoArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ToolConfig::load(path)?,
        None => ToolConfig::load_default()?,
    };
    let info = &EXOR_MESH_ADDON;
    let (hmaj, hmin, hpatch) = info.host_version;

    println!("{} v{}", info.name, info.version_string());
    println!("  Author:      {}", info.author);
    println!("  Description: {}", info.description);
    println!("  Category:    {}", info.category);
    println!("  Menu:        {}", info.menu_entry());
    println!("  Operator:    {} ({})", info.operator_id, info.operator_label);
    println!("  Host:        {}.{}.{} or newer", hmaj, hmin, hpatch);
    println!(
        "  Format:      {} (filter {}, intermediate .{})",
        info.filename_ext, EXOR_MESH_FORMAT.filter_glob, EXOR_MESH_FORMAT.intermediate_ext
    );
    println!();

    match BlenderFbxWriter::locate(config.blender.as_deref()) {
        Ok(writer) => println!("  Blender:     {}", writer.program().display()),
        Err(e) => println!("  Blender:     not found ({})", e),
    }
    match ProcessConverter::locate(config.converter.as_deref()) {
        Ok(converter) => println!("  Converter:   {}", converter.program().display()),
        Err(e) => println!("  Converter:   not found ({})", e),
    }
    match PresetStore::default_location() {
        Some(store) => println!("  Presets:     {}", store.dir().display()),
        None => println!("  Presets:     no config directory"),
    }
    println!("  On converter failure: {:?}", config.on_converter_failure);

    Ok(())
}
