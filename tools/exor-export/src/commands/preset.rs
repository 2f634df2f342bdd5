//! Preset command - save, list, show and remove option presets

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

use exor_export::ExportOptions;

use super::options::OptionArgs;

#[derive(Args)]
pub struct StoreArgs {
    /// Directory holding presets (defaults to the user config directory)
    #[arg(long)]
    pub preset_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum PresetCommand {
    /// Save the given flags (on top of defaults or another preset)
    Save {
        name: String,

        /// Preset to start from
        #[arg(long)]
        from: Option<String>,

        #[command(flatten)]
        store: StoreArgs,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// List saved presets
    List {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Print a preset as TOML
    Show {
        name: String,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Delete a preset
    Remove {
        name: String,

        #[command(flatten)]
        store: StoreArgs,
    },
}

pub fn execute(command: PresetCommand) -> Result<()> {
    match command {
        PresetCommand::Save {
            name,
            from,
            store,
            options,
        } => {
            let store = super::preset_store(store.preset_dir)?;
            let mut base = match &from {
                Some(from) => store.load(from)?,
                None => ExportOptions::default(),
            };
            options.apply(&mut base);
            for note in base.inert_settings() {
                tracing::warn!("{}", note);
            }
            let path = store.save(&name, &base)?;
            println!("Saved preset '{}' to {}", name, path.display());
        }

        PresetCommand::List { store } => {
            let store = super::preset_store(store.preset_dir)?;
            let names = store.list()?;
            if names.is_empty() {
                println!("No presets in {}", store.dir().display());
            }
            for name in names {
                println!("{}", name);
            }
        }

        PresetCommand::Show { name, store } => {
            let store = super::preset_store(store.preset_dir)?;
            let options = store.load(&name)?;
            let content =
                toml::to_string_pretty(&options).context("Failed to serialize preset")?;
            print!("{}", content);
        }

        PresetCommand::Remove { name, store } => {
            let store = super::preset_store(store.preset_dir)?;
            if store.remove(&name)? {
                println!("Removed preset '{}'", name);
            } else {
                anyhow::bail!("Preset '{}' not found", name);
            }
        }
    }
    Ok(())
}
