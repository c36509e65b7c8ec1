//! Preset management commands.

use clap::{Args, Subcommand};
use klip_config::{
    ConfigError, FACTORY_PRESET_NAMES, KlipConfig, factory_presets, get_factory_preset,
    is_factory_preset, list_user_presets, preset_name_from_path, user_presets_dir,
};

use super::common::load_config;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets
    List {
        /// Show only factory presets
        #[arg(long, conflicts_with = "user")]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show a preset's settings
    Show {
        /// Preset name or file path
        name: String,
    },

    /// Copy a factory preset to the user presets directory
    Copy {
        /// Factory preset name
        source: String,

        /// New name (default: same as source)
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite an existing user preset
        #[arg(short, long)]
        force: bool,
    },

    /// Delete a user preset
    Delete {
        /// Preset name
        name: String,

        /// Confirm deletion
        #[arg(short, long)]
        force: bool,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Copy {
            source,
            name,
            force,
        } => copy_preset(&source, name.as_deref(), force),
        PresetsCommand::Delete { name, force } => delete_preset(&name, force),
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for (name, preset) in FACTORY_PRESET_NAMES.iter().zip(factory_presets()) {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {name:12} - {desc}");
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create one with: klip presets copy <factory-name> --name <name>");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                match KlipConfig::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {name:12} - {desc}");
                    }
                    Err(err) => {
                        tracing::warn!(path = %path.display(), %err, "unreadable preset");
                        println!("  {name:12} - (error loading)");
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_config(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    if let Some(desc) = &preset.description {
        println!("{desc}");
    }
    println!();
    print!("{}", preset.to_toml()?);

    Ok(())
}

fn copy_preset(source: &str, new_name: Option<&str>, force: bool) -> anyhow::Result<()> {
    let preset = get_factory_preset(source)
        .ok_or_else(|| ConfigError::PresetNotFound(source.to_string()))?;
    let target = new_name.unwrap_or(source);

    let path = user_presets_dir().join(format!("{target}.toml"));
    if path.exists() && !force {
        anyhow::bail!("Preset '{target}' already exists. Use --force to overwrite.");
    }

    let mut copy = preset.clone();
    copy.name = target.to_string();
    if let Some(desc) = &preset.description {
        copy.description = Some(format!("{desc} (copy)"));
    }
    copy.save(&path)?;

    println!("Copied factory preset '{source}' to '{}'", path.display());
    Ok(())
}

fn delete_preset(name: &str, force: bool) -> anyhow::Result<()> {
    if is_factory_preset(name) {
        anyhow::bail!("Cannot delete factory preset '{name}'. Factory presets are built-in.");
    }

    let path = user_presets_dir().join(format!("{name}.toml"));
    if !path.exists() {
        return Err(ConfigError::PresetNotFound(name.to_string()).into());
    }
    if !force {
        anyhow::bail!("Use --force to confirm deletion of preset '{name}'.");
    }

    std::fs::remove_file(&path)?;
    println!("Deleted preset '{name}'.");
    Ok(())
}
