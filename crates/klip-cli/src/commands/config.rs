//! Configuration file management.

use clap::{Args, Subcommand};
use klip_config::{
    ConfigError, KlipConfig, default_config_path, ensure_user_config_dir, user_config_dir,
    user_presets_dir,
};
use klip_dsp::{ClipCurve, ControlValues, MidSideMode};
use std::path::{Path, PathBuf};

use super::common::{load_config_or_default, parse_curve, parse_mode};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print a configuration as TOML (default: built-in defaults)
    Show {
        /// Preset name or config file path
        name: Option<String>,
    },

    /// Check a configuration file for out-of-range values
    Validate {
        /// Config file path
        path: PathBuf,
    },

    /// Write a new configuration file
    Init {
        /// Destination (default: the user config file)
        path: Option<PathBuf>,

        /// Initial curve
        #[arg(long, value_parser = parse_curve)]
        curve: Option<ClipCurve>,

        /// Initial stereo mode (mid, side, mid_side)
        #[arg(long, value_parser = parse_mode)]
        mode: Option<MidSideMode>,

        /// Initial threshold slider position in (0, 1]
        #[arg(long)]
        threshold: Option<f32>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration directories
    Paths,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show { name } => show(name.as_deref()),
        ConfigCommand::Validate { path } => validate(&path),
        ConfigCommand::Init {
            path,
            curve,
            mode,
            threshold,
            force,
        } => init(path, curve, mode, threshold, force),
        ConfigCommand::Paths => show_paths(),
    }
}

fn show(name: Option<&str>) -> anyhow::Result<()> {
    let config = load_config_or_default(name)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn validate(path: &Path) -> anyhow::Result<()> {
    let config = KlipConfig::load(path)?;
    match config.validate() {
        Ok(()) => {
            println!("{}: ok", path.display());
            Ok(())
        }
        Err(ConfigError::Validation(err)) => {
            tracing::debug!(path = %path.display(), "validation failed");
            anyhow::bail!("{}: {}", path.display(), err)
        }
        Err(err) => Err(err.into()),
    }
}

fn init(
    path: Option<PathBuf>,
    curve: Option<ClipCurve>,
    mode: Option<MidSideMode>,
    threshold: Option<f32>,
    force: bool,
) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => {
            ensure_user_config_dir()?;
            default_config_path()
        }
    };

    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists. Use --force to overwrite.",
            path.display()
        );
    }

    let defaults = ControlValues::default();
    let values = ControlValues {
        threshold: threshold.unwrap_or(defaults.threshold),
        curve: curve.unwrap_or(defaults.curve),
        mode: mode.or(defaults.mode),
    };

    let config = KlipConfig::default().with_controls(&values);
    config.validate()?;
    config.save(&path)?;

    println!("Wrote {}", path.display());
    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("Config dir:     {}", user_config_dir().display());
    println!("Config file:    {}", default_config_path().display());
    println!("User presets:   {}", user_presets_dir().display());
    Ok(())
}
