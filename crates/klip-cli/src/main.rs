//! Klip CLI - inspect curves, crossfades, engine constants and config files.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "klip")]
#[command(author, version, about = "Klip stereo clipper CLI", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print clip curve transfer tables
    Curves(commands::curves::CurvesArgs),

    /// Trace a curve crossfade sample by sample
    Transition(commands::transition::TransitionArgs),

    /// Show derived engine constants for a sample rate
    Info(commands::info::InfoArgs),

    /// Create, show and validate configuration files
    Config(commands::config::ConfigArgs),

    /// List and show presets
    Presets(commands::presets::PresetsArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Curves(args) => commands::curves::run(args),
        Commands::Transition(args) => commands::transition::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
