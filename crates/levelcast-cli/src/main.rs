//! Levelcast CLI - drives the level engine and publishes parameters over OSC.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "levelcast")]
#[command(author, version, about = "Mixer level to OSC parameter bridge", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample levels and publish them until interrupted
    Run(commands::run::RunArgs),

    /// List output parameter slots and their OSC addresses
    Slots(commands::slots::SlotsArgs),

    /// Show active channels and hardware indices for an edition
    Topology(commands::topology::TopologyArgs),

    /// List audio capture devices
    Devices,

    /// Inspect or create the settings file
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so dry-run output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Slots(args) => commands::slots::run(args),
        Commands::Topology(args) => commands::topology::run(args),
        Commands::Devices => commands::devices::run(),
        Commands::Config(args) => commands::config::run(args),
    }
}
