//! Settings file commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use levelcast_config::{
    ConfigError, Settings, ensure_user_config_dir, settings_path, validate_settings,
};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the default settings file location
    Path,

    /// Print resolved settings and report problems
    Show {
        /// Settings file (defaults to the user config location)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Write a settings file with default values
    Init {
        /// Settings file (defaults to the user config location)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", settings_path().display());
        }

        ConfigCommand::Show { settings, json } => {
            let path = settings.unwrap_or_else(settings_path);
            let settings = if path.exists() {
                Settings::load(&path)?
            } else {
                eprintln!("{} does not exist, showing defaults", path.display());
                Settings::default()
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                print!("{}", settings.to_toml()?);
            }

            let problems = validate_settings(&settings);
            if settings.edition().is_none() {
                eprintln!(
                    "warning: unknown edition '{}', no channels will be active",
                    settings.edition
                );
            }
            for problem in &problems {
                eprintln!("warning: {problem}");
            }
        }

        ConfigCommand::Init { settings, force } => {
            let path = match settings {
                Some(path) => path,
                None => {
                    ensure_user_config_dir()?;
                    settings_path()
                }
            };
            if path.exists() && !force {
                return Err(ConfigError::AlreadyExists(path).into());
            }
            Settings::default().save(&path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
