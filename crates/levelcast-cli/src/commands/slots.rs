//! Output slot listing command.

use clap::Args;
use levelcast_config::{Settings, settings_path};
use levelcast_core::Slot;
use levelcast_io::osc_address;

#[derive(Args)]
pub struct SlotsArgs {
    /// OSC address prefix (defaults to the one in the settings file)
    #[arg(long)]
    prefix: Option<String>,
}

pub fn run(args: SlotsArgs) -> anyhow::Result<()> {
    let prefix = match args.prefix {
        Some(prefix) => prefix,
        None => settings_prefix(),
    };

    println!("Output Parameters");
    println!("=================\n");
    for slot in Slot::all() {
        let channel = slot
            .channel()
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        println!(
            "  {:>2}  {:<6} {:<24} {}",
            slot.index(),
            channel,
            slot.label(),
            osc_address(&prefix, slot)
        );
    }
    println!("\nTotal: {} parameters", Slot::COUNT);

    Ok(())
}

fn settings_prefix() -> String {
    let path = settings_path();
    if !path.exists() {
        return Settings::default().osc.address_prefix;
    }
    match Settings::load(&path) {
        Ok(settings) => settings.osc.address_prefix,
        Err(e) => {
            tracing::warn!(error = %e, "using the default OSC prefix");
            Settings::default().osc.address_prefix
        }
    }
}
