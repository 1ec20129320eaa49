//! Edition topology inspection command.

use clap::Args;
use levelcast_core::{ChannelClass, ChannelTopology, Edition};

#[derive(Args)]
pub struct TopologyArgs {
    /// Mixer edition (standard, banana, potato); all editions when omitted
    #[arg(long)]
    edition: Option<Edition>,
}

pub fn run(args: TopologyArgs) -> anyhow::Result<()> {
    let editions = match args.edition {
        Some(edition) => vec![edition],
        None => Edition::ALL.to_vec(),
    };

    for (i, edition) in editions.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_topology(&ChannelTopology::for_edition(edition), edition);
    }

    Ok(())
}

fn print_topology(topology: &ChannelTopology, edition: Edition) {
    let counts = topology.counts();
    println!("Edition: {edition}");
    println!(
        "  Strips: {} physical, {} virtual",
        counts.get(ChannelClass::PhysicalStrip),
        counts.get(ChannelClass::VirtualStrip)
    );
    println!(
        "  Buses:  {} A, {} B",
        counts.get(ChannelClass::OutputBus),
        counts.get(ChannelClass::InputBus)
    );
    println!();
    println!("  Channel  Slot  Hardware");
    for channel in topology.channels() {
        let base = topology.base_index(channel);
        let slot = channel.slot().map_or_else(|| "-".to_string(), |s| s.index().to_string());
        println!("  {:<7}  {:>4}  {}, {}", channel.to_string(), slot, base, base + 1);
    }
}
