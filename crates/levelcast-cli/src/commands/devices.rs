//! Capture device listing command.

use levelcast_io::list_devices;

pub fn run() -> anyhow::Result<()> {
    let devices = list_devices()?;

    if devices.is_empty() {
        println!("No capture devices found.");
        return Ok(());
    }

    println!("Capture Devices");
    println!("===============\n");
    for (idx, device) in devices.iter().enumerate() {
        let default = if device.is_default { " (default)" } else { "" };
        println!(
            "  [{}] {} ({} ch, {} Hz){}",
            idx, device.name, device.channels, device.default_sample_rate, default
        );
    }
    println!();
    println!("Tip: Use device index or partial name with --device:");
    println!("  levelcast run --source capture --device 0");
    println!("  levelcast run --source capture --device \"Voicemeeter\"");

    Ok(())
}
