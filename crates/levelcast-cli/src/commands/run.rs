//! Real-time level publishing command.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, ValueEnum};
use levelcast_config::{SettingsStore, settings_path};
use levelcast_core::{BASE_PERIOD, LevelEngine, LevelSource, ParameterSink, Session};
use levelcast_io::{CaptureSource, OscSink, SimulatedSource, StdoutSink};

#[derive(Args)]
pub struct RunArgs {
    /// Settings file (defaults to the user config location)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Where raw levels come from
    #[arg(long, value_enum, default_value_t = SourceKind::Simulated)]
    source: SourceKind,

    /// Capture device index or name (with --source capture)
    #[arg(long)]
    device: Option<String>,

    /// OSC destination, overriding the settings file (e.g. 127.0.0.1:9000)
    #[arg(long)]
    target: Option<SocketAddr>,

    /// Print parameters to stdout instead of sending OSC
    #[arg(long)]
    dry_run: bool,

    /// Stop after this many sampling cycles
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    cycles: Option<u64>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// Deterministic synthetic envelopes
    Simulated,
    /// Peaks of an audio input device
    Capture,
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let path = args.settings.clone().unwrap_or_else(settings_path);
    let store = SettingsStore::open(&path)
        .with_context(|| format!("failed to load settings from {}", path.display()))?;

    let mut sink: Box<dyn ParameterSink> = if args.dry_run {
        Box::new(StdoutSink::new())
    } else {
        let target = match args.target {
            Some(target) => target,
            None => store
                .settings()
                .osc
                .target
                .parse()
                .with_context(|| format!("invalid OSC target '{}'", store.settings().osc.target))?,
        };
        Box::new(OscSink::new(target, &store.settings().osc.address_prefix)?)
    };

    match args.source {
        SourceKind::Simulated => drive(SimulatedSource::new(), store, sink.as_mut(), args.cycles),
        SourceKind::Capture => {
            let source = match &args.device {
                Some(device) => CaptureSource::with_device(device.as_str()),
                None => CaptureSource::new(),
            };
            drive(source, store, sink.as_mut(), args.cycles)
        }
    }
}

/// Opens a session and ticks the engine every base period until stopped.
fn drive<S>(
    source: S,
    mut store: SettingsStore,
    sink: &mut dyn ParameterSink,
    cycles: Option<u64>,
) -> anyhow::Result<()>
where
    S: LevelSource<Error = levelcast_io::Error>,
{
    let mut session = Session::open(source).context("failed to open level source")?;

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    tracing::info!(
        edition = ?store.topology().edition(),
        poll_rate = %store.config().poll_rate,
        mode = ?store.config().mode,
        "publishing levels, press Ctrl+C to stop"
    );

    let mut engine = LevelEngine::new();
    let mut deadline = Instant::now();

    while running.load(Ordering::SeqCst) {
        if store.reload_if_changed() {
            engine.reset_schedule();
        }
        engine.tick(store.topology(), store.config(), session.source(), &mut *sink);

        if cycles.is_some_and(|n| engine.cycles() >= n) {
            break;
        }

        deadline += BASE_PERIOD;
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        } else {
            // Overran the period; resynchronize instead of bursting
            deadline = now;
        }
    }

    tracing::info!(cycles = engine.cycles(), "stopping");
    session.close();
    Ok(())
}
