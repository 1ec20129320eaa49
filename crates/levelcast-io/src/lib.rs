//! Level sources and parameter sinks for levelcast.
//!
//! This crate provides:
//!
//! - **OSC output**: [`OscSink`] sends each published slot as an OSC float message
//! - **Console output**: [`StdoutSink`] prints publications for dry runs
//! - **Audio capture**: [`CaptureSource`] reads peak levels from a capture device
//! - **Simulation**: [`SimulatedSource`] produces deterministic synthetic levels
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use levelcast_core::{ChannelTopology, EngineConfig, LevelEngine, Session};
//! use levelcast_io::{OscSink, SimulatedSource};
//!
//! let mut session = Session::open(SimulatedSource::new())?;
//! let mut sink = OscSink::new("127.0.0.1:9000".parse().unwrap(), "/avatar/parameters/VRCOSC/")?;
//! let mut engine = LevelEngine::new();
//!
//! let topology = ChannelTopology::default();
//! let config = EngineConfig::default();
//! engine.tick(&topology, &config, session.source(), &mut sink);
//! session.close();
//! # Ok::<(), levelcast_io::Error>(())
//! ```

mod capture;
mod console;
mod osc;
mod simulated;

pub use capture::{CaptureDevice, CaptureSource, list_devices};
pub use console::StdoutSink;
pub use osc::{OscSink, osc_address};
pub use simulated::{SIMULATED_CHANNELS, SimulatedSource};

/// Error types for level sources and parameter sinks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// The device's sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// A level was requested for a channel the source does not have.
    #[error("Channel {channel} out of range (source has {channels} channels)")]
    ChannelOutOfRange {
        /// Requested hardware channel.
        channel: usize,
        /// Channels available.
        channels: usize,
    },

    /// A level was read before the source was opened.
    #[error("Level source is not open")]
    NotOpen,

    /// OSC packet encoding error.
    #[error("OSC error: {0}")]
    Osc(#[from] rosc::OscError),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for level sources and sinks.
pub type Result<T> = std::result::Result<T, Error>;
