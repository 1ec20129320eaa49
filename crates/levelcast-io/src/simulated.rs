//! Deterministic synthetic level source.

use std::f32::consts::TAU;

use levelcast_core::{LevelKind, LevelSource};

use crate::{Error, Result};

/// Hardware channels a [`SimulatedSource`] answers for.
pub const SIMULATED_CHANNELS: usize = 64;

const KINDS: usize = 4;

/// Level source producing slow raised-cosine envelopes.
///
/// Every hardware channel has its own period, and each read of a channel
/// advances that channel by one step, so a run is fully reproducible.
/// Failures can be injected per channel or for `open`.
///
/// # Example
///
/// ```rust
/// use levelcast_core::{LevelKind, LevelSource};
/// use levelcast_io::SimulatedSource;
///
/// let mut source = SimulatedSource::new().with_failing_channel(3);
/// source.open().unwrap();
/// assert!(source.read_level(LevelKind::PostMute, 2).is_ok());
/// assert!(source.read_level(LevelKind::PostMute, 3).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    amplitude: f32,
    steps: Vec<u32>,
    failing: Vec<usize>,
    fail_open: bool,
    open: bool,
}

impl SimulatedSource {
    /// Creates a source with peak amplitude 1.0.
    pub fn new() -> Self {
        Self {
            amplitude: 1.0,
            steps: vec![0; SIMULATED_CHANNELS * KINDS],
            failing: Vec::new(),
            fail_open: false,
            open: false,
        }
    }

    /// Sets the envelope peak.
    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Makes every read of `channel` fail. May be repeated.
    pub fn with_failing_channel(mut self, channel: usize) -> Self {
        self.failing.push(channel);
        self
    }

    /// Makes `open` fail.
    pub fn with_failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Level of `channel` at envelope step `step`.
    pub fn level_at(&self, channel: usize, step: u32) -> f32 {
        let period = 20 + 3 * channel as u32;
        let phase = (step % period) as f32 / period as f32;
        let gain = 1.0 / (1.0 + (channel % 8) as f32 * 0.25);
        self.amplitude * gain * 0.5 * (1.0 - (TAU * phase).cos())
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelSource for SimulatedSource {
    type Error = Error;

    fn open(&mut self) -> Result<()> {
        if self.fail_open {
            return Err(Error::Stream("simulated mixer refused the connection".to_string()));
        }
        self.open = true;
        tracing::info!(channels = SIMULATED_CHANNELS, "simulated level source opened");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }

    fn read_level(&mut self, kind: LevelKind, channel: usize) -> Result<f32> {
        if !self.open {
            return Err(Error::NotOpen);
        }
        if channel >= SIMULATED_CHANNELS {
            return Err(Error::ChannelOutOfRange {
                channel,
                channels: SIMULATED_CHANNELS,
            });
        }
        if self.failing.contains(&channel) {
            return Err(Error::Stream(format!("simulated read failure on channel {channel}")));
        }

        let index = kind.code() as usize * SIMULATED_CHANNELS + channel;
        let step = self.steps[index];
        self.steps[index] = step.wrapping_add(1);
        Ok(self.level_at(channel, step))
    }
}
