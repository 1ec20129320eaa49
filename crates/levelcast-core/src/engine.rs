//! Sampling cycle orchestration.
//!
//! Every host tick, [`LevelEngine::tick`] asks the scheduler whether to
//! sample. A sampling cycle runs these steps for each channel in the
//! [`Dispatch`] set:
//!
//! ```text
//! read L, R ──► max(L, R) × amplification ──► smooth ──► clamp ──► publish
//! ```
//!
//! Read failures and nonsensical readings count as [`SILENCE_FLOOR`]. The
//! engine is either idle (waiting out the skip count) or running one full
//! cycle; a cycle is never suspended part way.

use crate::channel::{ChannelRef, Slot};
use crate::config::{EngineConfig, LevelKind};
use crate::dispatch::{Dispatch, Route};
use crate::scheduler::PollScheduler;
use crate::smoothing::LevelBank;
use crate::source::{LevelSource, ParameterSink};
use crate::topology::ChannelTopology;

/// Raw value substituted for failed or invalid readings.
pub const SILENCE_FLOOR: f32 = 0.0;

/// Largest value ever published.
pub const OUTPUT_CEILING: f32 = 10.0;

/// Result of one host tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The scheduler skipped this tick.
    Idle,
    /// A sampling cycle ran.
    Sampled {
        /// Number of `publish` calls made, including the selected slot.
        published: usize,
    },
}

impl TickOutcome {
    /// Returns true if a sampling cycle ran.
    #[inline]
    pub const fn is_sampled(&self) -> bool {
        matches!(self, TickOutcome::Sampled { .. })
    }
}

/// Level acquisition and parameter mapping engine.
///
/// Owns the smoothing state and the skip counter. Configuration and topology
/// are passed in on every tick; the engine keeps no reference to them.
#[derive(Debug, Clone, Default)]
pub struct LevelEngine {
    scheduler: PollScheduler,
    levels: LevelBank,
    reported_inactive: Option<ChannelRef>,
    cycles: u64,
}

impl LevelEngine {
    /// Creates an engine with all smoothing state at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles one host tick.
    ///
    /// The configuration is sanitized once and that copy is used for the
    /// whole cycle.
    pub fn tick<S, P>(
        &mut self,
        topology: &ChannelTopology,
        config: &EngineConfig,
        source: &mut S,
        sink: &mut P,
    ) -> TickOutcome
    where
        S: LevelSource + ?Sized,
        P: ParameterSink + ?Sized,
    {
        let config = config.sanitized();
        if !self.scheduler.advance(config.poll_rate.skip_ticks()) {
            return TickOutcome::Idle;
        }
        let published = self.sample(topology, &config, source, sink);
        TickOutcome::Sampled { published }
    }

    /// Runs one sampling cycle immediately, bypassing the scheduler.
    ///
    /// Returns the number of publications. `config` is used as given; call
    /// [`EngineConfig::sanitized`] first when it comes from user input.
    pub fn sample<S, P>(
        &mut self,
        topology: &ChannelTopology,
        config: &EngineConfig,
        source: &mut S,
        sink: &mut P,
    ) -> usize
    where
        S: LevelSource + ?Sized,
        P: ParameterSink + ?Sized,
    {
        let dispatch = Dispatch::resolve(config, topology);
        self.note_dispatch(dispatch);

        let mut published = 0;
        for channel in dispatch.channels(topology) {
            let Some(route) = Route::for_channel(channel, config.selected) else {
                continue;
            };
            let raw = read_pair(
                source,
                config.level_kind_for(channel),
                topology.base_index(channel),
            );
            // Saturate so a huge reading cannot store inf in the smoothing state
            let amplified = (raw * config.amplification).min(f32::MAX);
            let smoothed = self.levels.update(
                channel,
                amplified,
                config.attack,
                config.release,
                config.smoothing,
            );
            let value = smoothed.clamp(0.0, OUTPUT_CEILING);

            sink.publish(route.slot, value);
            if route.mirror_selected {
                sink.publish(Slot::SELECTED, value);
            }
            published += route.publications();
        }

        sink.flush();
        self.cycles = self.cycles.wrapping_add(1);

        #[cfg(feature = "tracing")]
        tracing::trace!(cycle = self.cycles, published, "sampling cycle complete");

        published
    }

    /// Current smoothing state.
    #[inline]
    pub fn levels(&self) -> &LevelBank {
        &self.levels
    }

    /// Sampling cycles run since construction.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Restarts the skip count so the next tick samples.
    pub fn reset_schedule(&mut self) {
        self.scheduler.reset();
    }

    fn note_dispatch(&mut self, dispatch: Dispatch) {
        match dispatch {
            Dispatch::Inactive(channel) => {
                if self.reported_inactive != Some(channel) {
                    self.reported_inactive = Some(channel);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        %channel,
                        "selected channel is not active in this edition, nothing is published"
                    );
                }
            }
            _ => self.reported_inactive = None,
        }
    }
}

/// Peak of a stereo pair, with bad readings replaced by silence.
#[inline]
fn read_pair<S: LevelSource + ?Sized>(source: &mut S, kind: LevelKind, base: usize) -> f32 {
    let left = read_one(source, kind, base);
    let right = read_one(source, kind, base + 1);
    left.max(right)
}

#[inline]
fn read_one<S: LevelSource + ?Sized>(source: &mut S, kind: LevelKind, channel: usize) -> f32 {
    match source.read_level(kind, channel) {
        Ok(level) if level.is_finite() && level >= 0.0 => level,
        Ok(_) => SILENCE_FLOOR,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::trace!(channel, error = %_e, "level read failed");
            SILENCE_FLOOR
        }
    }
}
