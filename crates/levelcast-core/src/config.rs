//! Engine configuration snapshot.
//!
//! [`EngineConfig`] is a plain `Copy` value. The host hands the engine a fresh
//! snapshot every tick; the engine copies and sanitizes it once at the top of
//! a sampling cycle and uses that copy for the whole cycle.

use core::fmt;
use core::str::FromStr;

use crate::channel::ChannelRef;
use crate::scheduler::PollRate;

/// Upper bound on the amplification multiplier.
pub const MAX_AMPLIFICATION: f32 = 50.0;

const DEFAULT_AMPLIFICATION: f32 = 1.0;
const DEFAULT_ATTACK: f32 = 0.5;
const DEFAULT_RELEASE: f32 = 0.2;

/// Where in the signal chain a level is read.
///
/// Codes match the mixing engine's level-type ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelKind {
    /// Strip input before fader and mute.
    PreFader,
    /// Strip level after the fader, before mute.
    PostFader,
    /// Strip level after mute.
    PostMute,
    /// Bus output level (post-fader, post-mute).
    OutputBus,
}

impl LevelKind {
    /// Mixing engine ordinal for this kind.
    #[inline]
    pub const fn code(self) -> i32 {
        match self {
            LevelKind::PreFader => 0,
            LevelKind::PostFader => 1,
            LevelKind::PostMute => 2,
            LevelKind::OutputBus => 3,
        }
    }

    /// Settings name.
    pub const fn name(self) -> &'static str {
        match self {
            LevelKind::PreFader => "pre-fader",
            LevelKind::PostFader => "post-fader",
            LevelKind::PostMute => "post-mute",
            LevelKind::OutputBus => "output-bus",
        }
    }

    /// Returns true for kinds that apply to strips.
    #[inline]
    pub const fn is_strip_kind(self) -> bool {
        !matches!(self, LevelKind::OutputBus)
    }
}

impl fmt::Display for LevelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a strip level kind cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLevelKindError;

impl fmt::Display for ParseLevelKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected one of: pre-fader, post-fader, post-mute")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseLevelKindError {}

impl FromStr for LevelKind {
    type Err = ParseLevelKindError;

    /// Parses a strip kind. `output-bus` is rejected: buses always read
    /// [`LevelKind::OutputBus`] and it is never configurable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [LevelKind::PreFader, LevelKind::PostFader, LevelKind::PostMute]
            .into_iter()
            .find(|kind| name_matches(s, kind.name()))
            .ok_or(ParseLevelKindError)
    }
}

/// Case-insensitive match that accepts `_` wherever `name` has `-`.
fn name_matches(s: &str, name: &str) -> bool {
    s.len() == name.len()
        && s
            .bytes()
            .zip(name.bytes())
            .all(|(a, b)| a.eq_ignore_ascii_case(&b) || (a == b'_' && b == b'-'))
}

/// Which channels a sampling cycle publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    /// Only the selected channel (plus the selected slot).
    #[default]
    Solo,
    /// Every active channel of every class.
    Broadcast,
}

/// Engine configuration snapshot.
///
/// # Invariants (after [`sanitized`](Self::sanitized))
///
/// - `attack` and `release` are in [0, 1]
/// - `amplification` is in [0, [`MAX_AMPLIFICATION`]]
/// - a `strip_level` of [`LevelKind::OutputBus`] reads as [`LevelKind::PostMute`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Multiplier applied to the peak of each stereo pair.
    pub amplification: f32,
    /// Enables attack/release smoothing.
    pub smoothing: bool,
    /// Smoothing coefficient for rising levels.
    pub attack: f32,
    /// Smoothing coefficient for falling levels.
    pub release: f32,
    /// Solo or broadcast dispatch.
    pub mode: SelectionMode,
    /// Channel mirrored to the selected slot (and the only one in solo mode).
    pub selected: Option<ChannelRef>,
    /// Level kind read for strips. Buses always read [`LevelKind::OutputBus`].
    pub strip_level: LevelKind,
    /// Sampling frequency.
    pub poll_rate: PollRate,
}

impl EngineConfig {
    /// Returns a copy with every field forced into its valid range.
    ///
    /// Non-finite numbers fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use levelcast_core::{EngineConfig, MAX_AMPLIFICATION};
    ///
    /// let config = EngineConfig {
    ///     attack: 1.5,
    ///     release: -0.1,
    ///     amplification: 400.0,
    ///     ..EngineConfig::default()
    /// }
    /// .sanitized();
    ///
    /// assert_eq!(config.attack, 1.0);
    /// assert_eq!(config.release, 0.0);
    /// assert_eq!(config.amplification, MAX_AMPLIFICATION);
    /// ```
    pub fn sanitized(self) -> Self {
        Self {
            amplification: finite_or(self.amplification, DEFAULT_AMPLIFICATION)
                .clamp(0.0, MAX_AMPLIFICATION),
            attack: finite_or(self.attack, DEFAULT_ATTACK).clamp(0.0, 1.0),
            release: finite_or(self.release, DEFAULT_RELEASE).clamp(0.0, 1.0),
            strip_level: if self.strip_level.is_strip_kind() {
                self.strip_level
            } else {
                LevelKind::PostMute
            },
            ..self
        }
    }

    /// Level kind to read for a channel of the given class.
    #[inline]
    pub const fn level_kind_for(&self, channel: ChannelRef) -> LevelKind {
        if channel.class().is_bus() {
            LevelKind::OutputBus
        } else {
            self.strip_level
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            amplification: DEFAULT_AMPLIFICATION,
            smoothing: true,
            attack: DEFAULT_ATTACK,
            release: DEFAULT_RELEASE,
            mode: SelectionMode::Solo,
            selected: Some(ChannelRef::VirtualStrip(0)),
            strip_level: LevelKind::PostMute,
            poll_rate: PollRate::Hz20,
        }
    }
}

#[inline]
fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}
