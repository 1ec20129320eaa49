//! Asymmetric attack/release smoothing for meter levels.
//!
//! A one-pole IIR with direction-dependent coefficients:
//!
//! ```text
//! α     = attack   if raw > prev
//!         release  otherwise
//! y[n]  = y[n-1] + α * (x[n] - y[n-1])
//! ```
//!
//! A coefficient of 1.0 follows the input instantly, 0.0 holds the previous
//! value. A fast attack with a slower release makes the meter react to
//! transients and fall back gently.
//!
//! Results below [`SMOOTH_FLOOR`] snap to exactly zero so a decaying level
//! reaches silence instead of publishing an endless tail of tiny values.

use crate::channel::{ChannelRef, Slot};

/// Smoothed values below this snap to zero.
pub const SMOOTH_FLOOR: f32 = 0.00005;

/// Advances one smoothing step.
///
/// When `enabled` is false the raw value is returned unchanged and `prev`
/// is ignored.
///
/// # Example
///
/// ```rust
/// use levelcast_core::smooth;
///
/// // Rising: attack coefficient applies
/// assert_eq!(smooth(0.0, 1.0, 0.5, 0.2, true), 0.5);
/// // Falling: release coefficient applies
/// assert_eq!(smooth(1.0, 0.0, 0.5, 0.2, true), 0.8);
/// // Disabled: raw passes through
/// assert_eq!(smooth(0.3, 0.9, 0.5, 0.2, false), 0.9);
/// ```
#[inline]
pub fn smooth(prev: f32, raw: f32, attack: f32, release: f32, enabled: bool) -> f32 {
    if !enabled {
        return raw;
    }
    let alpha = if raw > prev { attack } else { release };
    let next = prev + alpha * (raw - prev);
    if next < SMOOTH_FLOOR { 0.0 } else { next }
}

/// Persisted smoothing state, one value per addressable channel.
///
/// Sized to the sum of class maximum capacities at construction and never
/// resized. Values are addressed only through [`ChannelRef`], so an edition
/// change cannot shift which state belongs to which channel.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelBank {
    levels: [f32; Slot::CHANNEL_COUNT],
}

impl LevelBank {
    /// Creates a bank with every level at zero.
    pub const fn new() -> Self {
        Self {
            levels: [0.0; Slot::CHANNEL_COUNT],
        }
    }

    /// Current smoothed level of a channel.
    ///
    /// Returns `None` if the channel index exceeds its class capacity.
    #[inline]
    pub fn get(&self, channel: ChannelRef) -> Option<f32> {
        channel.slot().map(|slot| self.levels[slot.index()])
    }

    /// Smooths `raw` into the channel's state and returns the new value.
    ///
    /// Channels beyond class capacity have no state; the step is computed
    /// from zero and nothing is stored.
    #[inline]
    pub fn update(
        &mut self,
        channel: ChannelRef,
        raw: f32,
        attack: f32,
        release: f32,
        enabled: bool,
    ) -> f32 {
        match channel.slot() {
            Some(slot) => {
                let state = &mut self.levels[slot.index()];
                *state = smooth(*state, raw, attack, release, enabled);
                *state
            }
            None => smooth(0.0, raw, attack, release, enabled),
        }
    }

    /// Number of channels held.
    #[inline]
    pub const fn len(&self) -> usize {
        Slot::CHANNEL_COUNT
    }

    /// Always false; the bank has a fixed, non-zero size.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Default for LevelBank {
    fn default() -> Self {
        Self::new()
    }
}
