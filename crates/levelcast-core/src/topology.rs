//! Mixer editions and channel index arithmetic.
//!
//! An [`Edition`] determines how many channels of each [`ChannelClass`] are
//! active. [`ChannelTopology`] turns that into the hardware level index of a
//! channel's stereo pair:
//!
//! ```text
//! PhysicalStrip(n) → n × 2
//! VirtualStrip(n)  → physical_active × 2 + n × 8
//! OutputBus(n)     → n × 8
//! InputBus(n)      → output_active × 8 + n × 8
//! ```
//!
//! The multipliers are fixed by the mixing engine's level layout. Output slots
//! do not use this arithmetic; see [`Slot`](crate::Slot).

use core::fmt;
use core::str::FromStr;

use crate::channel::{ChannelClass, ChannelRef};

/// Mixer product tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edition {
    /// Entry tier: 2 physical strips, 1 virtual strip, 1 A bus, 1 B bus.
    Standard,
    /// Mid tier: 3 physical strips, 2 virtual strips, 3 A buses, 2 B buses.
    Banana,
    /// Top tier: 5 physical strips, 3 virtual strips, 5 A buses, 3 B buses.
    Potato,
}

impl Edition {
    /// All editions in ordinal order.
    pub const ALL: [Edition; 3] = [Edition::Standard, Edition::Banana, Edition::Potato];

    /// Looks up an edition by ordinal (0 = Standard, 1 = Banana, 2 = Potato).
    #[inline]
    pub const fn from_raw(raw: u8) -> Option<Edition> {
        match raw {
            0 => Some(Edition::Standard),
            1 => Some(Edition::Banana),
            2 => Some(Edition::Potato),
            _ => None,
        }
    }

    /// Active channel counts for this edition.
    #[inline]
    pub const fn counts(self) -> ClassCounts {
        match self {
            Edition::Standard => ClassCounts::new(2, 1, 1, 1),
            Edition::Banana => ClassCounts::new(3, 2, 3, 2),
            Edition::Potato => ClassCounts::new(5, 3, 5, 3),
        }
    }

    /// Lowercase name used in settings files.
    pub const fn name(self) -> &'static str {
        match self {
            Edition::Standard => "standard",
            Edition::Banana => "banana",
            Edition::Potato => "potato",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an edition name cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseEditionError;

impl fmt::Display for ParseEditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected one of: standard, banana, potato")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseEditionError {}

impl FromStr for Edition {
    type Err = ParseEditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Edition::ALL
            .into_iter()
            .find(|e| s.eq_ignore_ascii_case(e.name()))
            .ok_or(ParseEditionError)
    }
}

/// Active channel count for each class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassCounts {
    /// Active physical strips.
    pub physical_strips: u8,
    /// Active virtual strips.
    pub virtual_strips: u8,
    /// Active output (A) buses.
    pub output_buses: u8,
    /// Active input (B) buses.
    pub input_buses: u8,
}

impl ClassCounts {
    /// Creates a new count table.
    #[inline]
    pub const fn new(
        physical_strips: u8,
        virtual_strips: u8,
        output_buses: u8,
        input_buses: u8,
    ) -> Self {
        Self {
            physical_strips,
            virtual_strips,
            output_buses,
            input_buses,
        }
    }

    /// Returns the count for a class.
    #[inline]
    pub const fn get(&self, class: ChannelClass) -> u8 {
        match class {
            ChannelClass::PhysicalStrip => self.physical_strips,
            ChannelClass::VirtualStrip => self.virtual_strips,
            ChannelClass::OutputBus => self.output_buses,
            ChannelClass::InputBus => self.input_buses,
        }
    }

    /// Total active channels across all classes.
    #[inline]
    pub const fn total(&self) -> usize {
        self.physical_strips as usize
            + self.virtual_strips as usize
            + self.output_buses as usize
            + self.input_buses as usize
    }
}

/// Channel layout derived from an [`Edition`].
///
/// # Example
///
/// ```rust
/// use levelcast_core::{ChannelClass, ChannelRef, ChannelTopology, Edition};
///
/// let topology = ChannelTopology::for_edition(Edition::Banana);
/// assert_eq!(topology.active_count(ChannelClass::OutputBus), 3);
///
/// // Virtual strips start after the physical strip pairs
/// assert_eq!(topology.base_index(ChannelRef::VirtualStrip(1)), 3 * 2 + 8);
///
/// // B buses start after the A bus blocks
/// assert_eq!(topology.base_index(ChannelRef::InputBus(0)), 3 * 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelTopology {
    edition: Option<Edition>,
    counts: ClassCounts,
}

impl ChannelTopology {
    /// Topology with zero active channels in every class.
    pub const EMPTY: ChannelTopology = ChannelTopology {
        edition: None,
        counts: ClassCounts::new(0, 0, 0, 0),
    };

    /// Creates the topology for a known edition.
    #[inline]
    pub const fn for_edition(edition: Edition) -> Self {
        Self {
            edition: Some(edition),
            counts: edition.counts(),
        }
    }

    /// Creates the topology for an edition ordinal.
    ///
    /// Unknown ordinals log a warning and yield [`ChannelTopology::EMPTY`].
    pub fn from_raw(raw: u8) -> Self {
        match Edition::from_raw(raw) {
            Some(edition) => Self::for_edition(edition),
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(raw, "unexpected mixer edition, no channels are active");
                Self::EMPTY
            }
        }
    }

    /// The edition this topology was built from, if known.
    #[inline]
    pub const fn edition(&self) -> Option<Edition> {
        self.edition
    }

    /// Active channel counts.
    #[inline]
    pub const fn counts(&self) -> ClassCounts {
        self.counts
    }

    /// Active channel count for a class.
    #[inline]
    pub const fn active_count(&self, class: ChannelClass) -> u8 {
        self.counts.get(class)
    }

    /// Returns true if the channel is active in this topology.
    #[inline]
    pub const fn contains(&self, channel: ChannelRef) -> bool {
        channel.index() < self.active_count(channel.class())
    }

    /// Hardware level index of the left member of the channel's stereo pair.
    ///
    /// The right member is at `base_index + 1`.
    #[inline]
    pub const fn base_index(&self, channel: ChannelRef) -> usize {
        let n = channel.index() as usize;
        let stride = channel.class().stride();
        match channel {
            ChannelRef::PhysicalStrip(_) | ChannelRef::OutputBus(_) => n * stride,
            ChannelRef::VirtualStrip(_) => {
                self.counts.physical_strips as usize * ChannelClass::PhysicalStrip.stride()
                    + n * stride
            }
            ChannelRef::InputBus(_) => {
                self.counts.output_buses as usize * ChannelClass::OutputBus.stride() + n * stride
            }
        }
    }

    /// Iterates every active channel in broadcast order.
    pub fn channels(&self) -> impl Iterator<Item = ChannelRef> + '_ {
        ChannelClass::ALL
            .into_iter()
            .flat_map(move |class| (0..self.active_count(class)).map(move |n| class.channel(n)))
    }
}

impl Default for ChannelTopology {
    fn default() -> Self {
        Self::for_edition(Edition::Banana)
    }
}
