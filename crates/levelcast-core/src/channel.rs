//! Channel classes, tagged channel references, and output parameter slots.
//!
//! A mixer exposes four classes of channel. Each class has a fixed maximum
//! capacity that does not depend on the selected [`Edition`](crate::Edition);
//! output slots are laid out from those maxima so a channel keeps the same
//! [`Slot`] no matter which edition is active.
//!
//! # Slot Layout
//!
//! ```text
//! slot:  0..=4       5..=7       8..=12      13..=15     16
//!        PhysStrip   VirtStrip   OutputBus   InputBus    Selected
//! ```

use core::fmt;
use core::str::FromStr;

/// The four kinds of mixer channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelClass {
    /// Hardware input strip.
    PhysicalStrip,
    /// Software (virtual) input strip.
    VirtualStrip,
    /// Speaker output bus (A buses).
    OutputBus,
    /// Microphone-routed bus (B buses).
    InputBus,
}

impl ChannelClass {
    /// All classes in broadcast and slot order.
    pub const ALL: [ChannelClass; 4] = [
        ChannelClass::PhysicalStrip,
        ChannelClass::VirtualStrip,
        ChannelClass::OutputBus,
        ChannelClass::InputBus,
    ];

    /// Upper bound on channels of this class across every edition.
    #[inline]
    pub const fn max_capacity(self) -> u8 {
        match self {
            ChannelClass::PhysicalStrip => 5,
            ChannelClass::VirtualStrip => 3,
            ChannelClass::OutputBus => 5,
            ChannelClass::InputBus => 3,
        }
    }

    /// First output slot of this class.
    ///
    /// Sum of the maximum capacities of all preceding classes.
    #[inline]
    pub const fn slot_offset(self) -> u8 {
        match self {
            ChannelClass::PhysicalStrip => 0,
            ChannelClass::VirtualStrip => ChannelClass::PhysicalStrip.max_capacity(),
            ChannelClass::OutputBus => {
                ChannelClass::VirtualStrip.slot_offset() + ChannelClass::VirtualStrip.max_capacity()
            }
            ChannelClass::InputBus => {
                ChannelClass::OutputBus.slot_offset() + ChannelClass::OutputBus.max_capacity()
            }
        }
    }

    /// Number of hardware level channels one channel of this class spans.
    ///
    /// Physical strips are a stereo pair. Virtual strips and buses occupy a
    /// block of eight with the stereo pair at the start.
    #[inline]
    pub const fn stride(self) -> usize {
        match self {
            ChannelClass::PhysicalStrip => 2,
            _ => 8,
        }
    }

    /// Returns true for output and input buses.
    #[inline]
    pub const fn is_bus(self) -> bool {
        matches!(self, ChannelClass::OutputBus | ChannelClass::InputBus)
    }

    /// Builds a [`ChannelRef`] of this class.
    #[inline]
    pub const fn channel(self, index: u8) -> ChannelRef {
        match self {
            ChannelClass::PhysicalStrip => ChannelRef::PhysicalStrip(index),
            ChannelClass::VirtualStrip => ChannelRef::VirtualStrip(index),
            ChannelClass::OutputBus => ChannelRef::OutputBus(index),
            ChannelClass::InputBus => ChannelRef::InputBus(index),
        }
    }
}

/// A single mixer channel, tagged by class. Indices are zero-based.
///
/// # Example
///
/// ```rust
/// use levelcast_core::{ChannelClass, ChannelRef};
///
/// let bus = ChannelRef::OutputBus(2);
/// assert_eq!(bus.class(), ChannelClass::OutputBus);
/// assert_eq!(bus.index(), 2);
/// assert_eq!(bus.slot().unwrap().index(), 10);
///
/// let parsed: ChannelRef = "virt1".parse().unwrap();
/// assert_eq!(parsed, ChannelRef::VirtualStrip(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelRef {
    /// Physical strip `n`.
    PhysicalStrip(u8),
    /// Virtual strip `n`.
    VirtualStrip(u8),
    /// Output (A) bus `n`.
    OutputBus(u8),
    /// Input (B) bus `n`.
    InputBus(u8),
}

impl ChannelRef {
    /// Returns the class of this channel.
    #[inline]
    pub const fn class(self) -> ChannelClass {
        match self {
            ChannelRef::PhysicalStrip(_) => ChannelClass::PhysicalStrip,
            ChannelRef::VirtualStrip(_) => ChannelClass::VirtualStrip,
            ChannelRef::OutputBus(_) => ChannelClass::OutputBus,
            ChannelRef::InputBus(_) => ChannelClass::InputBus,
        }
    }

    /// Returns the zero-based index within the class.
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            ChannelRef::PhysicalStrip(n)
            | ChannelRef::VirtualStrip(n)
            | ChannelRef::OutputBus(n)
            | ChannelRef::InputBus(n) => n,
        }
    }

    /// Returns the output slot for this channel.
    ///
    /// Returns `None` if the index is beyond the class maximum capacity.
    #[inline]
    pub const fn slot(self) -> Option<Slot> {
        let class = self.class();
        let index = self.index();
        if index < class.max_capacity() {
            Some(Slot(class.slot_offset() + index))
        } else {
            None
        }
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = u16::from(self.index()) + 1;
        match self {
            ChannelRef::PhysicalStrip(_) => write!(f, "phys{n}"),
            ChannelRef::VirtualStrip(_) => write!(f, "virt{n}"),
            ChannelRef::OutputBus(_) => write!(f, "a{n}"),
            ChannelRef::InputBus(_) => write!(f, "b{n}"),
        }
    }
}

/// Error returned when a channel short name cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseChannelError;

impl fmt::Display for ParseChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected a channel name like phys1..phys5, virt1..virt3, a1..a5, b1..b3"
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseChannelError {}

impl FromStr for ChannelRef {
    type Err = ParseChannelError;

    /// Parses 1-based short names: `phys2`, `virt1`, `a3`, `b1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or(ParseChannelError)?;
        let (prefix, digits) = s.split_at(split);

        let class = if prefix.eq_ignore_ascii_case("phys") {
            ChannelClass::PhysicalStrip
        } else if prefix.eq_ignore_ascii_case("virt") {
            ChannelClass::VirtualStrip
        } else if prefix.eq_ignore_ascii_case("a") {
            ChannelClass::OutputBus
        } else if prefix.eq_ignore_ascii_case("b") {
            ChannelClass::InputBus
        } else {
            return Err(ParseChannelError);
        };

        let number: u8 = digits.parse().map_err(|_| ParseChannelError)?;
        if number == 0 || number > class.max_capacity() {
            return Err(ParseChannelError);
        }
        Ok(class.channel(number - 1))
    }
}

/// Parses a selection setting: a channel short name, or `none`.
///
/// # Example
///
/// ```rust
/// use levelcast_core::{ChannelRef, parse_selection};
///
/// assert_eq!(parse_selection("none"), Ok(None));
/// assert_eq!(parse_selection("B2"), Ok(Some(ChannelRef::InputBus(1))));
/// assert!(parse_selection("c1").is_err());
/// ```
pub fn parse_selection(s: &str) -> Result<Option<ChannelRef>, ParseChannelError> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}

const SLOT_NAMES: [&str; Slot::COUNT] = [
    "Voicemeeter/Phys/1/Level",
    "Voicemeeter/Phys/2/Level",
    "Voicemeeter/Phys/3/Level",
    "Voicemeeter/Phys/4/Level",
    "Voicemeeter/Phys/5/Level",
    "Voicemeeter/Virt/1/Level",
    "Voicemeeter/Virt/2/Level",
    "Voicemeeter/Virt/3/Level",
    "Voicemeeter/Bus/A1/Level",
    "Voicemeeter/Bus/A2/Level",
    "Voicemeeter/Bus/A3/Level",
    "Voicemeeter/Bus/A4/Level",
    "Voicemeeter/Bus/A5/Level",
    "Voicemeeter/Bus/B1/Level",
    "Voicemeeter/Bus/B2/Level",
    "Voicemeeter/Bus/B3/Level",
    "Voicemeeter/Selected/Level",
];

const SLOT_LABELS: [&str; Slot::COUNT] = [
    "Physical Strip 1 Level",
    "Physical Strip 2 Level",
    "Physical Strip 3 Level",
    "Physical Strip 4 Level",
    "Physical Strip 5 Level",
    "Virtual Strip 1 Level",
    "Virtual Strip 2 Level",
    "Virtual Strip 3 Level",
    "Bus A1 Level",
    "Bus A2 Level",
    "Bus A3 Level",
    "Bus A4 Level",
    "Bus A5 Level",
    "Bus B1 Level",
    "Bus B2 Level",
    "Bus B3 Level",
    "Selected Channel Level",
];

/// Output parameter slot.
///
/// Slot identities are fixed: one per addressable channel (sum of class
/// maximum capacities) followed by [`Slot::SELECTED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u8);

impl Slot {
    /// Number of per-channel slots.
    pub const CHANNEL_COUNT: usize = ChannelClass::InputBus.slot_offset() as usize
        + ChannelClass::InputBus.max_capacity() as usize;

    /// Total number of slots, including the selected slot.
    pub const COUNT: usize = Self::CHANNEL_COUNT + 1;

    /// Dedicated slot mirroring the selected channel.
    pub const SELECTED: Slot = Slot(Self::CHANNEL_COUNT as u8);

    /// Creates a slot from its ordinal, or `None` if out of range.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Slot> {
        if index < Self::COUNT {
            Some(Slot(index as u8))
        } else {
            None
        }
    }

    /// Returns the slot ordinal.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates all slots in order.
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..Self::COUNT as u8).map(Slot)
    }

    /// Returns the channel published to this slot, or `None` for
    /// [`Slot::SELECTED`].
    pub fn channel(self) -> Option<ChannelRef> {
        ChannelClass::ALL.iter().find_map(|&class| {
            let offset = class.slot_offset();
            (self.0 >= offset && self.0 < offset + class.max_capacity())
                .then(|| class.channel(self.0 - offset))
        })
    }

    /// Stable parameter path, e.g. `Voicemeeter/Bus/A1/Level`.
    #[inline]
    pub const fn parameter_name(self) -> &'static str {
        SLOT_NAMES[self.0 as usize]
    }

    /// Human-readable label, e.g. `Bus A1 Level`.
    #[inline]
    pub const fn label(self) -> &'static str {
        SLOT_LABELS[self.0 as usize]
    }

    /// Returns true for [`Slot::SELECTED`].
    #[inline]
    pub const fn is_selected(self) -> bool {
        self.0 as usize == Self::CHANNEL_COUNT
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.parameter_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_offsets_follow_max_capacity() {
        assert_eq!(ChannelClass::PhysicalStrip.slot_offset(), 0);
        assert_eq!(ChannelClass::VirtualStrip.slot_offset(), 5);
        assert_eq!(ChannelClass::OutputBus.slot_offset(), 8);
        assert_eq!(ChannelClass::InputBus.slot_offset(), 13);
        assert_eq!(Slot::CHANNEL_COUNT, 16);
        assert_eq!(Slot::COUNT, 17);
        assert_eq!(Slot::SELECTED.index(), 16);
    }

    #[test]
    fn test_slot_channel_inverse() {
        for slot in Slot::all() {
            match slot.channel() {
                Some(channel) => assert_eq!(channel.slot(), Some(slot)),
                None => assert_eq!(slot, Slot::SELECTED),
            }
        }
    }

    #[test]
    fn test_slot_out_of_capacity() {
        assert_eq!(ChannelRef::PhysicalStrip(5).slot(), None);
        assert_eq!(ChannelRef::VirtualStrip(3).slot(), None);
        assert_eq!(ChannelRef::InputBus(2).slot().map(Slot::index), Some(15));
    }

    #[test]
    fn test_slot_names() {
        assert_eq!(
            ChannelRef::PhysicalStrip(0).slot().unwrap().parameter_name(),
            "Voicemeeter/Phys/1/Level"
        );
        assert_eq!(
            ChannelRef::InputBus(0).slot().unwrap().parameter_name(),
            "Voicemeeter/Bus/B1/Level"
        );
        assert_eq!(Slot::SELECTED.label(), "Selected Channel Level");
        assert!(Slot::SELECTED.is_selected());
        assert_eq!(Slot::from_index(Slot::COUNT), None);
    }

    #[test]
    fn test_parse_channel() {
        assert_eq!("phys1".parse(), Ok(ChannelRef::PhysicalStrip(0)));
        assert_eq!("PHYS5".parse(), Ok(ChannelRef::PhysicalStrip(4)));
        assert_eq!("virt3".parse(), Ok(ChannelRef::VirtualStrip(2)));
        assert_eq!("a5".parse(), Ok(ChannelRef::OutputBus(4)));
        assert_eq!(" b1 ".parse(), Ok(ChannelRef::InputBus(0)));

        assert_eq!("phys0".parse::<ChannelRef>(), Err(ParseChannelError));
        assert_eq!("virt4".parse::<ChannelRef>(), Err(ParseChannelError));
        assert_eq!("b".parse::<ChannelRef>(), Err(ParseChannelError));
        assert_eq!("strip1".parse::<ChannelRef>(), Err(ParseChannelError));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_display_parse_roundtrip() {
        for channel in Slot::all().filter_map(Slot::channel) {
            assert_eq!(channel.to_string().parse(), Ok(channel));
        }
    }

    #[test]
    fn test_class_stride() {
        assert_eq!(ChannelClass::PhysicalStrip.stride(), 2);
        assert_eq!(ChannelClass::VirtualStrip.stride(), 8);
        assert_eq!(ChannelClass::OutputBus.stride(), 8);
        assert_eq!(ChannelClass::InputBus.stride(), 8);
    }
}
