//! Per-cycle iteration set and slot routing.
//!
//! [`Dispatch`] decides which channels a sampling cycle visits. [`Route`]
//! decides where a channel's value is published.

use crate::channel::{ChannelRef, Slot};
use crate::config::{EngineConfig, SelectionMode};
use crate::topology::ChannelTopology;

/// Channels visited by one sampling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Solo mode with an active selection.
    Solo(ChannelRef),
    /// Every active channel.
    Broadcast,
    /// Solo mode with no selection.
    Unselected,
    /// Solo mode with a selection outside the active topology.
    Inactive(ChannelRef),
}

impl Dispatch {
    /// Resolves the iteration set for a configuration and topology.
    ///
    /// # Example
    ///
    /// ```rust
    /// use levelcast_core::{ChannelRef, ChannelTopology, Dispatch, Edition, EngineConfig};
    ///
    /// let standard = ChannelTopology::for_edition(Edition::Standard);
    /// let config = EngineConfig {
    ///     selected: Some(ChannelRef::OutputBus(3)),
    ///     ..EngineConfig::default()
    /// };
    ///
    /// // Standard has a single A bus
    /// let dispatch = Dispatch::resolve(&config, &standard);
    /// assert_eq!(dispatch, Dispatch::Inactive(ChannelRef::OutputBus(3)));
    /// assert_eq!(dispatch.channels(&standard).count(), 0);
    /// ```
    pub fn resolve(config: &EngineConfig, topology: &ChannelTopology) -> Self {
        match (config.mode, config.selected) {
            (SelectionMode::Broadcast, _) => Dispatch::Broadcast,
            (SelectionMode::Solo, None) => Dispatch::Unselected,
            (SelectionMode::Solo, Some(channel)) if topology.contains(channel) => {
                Dispatch::Solo(channel)
            }
            (SelectionMode::Solo, Some(channel)) => Dispatch::Inactive(channel),
        }
    }

    /// Iterates the channels to sample, in broadcast order.
    pub fn channels<'a>(
        &self,
        topology: &'a ChannelTopology,
    ) -> impl Iterator<Item = ChannelRef> + 'a {
        let dispatch = *self;
        topology.channels().filter(move |&channel| match dispatch {
            Dispatch::Broadcast => true,
            Dispatch::Solo(selected) => channel == selected,
            Dispatch::Unselected | Dispatch::Inactive(_) => false,
        })
    }

    /// Returns true if this cycle publishes nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Dispatch::Unselected | Dispatch::Inactive(_))
    }
}

/// Where one channel's value is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// The channel's own slot.
    pub slot: Slot,
    /// Also publish to [`Slot::SELECTED`].
    pub mirror_selected: bool,
}

impl Route {
    /// Routes a channel. The selected channel is mirrored in both modes.
    ///
    /// Returns `None` for channels beyond class capacity, which have no slot.
    #[inline]
    pub fn for_channel(channel: ChannelRef, selected: Option<ChannelRef>) -> Option<Self> {
        channel.slot().map(|slot| Route {
            slot,
            mirror_selected: selected == Some(channel),
        })
    }

    /// Number of publications this route produces.
    #[inline]
    pub const fn publications(&self) -> usize {
        if self.mirror_selected { 2 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Edition;

    fn solo(selected: Option<ChannelRef>) -> EngineConfig {
        EngineConfig {
            mode: SelectionMode::Solo,
            selected,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_solo_yields_selection_only() {
        let t = ChannelTopology::for_edition(Edition::Potato);
        let d = Dispatch::resolve(&solo(Some(ChannelRef::VirtualStrip(1))), &t);
        assert_eq!(d, Dispatch::Solo(ChannelRef::VirtualStrip(1)));
        let mut channels = d.channels(&t);
        assert_eq!(channels.next(), Some(ChannelRef::VirtualStrip(1)));
        assert_eq!(channels.next(), None);
    }

    #[test]
    fn test_solo_none() {
        let t = ChannelTopology::default();
        let d = Dispatch::resolve(&solo(None), &t);
        assert_eq!(d, Dispatch::Unselected);
        assert!(d.is_empty());
        assert_eq!(d.channels(&t).count(), 0);
    }

    #[test]
    fn test_solo_inactive_after_edition_change() {
        let config = solo(Some(ChannelRef::PhysicalStrip(4)));
        let potato = ChannelTopology::for_edition(Edition::Potato);
        let banana = ChannelTopology::for_edition(Edition::Banana);
        assert!(!Dispatch::resolve(&config, &potato).is_empty());
        assert_eq!(
            Dispatch::resolve(&config, &banana),
            Dispatch::Inactive(ChannelRef::PhysicalStrip(4))
        );
    }

    #[test]
    fn test_broadcast_visits_every_active_channel() {
        let config = EngineConfig {
            mode: SelectionMode::Broadcast,
            selected: None,
            ..EngineConfig::default()
        };
        for edition in Edition::ALL {
            let t = ChannelTopology::for_edition(edition);
            let d = Dispatch::resolve(&config, &t);
            assert_eq!(d.channels(&t).count(), t.counts().total());
        }
    }

    #[test]
    fn test_route_mirrors_selected() {
        let selected = Some(ChannelRef::OutputBus(1));
        let r = Route::for_channel(ChannelRef::OutputBus(1), selected).unwrap();
        assert_eq!(r.slot.index(), 9);
        assert!(r.mirror_selected);
        assert_eq!(r.publications(), 2);

        let r = Route::for_channel(ChannelRef::InputBus(1), selected).unwrap();
        assert!(!r.mirror_selected);
        assert_eq!(r.publications(), 1);

        assert_eq!(Route::for_channel(ChannelRef::OutputBus(5), selected), None);
    }
}
