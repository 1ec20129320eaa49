//! Levelcast Core - level acquisition and parameter mapping engine
//!
//! This crate turns raw per-channel levels read from a multi-bus mixing engine
//! into smoothed, clamped values published to a fixed set of output parameter
//! slots. It is driven by a host that calls [`LevelEngine::tick`] on a fixed
//! base period and never allocates or blocks inside a tick.
//!
//! # Core Abstractions
//!
//! ## Topology
//!
//! - [`Edition`] - Mixer product tier (Standard, Banana, Potato)
//! - [`ChannelTopology`] - Active channel counts and hardware index arithmetic
//! - [`ChannelRef`] - Tagged channel reference (`PhysicalStrip(n)`, `VirtualStrip(n)`, ...)
//! - [`Slot`] - Stable output parameter identity
//!
//! ## Processing
//!
//! - [`smooth`] / [`LevelBank`] - Asymmetric attack/release smoothing with a noise floor
//! - [`PollScheduler`] / [`PollRate`] - Divides the base period into a sampling rate
//! - [`Dispatch`] - Per-cycle iteration set (solo or broadcast) and slot routing
//! - [`LevelEngine`] - Orchestrates a full sample/smooth/dispatch cycle
//!
//! ## Collaborators
//!
//! - [`LevelSource`] - Reads raw levels from the mixing engine
//! - [`ParameterSink`] - Receives published parameter values
//! - [`Session`] - Open/close lifecycle around a [`LevelSource`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature in your
//! `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! levelcast-core = { version = "0.1", default-features = false }
//! ```
//!
//! Enable the `tracing` feature to get diagnostics for fail-soft paths
//! (unknown editions, invalid solo selections, session close failures).
//!
//! # Example
//!
//! ```rust
//! use levelcast_core::{
//!     ChannelRef, ChannelTopology, Edition, EngineConfig, LevelEngine, LevelKind, LevelSource,
//!     ParameterSink, SelectionMode, Slot,
//! };
//!
//! struct Constant;
//!
//! impl LevelSource for Constant {
//!     type Error = &'static str;
//!     fn open(&mut self) -> Result<(), Self::Error> { Ok(()) }
//!     fn close(&mut self) -> Result<(), Self::Error> { Ok(()) }
//!     fn read_level(&mut self, _kind: LevelKind, _channel: usize) -> Result<f32, Self::Error> {
//!         Ok(0.5)
//!     }
//! }
//!
//! struct Last(Option<(Slot, f32)>);
//!
//! impl ParameterSink for Last {
//!     fn publish(&mut self, slot: Slot, value: f32) {
//!         self.0 = Some((slot, value));
//!     }
//! }
//!
//! let topology = ChannelTopology::for_edition(Edition::Banana);
//! let config = EngineConfig {
//!     mode: SelectionMode::Solo,
//!     selected: Some(ChannelRef::PhysicalStrip(0)),
//!     smoothing: false,
//!     ..EngineConfig::default()
//! };
//!
//! let mut engine = LevelEngine::new();
//! let mut sink = Last(None);
//! engine.tick(&topology, &config, &mut Constant, &mut sink);
//! // The selected channel is also mirrored to the dedicated selected slot.
//! assert_eq!(sink.0, Some((Slot::SELECTED, 0.5)));
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations or blocking inside a tick
//! - **Stable identities**: Output slots derive from maximum capacities, never
//!   from the active edition
//! - **Fail-soft**: Per-cycle problems degrade output, only session start fails

#![cfg_attr(not(feature = "std"), no_std)]

pub mod channel;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod scheduler;
pub mod smoothing;
pub mod source;
pub mod topology;

// Re-export main types at crate root
pub use channel::{ChannelClass, ChannelRef, ParseChannelError, Slot, parse_selection};
pub use config::{EngineConfig, LevelKind, MAX_AMPLIFICATION, ParseLevelKindError, SelectionMode};
pub use dispatch::{Dispatch, Route};
pub use engine::{LevelEngine, OUTPUT_CEILING, SILENCE_FLOOR, TickOutcome};
pub use scheduler::{BASE_PERIOD, ParsePollRateError, PollRate, PollScheduler};
pub use smoothing::{LevelBank, SMOOTH_FLOOR, smooth};
pub use source::{LevelSource, ParameterSink, Session};
pub use topology::{ChannelTopology, ClassCounts, Edition, ParseEditionError};
