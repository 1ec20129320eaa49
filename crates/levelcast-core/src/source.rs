//! Collaborator interfaces: where levels come from and where values go.
//!
//! The engine never talks to the mixing engine or the control protocol
//! directly. A [`LevelSource`] supplies raw levels, a [`ParameterSink`]
//! receives published values, and a [`Session`] holds the source open for
//! the lifetime of a run.

use core::fmt;

use crate::channel::Slot;
use crate::config::LevelKind;

/// Reads raw per-channel levels from the mixing engine.
///
/// Implementations must not block for longer than a fraction of
/// [`BASE_PERIOD`](crate::BASE_PERIOD); reads happen inside the host tick.
pub trait LevelSource {
    /// Error reported by the source.
    type Error: fmt::Display;

    /// Connects to the mixing engine.
    fn open(&mut self) -> Result<(), Self::Error>;

    /// Disconnects from the mixing engine.
    fn close(&mut self) -> Result<(), Self::Error>;

    /// Reads the level of one hardware channel.
    ///
    /// Values are linear amplitude, nominally 0.0 to 1.0.
    fn read_level(&mut self, kind: LevelKind, channel: usize) -> Result<f32, Self::Error>;
}

impl<S: LevelSource + ?Sized> LevelSource for &mut S {
    type Error = S::Error;

    fn open(&mut self) -> Result<(), Self::Error> {
        (**self).open()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }

    fn read_level(&mut self, kind: LevelKind, channel: usize) -> Result<f32, Self::Error> {
        (**self).read_level(kind, channel)
    }
}

/// Receives published parameter values.
///
/// Publishing is fire-and-forget: sinks absorb their own failures.
pub trait ParameterSink {
    /// Publishes a value to an output slot.
    fn publish(&mut self, slot: Slot, value: f32);

    /// Called once after every sampling cycle.
    fn flush(&mut self) {}
}

impl<P: ParameterSink + ?Sized> ParameterSink for &mut P {
    fn publish(&mut self, slot: Slot, value: f32) {
        (**self).publish(slot, value);
    }

    fn flush(&mut self) {
        (**self).flush();
    }
}

/// An opened [`LevelSource`].
///
/// Opening is the only fallible step of a run. Closing is best-effort:
/// failures are logged (with the `tracing` feature) and swallowed. A session
/// that is dropped without [`close`](Session::close) closes itself.
///
/// # Example
///
/// ```rust
/// use levelcast_core::{LevelKind, LevelSource, Session};
///
/// struct Unreachable;
///
/// impl LevelSource for Unreachable {
///     type Error = &'static str;
///     fn open(&mut self) -> Result<(), Self::Error> { Err("mixer not running") }
///     fn close(&mut self) -> Result<(), Self::Error> { Ok(()) }
///     fn read_level(&mut self, _: LevelKind, _: usize) -> Result<f32, Self::Error> { Ok(0.0) }
/// }
///
/// assert_eq!(Session::open(Unreachable).err(), Some("mixer not running"));
/// ```
#[derive(Debug)]
pub struct Session<S: LevelSource> {
    source: S,
    open: bool,
}

impl<S: LevelSource> Session<S> {
    /// Opens the source. On failure nothing is left running.
    pub fn open(mut source: S) -> Result<Self, S::Error> {
        source.open()?;
        #[cfg(feature = "tracing")]
        tracing::info!("level source session opened");
        Ok(Self { source, open: true })
    }

    /// The opened source.
    #[inline]
    pub fn source(&mut self) -> &mut S {
        &mut self.source
    }

    /// Returns true until the session is closed.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Closes the source, ignoring failures.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        match self.source.close() {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::info!("level source session closed");
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "failed to close level source session");
            }
        }
    }
}

impl<S: LevelSource> Drop for Session<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
