//! Sampling cadence on top of a fixed host tick.
//!
//! The host calls the engine every [`BASE_PERIOD`]. [`PollScheduler`] skips
//! `N` of those calls between samples, so sampling happens once every
//! `N + 1` base periods without any extra timers.

use core::fmt;
use core::str::FromStr;
use core::time::Duration;

/// Period of the host callback that drives the engine.
pub const BASE_PERIOD: Duration = Duration::from_millis(50);

/// Target sampling frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PollRate {
    /// Sample once per second.
    Hz1,
    /// Sample twice per second.
    Hz2,
    /// Sample five times per second.
    Hz5,
    /// Sample ten times per second.
    Hz10,
    /// Sample on every base tick.
    #[default]
    Hz20,
}

impl PollRate {
    /// All rates, slowest first.
    pub const ALL: [PollRate; 5] = [
        PollRate::Hz1,
        PollRate::Hz2,
        PollRate::Hz5,
        PollRate::Hz10,
        PollRate::Hz20,
    ];

    /// Frequency in Hz.
    #[inline]
    pub const fn hz(self) -> u32 {
        match self {
            PollRate::Hz1 => 1,
            PollRate::Hz2 => 2,
            PollRate::Hz5 => 5,
            PollRate::Hz10 => 10,
            PollRate::Hz20 => 20,
        }
    }

    /// Base ticks to skip between samples at [`BASE_PERIOD`].
    ///
    /// ```rust
    /// use levelcast_core::PollRate;
    ///
    /// assert_eq!(PollRate::Hz20.skip_ticks(), 0); // every 50 ms
    /// assert_eq!(PollRate::Hz2.skip_ticks(), 9);  // every 500 ms
    /// assert_eq!(PollRate::Hz1.skip_ticks(), 19); // every 1000 ms
    /// ```
    #[inline]
    pub const fn skip_ticks(self) -> u32 {
        let base_hz = 1000 / BASE_PERIOD.as_millis() as u32;
        base_hz / self.hz() - 1
    }

    /// Looks up a rate by frequency.
    pub const fn from_hz(hz: u32) -> Option<PollRate> {
        match hz {
            1 => Some(PollRate::Hz1),
            2 => Some(PollRate::Hz2),
            5 => Some(PollRate::Hz5),
            10 => Some(PollRate::Hz10),
            20 => Some(PollRate::Hz20),
            _ => None,
        }
    }

    /// Time between samples.
    #[inline]
    pub fn interval(self) -> Duration {
        BASE_PERIOD * (self.skip_ticks() + 1)
    }
}

impl fmt::Display for PollRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hz", self.hz())
    }
}

/// Error returned when a poll rate cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePollRateError;

impl fmt::Display for ParsePollRateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected one of: 1hz, 2hz, 5hz, 10hz, 20hz")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParsePollRateError {}

impl FromStr for PollRate {
    type Err = ParsePollRateError;

    /// Accepts `20`, `20hz`, `20Hz`, `20 Hz`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.trim_end_matches(|c: char| c.is_ascii_alphabetic()).trim_end();
        let suffix = s[digits.len()..].trim();
        if !suffix.is_empty() && !suffix.eq_ignore_ascii_case("hz") {
            return Err(ParsePollRateError);
        }
        digits
            .parse()
            .ok()
            .and_then(PollRate::from_hz)
            .ok_or(ParsePollRateError)
    }
}

/// Skip counter deciding which host ticks perform a sampling cycle.
///
/// # Example
///
/// ```rust
/// use levelcast_core::PollScheduler;
///
/// let mut scheduler = PollScheduler::new();
/// let sampled = (0..20).filter(|_| scheduler.advance(9)).count();
/// assert_eq!(sampled, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PollScheduler {
    waited: u32,
}

impl PollScheduler {
    /// Creates a scheduler with an empty skip counter.
    pub const fn new() -> Self {
        Self { waited: 0 }
    }

    /// Registers one host tick. Returns true if this tick should sample.
    ///
    /// With skip count `N`, exactly one of every `N + 1` consecutive calls
    /// returns true. Lowering `N` below the current count makes the next
    /// call sample.
    #[inline]
    pub fn advance(&mut self, skip: u32) -> bool {
        if self.waited < skip {
            self.waited += 1;
            false
        } else {
            self.waited = 0;
            true
        }
    }

    /// Ticks waited since the last sample.
    #[inline]
    pub const fn waited(&self) -> u32 {
        self.waited
    }

    /// Restarts the skip count.
    pub fn reset(&mut self) {
        self.waited = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_table() {
        let skips: [u32; 5] = PollRate::ALL.map(PollRate::skip_ticks);
        assert_eq!(skips, [19, 9, 3, 1, 0]);
    }

    #[test]
    fn test_interval() {
        assert_eq!(PollRate::Hz5.interval(), Duration::from_millis(200));
        assert_eq!(PollRate::Hz20.interval(), BASE_PERIOD);
    }

    #[test]
    fn test_every_tick_at_zero_skip() {
        let mut s = PollScheduler::new();
        assert!((0..10).all(|_| s.advance(0)));
    }

    #[test]
    fn test_one_in_n_plus_one() {
        for rate in PollRate::ALL {
            let skip = rate.skip_ticks();
            let mut s = PollScheduler::new();
            let window = (skip + 1) * 7;
            let sampled = (0..window).filter(|_| s.advance(skip)).count();
            assert_eq!(sampled, 7, "{rate}");
        }
    }

    #[test]
    fn test_one_second_at_two_hz() {
        let ticks = 1000 / BASE_PERIOD.as_millis() as u32;
        let mut s = PollScheduler::new();
        let sampled = (0..ticks).filter(|_| s.advance(PollRate::Hz2.skip_ticks())).count();
        assert_eq!(sampled, 2);
    }

    #[test]
    fn test_lowering_skip_samples_next() {
        let mut s = PollScheduler::new();
        for _ in 0..5 {
            assert!(!s.advance(19));
        }
        assert_eq!(s.waited(), 5);
        assert!(s.advance(1));
        assert_eq!(s.waited(), 0);
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!("20hz".parse(), Ok(PollRate::Hz20));
        assert_eq!("2".parse(), Ok(PollRate::Hz2));
        assert_eq!("10 Hz".parse(), Ok(PollRate::Hz10));
        assert_eq!("3hz".parse::<PollRate>(), Err(ParsePollRateError));
        assert_eq!("5khz".parse::<PollRate>(), Err(ParsePollRateError));
        assert_eq!("fast".parse::<PollRate>(), Err(ParsePollRateError));
    }
}
