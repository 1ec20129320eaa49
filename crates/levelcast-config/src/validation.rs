//! Settings validation.
//!
//! Choice fields (`level_kind`, `poll_rate`, `selected`) must parse, or the
//! engine cannot be configured. Numeric fields are reported when out of
//! range but are clamped rather than rejected when the engine configuration
//! is built. An unknown `edition` is not an error: the topology degrades to
//! zero active channels.
//!
//! # Example
//!
//! ```rust
//! use levelcast_config::{Settings, validate_settings};
//!
//! let mut settings = Settings::default();
//! assert!(validate_settings(&settings).is_empty());
//!
//! settings.attack = 1.5;
//! settings.poll_rate = "3hz".to_string();
//! assert_eq!(validate_settings(&settings).len(), 2);
//! ```

use std::net::SocketAddr;

use levelcast_core::{ChannelRef, LevelKind, MAX_AMPLIFICATION, PollRate, parse_selection};
use thiserror::Error;

use crate::settings::Settings;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A choice field holds an unrecognized value.
    #[error("unknown {field} '{value}', expected one of: {expected}")]
    UnknownChoice {
        /// Settings key.
        field: String,
        /// The rejected value.
        value: String,
        /// Accepted values.
        expected: String,
    },

    /// Numeric value out of range.
    #[error("{field} value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Settings key.
        field: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Malformed OSC target or address.
    #[error("invalid {field} '{value}': {reason}")]
    InvalidAddress {
        /// Settings key.
        field: String,
        /// The rejected value.
        value: String,
        /// Description of the problem.
        reason: String,
    },

    /// Multiple validation errors.
    #[error(
        "multiple validation errors: {}",
        .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
    )]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const LEVEL_KINDS: &str = "pre-fader, post-fader, post-mute";
const POLL_RATES: &str = "1hz, 2hz, 5hz, 10hz, 20hz";
const CHANNELS: &str = "phys1..phys5, virt1..virt3, a1..a5, b1..b3, none";

/// Collects every problem in a settings value.
pub fn validate_settings(settings: &Settings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Err(e) = parse_level_kind(&settings.level_kind) {
        errors.push(e);
    }
    if let Err(e) = parse_poll_rate(&settings.poll_rate) {
        errors.push(e);
    }
    if let Err(e) = parse_selected(&settings.selected) {
        errors.push(e);
    }

    errors.extend(check_range("amplification", settings.amplification, 0.0, MAX_AMPLIFICATION));
    errors.extend(check_range("attack", settings.attack, 0.0, 1.0));
    errors.extend(check_range("release", settings.release, 0.0, 1.0));

    if let Err(e) = settings.osc.target.parse::<SocketAddr>() {
        errors.push(ValidationError::InvalidAddress {
            field: "osc.target".to_string(),
            value: settings.osc.target.clone(),
            reason: e.to_string(),
        });
    }
    if !settings.osc.address_prefix.starts_with('/') {
        errors.push(ValidationError::InvalidAddress {
            field: "osc.address_prefix".to_string(),
            value: settings.osc.address_prefix.clone(),
            reason: "OSC addresses must start with '/'".to_string(),
        });
    }

    errors
}

/// Folds a list of errors into a single result.
pub fn into_result(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

pub(crate) fn parse_level_kind(value: &str) -> ValidationResult<LevelKind> {
    value.parse().map_err(|_| unknown("level_kind", value, LEVEL_KINDS))
}

pub(crate) fn parse_poll_rate(value: &str) -> ValidationResult<PollRate> {
    value.parse().map_err(|_| unknown("poll_rate", value, POLL_RATES))
}

pub(crate) fn parse_selected(value: &str) -> ValidationResult<Option<ChannelRef>> {
    parse_selection(value).map_err(|_| unknown("selected", value, CHANNELS))
}

fn unknown(field: &str, value: &str, expected: &str) -> ValidationError {
    ValidationError::UnknownChoice {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

fn check_range(field: &str, value: f32, min: f32, max: f32) -> Option<ValidationError> {
    (!(min..=max).contains(&value)).then(|| ValidationError::OutOfRange {
        field: field.to_string(),
        value,
        min,
        max,
    })
}
