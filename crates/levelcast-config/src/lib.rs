//! Settings management for levelcast.
//!
//! This crate is the settings store the engine reads from: a TOML settings
//! file, validation of its values, platform paths, and a store that reloads
//! the file when it changes on disk.
//!
//! # Features
//!
//! - **Settings File**: Load and save [`Settings`] as TOML
//! - **Validation**: Report unknown choices and out-of-range values
//! - **Engine Snapshot**: Resolve settings into an [`EngineConfig`](levelcast_core::EngineConfig)
//!   and [`ChannelTopology`](levelcast_core::ChannelTopology)
//! - **Hot Reload**: [`SettingsStore`] picks up edits between ticks
//!
//! # Example
//!
//! ```rust,no_run
//! use levelcast_config::{SettingsStore, paths};
//!
//! let mut store = SettingsStore::open(paths::settings_path()).unwrap();
//! println!("edition: {:?}", store.topology().edition());
//!
//! // Between ticks
//! if store.reload_if_changed() {
//!     println!("now sampling at {}", store.config().poll_rate);
//! }
//! ```

mod error;
mod settings;
mod store;

/// Platform-specific settings location.
pub mod paths;

/// Settings validation.
pub mod validation;

pub use error::ConfigError;
pub use paths::{ensure_user_config_dir, settings_path, user_config_dir};
pub use settings::{OscSettings, Settings};
pub use store::SettingsStore;
pub use validation::{ValidationError, ValidationResult, validate_settings};
