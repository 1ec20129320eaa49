//! Settings file format and operations.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use levelcast_core::{ChannelTopology, Edition, EngineConfig, SelectionMode};

use crate::error::ConfigError;
use crate::validation::{self, ValidationError};

/// User settings for a levelcast run.
///
/// Every key is optional in the file; missing keys take their defaults.
///
/// # TOML Format
///
/// ```toml
/// edition = "banana"
/// level_kind = "post-mute"
/// poll_rate = "20hz"
/// solo = true
/// selected = "virt1"
/// amplification = 1.0
/// smoothing = true
/// attack = 0.5
/// release = 0.2
///
/// [osc]
/// target = "127.0.0.1:9000"
/// address_prefix = "/avatar/parameters/VRCOSC/"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Mixer edition: `standard`, `banana`, or `potato`.
    pub edition: String,

    /// Strip level kind: `pre-fader`, `post-fader`, or `post-mute`.
    pub level_kind: String,

    /// Sampling rate, e.g. `20hz`.
    pub poll_rate: String,

    /// Publish only the selected channel.
    pub solo: bool,

    /// Selected channel short name (`phys1`, `virt2`, `a1`, `b3`) or `none`.
    pub selected: String,

    /// Level multiplier.
    pub amplification: f32,

    /// Enable attack/release smoothing.
    pub smoothing: bool,

    /// Rise coefficient in [0, 1].
    pub attack: f32,

    /// Fall coefficient in [0, 1].
    pub release: f32,

    /// Mixer installation directory, for level sources that need it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_location: Option<PathBuf>,

    /// Outbound OSC settings.
    pub osc: OscSettings,
}

/// Where published parameters are sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OscSettings {
    /// UDP destination, `host:port`.
    pub target: String,
    /// Prepended to every slot parameter name.
    pub address_prefix: String,
}

impl Default for OscSettings {
    fn default() -> Self {
        Self {
            target: "127.0.0.1:9000".to_string(),
            address_prefix: "/avatar/parameters/VRCOSC/".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            edition: Edition::Banana.name().to_string(),
            level_kind: engine.strip_level.name().to_string(),
            poll_rate: engine.poll_rate.to_string(),
            solo: engine.mode == SelectionMode::Solo,
            selected: engine
                .selected
                .map_or_else(|| "none".to_string(), |channel| channel.to_string()),
            amplification: engine.amplification,
            smoothing: engine.smoothing,
            attack: engine.attack,
            release: engine.release,
            install_location: None,
            osc: OscSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The configured edition, or `None` if the name is not recognized.
    pub fn edition(&self) -> Option<Edition> {
        self.edition.parse().ok()
    }

    /// Channel topology for the configured edition.
    ///
    /// An unrecognized edition logs a warning and yields
    /// [`ChannelTopology::EMPTY`].
    pub fn topology(&self) -> ChannelTopology {
        match self.edition() {
            Some(edition) => ChannelTopology::for_edition(edition),
            None => {
                tracing::warn!(
                    edition = %self.edition,
                    "unknown mixer edition, no channels are active"
                );
                ChannelTopology::EMPTY
            }
        }
    }

    /// Resolves an engine configuration snapshot.
    ///
    /// Choice fields must parse. Numbers are clamped to their valid ranges.
    ///
    /// # Example
    ///
    /// ```rust
    /// use levelcast_config::Settings;
    /// use levelcast_core::{ChannelRef, SelectionMode};
    ///
    /// let settings = Settings::from_toml(r#"
    ///     solo = false
    ///     selected = "b2"
    ///     attack = 3.0
    /// "#).unwrap();
    ///
    /// let config = settings.engine_config().unwrap();
    /// assert_eq!(config.mode, SelectionMode::Broadcast);
    /// assert_eq!(config.selected, Some(ChannelRef::InputBus(1)));
    /// assert_eq!(config.attack, 1.0);
    /// ```
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let strip_level = validation::parse_level_kind(&self.level_kind);
        let poll_rate = validation::parse_poll_rate(&self.poll_rate);
        let selected = validation::parse_selected(&self.selected);

        let errors: Vec<ValidationError> = [
            strip_level.as_ref().err(),
            poll_rate.as_ref().err(),
            selected.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect();
        validation::into_result(errors)?;

        let (strip_level, poll_rate, selected) = (strip_level?, poll_rate?, selected?);

        Ok(EngineConfig {
            amplification: self.amplification,
            smoothing: self.smoothing,
            attack: self.attack,
            release: self.release,
            mode: if self.solo {
                SelectionMode::Solo
            } else {
                SelectionMode::Broadcast
            },
            selected,
            strip_level,
            poll_rate,
        }
        .sanitized())
    }
}
