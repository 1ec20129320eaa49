//! Hot-reloading settings store.
//!
//! The host polls [`SettingsStore::reload_if_changed`] between engine ticks.
//! The store compares the file's modification time with the one it last
//! loaded and re-reads the file only when it differs. A reload that fails
//! to read, parse, or resolve keeps the previous snapshot.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use levelcast_core::{ChannelTopology, EngineConfig};

use crate::error::ConfigError;
use crate::settings::Settings;

/// Settings file plus the engine snapshot resolved from it.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
    config: EngineConfig,
    topology: ChannelTopology,
    modified: Option<SystemTime>,
}

impl SettingsStore {
    /// Loads settings from `path`.
    ///
    /// A missing file yields default settings; the file is picked up once it
    /// appears. A file that exists but cannot be used is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let modified = modified_time(&path);
        let settings = if path.exists() {
            Settings::load(&path)?
        } else {
            tracing::info!(path = %path.display(), "settings file not found, using defaults");
            Settings::default()
        };
        Self::with_settings(path, settings, modified)
    }

    /// Creates a store around settings that did not come from `path`.
    ///
    /// The file at `path` replaces them on the first successful reload after
    /// it changes.
    pub fn from_settings(
        path: impl Into<PathBuf>,
        settings: Settings,
    ) -> Result<Self, ConfigError> {
        let path = path.into();
        let modified = modified_time(&path);
        Self::with_settings(path, settings, modified)
    }

    fn with_settings(
        path: PathBuf,
        settings: Settings,
        modified: Option<SystemTime>,
    ) -> Result<Self, ConfigError> {
        let config = settings.engine_config()?;
        let topology = settings.topology();
        Ok(Self {
            path,
            settings,
            config,
            topology,
            modified,
        })
    }

    /// Re-reads the settings file if its modification time changed.
    ///
    /// Returns true if a new snapshot was applied.
    pub fn reload_if_changed(&mut self) -> bool {
        let modified = modified_time(&self.path);
        if modified.is_none() || modified == self.modified {
            return false;
        }
        self.modified = modified;

        let result = Settings::load(&self.path).and_then(|settings| {
            let config = settings.engine_config()?;
            Ok((settings, config))
        });

        match result {
            Ok((settings, config)) => {
                self.topology = settings.topology();
                self.config = config;
                self.settings = settings;
                tracing::info!(path = %self.path.display(), "settings reloaded");
                true
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "settings reload failed, keeping previous settings"
                );
                false
            }
        }
    }

    /// Settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current engine configuration snapshot.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current channel topology.
    pub fn topology(&self) -> &ChannelTopology {
        &self.topology
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
