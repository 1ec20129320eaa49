//! Error types for settings operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving, or resolving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read
    #[error("cannot read settings from '{path}': {source}")]
    ReadFile {
        /// Settings file path.
        path: PathBuf,
        /// Cause.
        #[source]
        source: std::io::Error,
    },

    /// Settings could not be written
    #[error("cannot write settings to '{path}': {source}")]
    WriteFile {
        /// Settings file path.
        path: PathBuf,
        /// Cause.
        #[source]
        source: std::io::Error,
    },

    /// The settings directory could not be created
    #[error("cannot create settings directory '{path}': {source}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Cause.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has mistyped keys
    #[error("malformed settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Settings could not be rendered as TOML
    #[error("cannot serialize settings: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Settings refer to a value the engine cannot use
    #[error("validation failed: {0}")]
    Validation(#[from] crate::validation::ValidationError),

    /// Refused to overwrite an existing settings file
    #[error("settings file already exists: '{0}'")]
    AlreadyExists(PathBuf),
}

impl ConfigError {
    /// [`ConfigError::ReadFile`] for `path`.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::WriteFile`] for `path`.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::CreateDir`] for `path`.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
