//! Integration tests for levelcast-config.
//!
//! These tests verify settings files end to end: save, load, resolve, and
//! drive the engine from a store.

use levelcast_config::{ConfigError, Settings, SettingsStore, validate_settings};
use levelcast_core::{
    ChannelRef, Edition, LevelEngine, LevelKind, LevelSource, ParameterSink, SelectionMode, Slot,
};
use tempfile::TempDir;

struct Flat(f32);

impl LevelSource for Flat {
    type Error = &'static str;

    fn open(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn read_level(&mut self, _kind: LevelKind, _channel: usize) -> Result<f32, Self::Error> {
        Ok(self.0)
    }
}

#[derive(Default)]
struct Slots(Vec<Slot>);

impl ParameterSink for Slots {
    fn publish(&mut self, slot: Slot, _value: f32) {
        self.0.push(slot);
    }
}

/// Test saving settings and loading them back from disk.
#[test]
fn test_save_and_load() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("nested").join("settings.toml");

    let settings = Settings {
        edition: "potato".to_string(),
        selected: "a4".to_string(),
        amplification: 3.0,
        ..Settings::default()
    };
    settings.save(&path).expect("should save settings");
    assert!(path.exists());

    let loaded = Settings::load(&path).expect("should load settings");
    assert_eq!(loaded, settings);
}

/// Test that a missing file reports the path.
#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("absent.toml");
    let err = Settings::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

/// Test that malformed TOML surfaces as a parse error.
#[test]
fn test_malformed_toml() {
    let err = Settings::from_toml("edition = ").unwrap_err();
    assert!(matches!(err, ConfigError::TomlParse(_)));
}

/// Test that a settings file drives the engine through a store.
#[test]
fn test_store_drives_engine() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("settings.toml");
    std::fs::write(
        &path,
        r#"
        edition = "standard"
        solo = true
        selected = "b1"
        smoothing = false
        "#,
    )
    .unwrap();

    let store = SettingsStore::open(&path).expect("should open store");
    assert_eq!(store.config().mode, SelectionMode::Solo);
    assert_eq!(store.config().selected, Some(ChannelRef::InputBus(0)));

    let mut sink = Slots::default();
    LevelEngine::new().tick(store.topology(), store.config(), &mut Flat(0.5), &mut sink);
    assert_eq!(sink.0, [ChannelRef::InputBus(0).slot().unwrap(), Slot::SELECTED]);
}

/// Test that an unknown edition loads, warns, and publishes nothing.
#[test]
fn test_unknown_edition_is_fail_soft() {
    let settings = Settings::from_toml("edition = \"tomato\"\nsolo = false\n").unwrap();
    assert!(validate_settings(&settings).is_empty());

    let store = SettingsStore::from_settings("unused.toml", settings).unwrap();
    assert_eq!(store.topology().edition(), None);

    let mut sink = Slots::default();
    LevelEngine::new().tick(store.topology(), store.config(), &mut Flat(1.0), &mut sink);
    assert!(sink.0.is_empty());
}

/// Test that every edition name round-trips through settings.
#[test]
fn test_edition_names() {
    for edition in Edition::ALL {
        let settings = Settings {
            edition: edition.to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.edition(), Some(edition));
        assert_eq!(settings.topology().counts(), edition.counts());
    }
}
