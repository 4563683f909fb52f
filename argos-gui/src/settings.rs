//! Persistent view settings.
//!
//! Settings are grouped per profile, then per window (`window-00`,
//! `window-01`, ...). The store is a single JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use argos_core::CtiValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings error types.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("settings already saved")]
    AlreadySaved,

    #[error("no main windows found")]
    NoWindows,
}

/// State of one main window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default)]
    pub files: Vec<PathBuf>,
    #[serde(default)]
    pub selected_rti: Option<String>,
    /// Inspector config values by config path.
    #[serde(default)]
    pub inspector_config: BTreeMap<String, CtiValue>,
}

/// All profiles, keyed by their identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsStore {
    #[serde(default)]
    profiles: BTreeMap<String, BTreeMap<String, WindowSettings>>,
}

impl SettingsStore {
    /// Loads the store. A missing file gives an empty store.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        log::debug!("Reading settings from: {}", path.display());
        match fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// # Errors
    /// Returns an error if the file or its directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        log::debug!("Writing settings to: {}", path.display());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Removes all settings of a profile. Returns true if it existed.
    pub fn remove_profile(&mut self, profile: &str) -> bool {
        self.profiles
            .remove(&string_to_identifier(profile))
            .is_some()
    }

    /// Window groups of a profile in group name order.
    pub fn windows(&self, profile: &str) -> Vec<(&str, &WindowSettings)> {
        self.profiles
            .get(&string_to_identifier(profile))
            .map(|groups| {
                groups
                    .iter()
                    .filter(|(name, _)| name.starts_with("window"))
                    .map(|(name, settings)| (name.as_str(), settings))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set_window(&mut self, profile: &str, group: String, settings: WindowSettings) {
        self.profiles
            .entry(string_to_identifier(profile))
            .or_default()
            .insert(group, settings);
    }
}

/// Group name for the window with the given number.
pub fn window_group_name(window_nr: usize) -> String {
    format!("window-{window_nr:02}")
}

/// Turns a name into a lower case identifier.
///
/// Characters other than ASCII letters, digits and `_` become `_`; a leading
/// digit gets a `_` prefix.
pub fn string_to_identifier(name: &str) -> String {
    let mut identifier: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert(0, '_');
    }
    identifier
}

/// `<config dir>/argos/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("argos").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_string_to_identifier() {
        assert_eq!(string_to_identifier("Panoptes"), "panoptes");
        assert_eq!(string_to_identifier("my profile-2"), "my_profile_2");
        assert_eq!(string_to_identifier("2nd"), "_2nd");
        assert_eq!(string_to_identifier(" x "), "x");
    }

    #[test]
    fn test_window_group_name() {
        assert_eq!(window_group_name(0), "window-00");
        assert_eq!(window_group_name(7), "window-07");
        assert_eq!(window_group_name(123), "window-123");
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::load(&dir.path().join("none.json")).unwrap();
        assert_eq!(store, SettingsStore::default());
    }

    #[test]
    fn test_store_survives_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut window = WindowSettings {
            selected_rti: Some("/data.h5/x".to_string()),
            ..WindowSettings::default()
        };
        window
            .inspector_config
            .insert("pen width".to_string(), CtiValue::Float(2.5));

        let mut store = SettingsStore::default();
        store.set_window("Panoptes", window_group_name(0), window.clone());
        store.save(&path).unwrap();

        let loaded = SettingsStore::load(&path).unwrap();
        // Profile lookup is case insensitive.
        let windows = loaded.windows("PANOPTES");
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0], ("window-00", &window));
    }

    #[test]
    fn test_remove_profile() {
        let mut store = SettingsStore::default();
        store.set_window("a", window_group_name(0), WindowSettings::default());
        assert!(store.remove_profile("A"));
        assert!(!store.remove_profile("A"));
        assert!(store.windows("a").is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SettingsStore::load(&path),
            Err(SettingsError::Json(_))
        ));
    }
}
