//! User settings persistence

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings persistence errors
#[derive(Debug, Error)]
pub enum SaveError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// Nothing saved yet
    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for settings persistence
pub type Result<T> = std::result::Result<T, SaveError>;

/// Volume levels chosen by the user, each in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub main_volume: f32,
    pub music_volume: f32,
    pub sfx_volume: f32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            main_volume: 1.0,
            music_volume: 0.5,
            sfx_volume: 1.0,
        }
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        log::warn!("ignoring non-finite volume {}", volume);
        0.0
    }
}

impl UserSettings {
    pub fn set_main_volume(&mut self, volume: f32) {
        self.main_volume = clamp_volume(volume);
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = clamp_volume(volume);
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = clamp_volume(volume);
    }

    /// Clamp every field after loading hand-edited files
    pub fn sanitized(mut self) -> Self {
        self.main_volume = clamp_volume(self.main_volume);
        self.music_volume = clamp_volume(self.music_volume);
        self.sfx_volume = clamp_volume(self.sfx_volume);
        self
    }
}

/// Reads and writes [`UserSettings`] as JSON
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub const FILE_NAME: &'static str = "user_settings.json";

    /// Store inside `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(Self::FILE_NAME),
        }
    }

    /// Store in the per-user config directory for `app`. `None` when the
    /// platform has no such directory.
    pub fn user_scoped(app: &str) -> Option<Self> {
        match dirs::config_dir() {
            Some(dir) => Some(Self::new(dir.join(app))),
            None => {
                log::warn!("no user config directory on this platform, settings for {} will not persist", app);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<UserSettings> {
        if !self.path.exists() {
            return Err(SaveError::NotFound(self.path.clone()));
        }
        let text = std::fs::read_to_string(&self.path)?;
        let settings: UserSettings = serde_json::from_str(&text)
            .map_err(|e| SaveError::Deserialization(e.to_string()))?;
        Ok(settings.sanitized())
    }

    /// Saved settings, or defaults when missing or unreadable
    pub fn load_or_default(&self) -> UserSettings {
        match self.load() {
            Ok(settings) => settings,
            Err(SaveError::NotFound(_)) => {
                log::debug!("no user settings at {}, using defaults", self.path.display());
                UserSettings::default()
            }
            Err(e) => {
                log::warn!("failed to load user settings: {}", e);
                UserSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| SaveError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        log::debug!("saved user settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = UserSettings::default();
        assert_eq!(settings.main_volume, 1.0);
        assert_eq!(settings.music_volume, 0.5);
        assert_eq!(settings.sfx_volume, 1.0);
    }

    #[test]
    fn test_setters_clamp() {
        let mut settings = UserSettings::default();
        settings.set_music_volume(1.7);
        settings.set_sfx_volume(-0.2);
        settings.set_main_volume(f32::NAN);
        assert_eq!(settings.music_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
        assert_eq!(settings.main_volume, 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("rogue"));
        assert!(!store.exists());
        assert!(matches!(store.load(), Err(SaveError::NotFound(_))));

        let mut settings = UserSettings::default();
        settings.set_music_volume(0.25);
        store.save(&settings).unwrap();

        assert!(store.exists());
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path());
        std::fs::write(store.path(), r#"{ "sfx_volume": 3.0 }"#).unwrap();

        let settings = store.load().unwrap();
        assert_eq!(settings.main_volume, 1.0);
        assert_eq!(settings.music_volume, 0.5);
        assert_eq!(settings.sfx_volume, 1.0);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path());
        std::fs::write(store.path(), "not json").unwrap();

        assert!(matches!(store.load(), Err(SaveError::Deserialization(_))));
        assert_eq!(store.load_or_default(), UserSettings::default());
    }

    #[test]
    fn test_user_scoped_path() {
        let expected = dirs::config_dir().map(|dir| dir.join("rogue").join(SettingsStore::FILE_NAME));
        let store = SettingsStore::user_scoped("rogue");
        assert_eq!(store.as_ref().map(|s| s.path().to_path_buf()), expected);
    }
}
