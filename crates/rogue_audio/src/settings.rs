//! Project and world audio settings

use crate::mixer::MixClass;
use serde::{Deserialize, Serialize};

/// Reference to a sound asset by path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundRef(String);

impl SoundRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    /// Empty references point at nothing
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl From<&str> for SoundRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Project-wide audio assets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioDeveloperSettings {
    /// Mix that receives the class volume overrides
    pub default_sound_mix_modifier: Option<String>,
    pub main_sound_class: Option<String>,
    pub music_sound_class: Option<String>,
    pub sfx_sound_class: Option<String>,
    pub level_complete_music: Option<SoundRef>,
    pub level_fail_music: Option<SoundRef>,
}

impl Default for AudioDeveloperSettings {
    fn default() -> Self {
        Self {
            default_sound_mix_modifier: Some("default_mix".to_string()),
            main_sound_class: Some("main".to_string()),
            music_sound_class: Some("music".to_string()),
            sfx_sound_class: Some("sfx".to_string()),
            level_complete_music: None,
            level_fail_music: None,
        }
    }
}

impl AudioDeveloperSettings {
    pub fn sound_class(&self, class: MixClass) -> Option<&str> {
        match class {
            MixClass::Main => self.main_sound_class.as_deref(),
            MixClass::Music => self.music_sound_class.as_deref(),
            MixClass::Sfx => self.sfx_sound_class.as_deref(),
        }
    }

    pub fn with_level_complete_music(mut self, music: impl Into<SoundRef>) -> Self {
        self.level_complete_music = Some(music.into());
        self
    }

    pub fn with_level_fail_music(mut self, music: impl Into<SoundRef>) -> Self {
        self.level_fail_music = Some(music.into());
        self
    }
}

/// Per-level audio
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioWorldSettings {
    /// Played when the loading screen goes away
    pub world_music: Option<SoundRef>,
}

impl AudioWorldSettings {
    pub fn with_music(music: impl Into<SoundRef>) -> Self {
        Self {
            world_music: Some(music.into()),
        }
    }
}
