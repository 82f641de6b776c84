//! Audio subsystem
//!
//! Lives for the whole session. Applies user volume levels to the mix,
//! owns the world music player and reacts to level state and loading
//! screen changes.

use crate::backend::{AudioBackend, SoundHandle};
use crate::error::Result;
use crate::mixer::MixClass;
use crate::settings::{AudioDeveloperSettings, AudioWorldSettings, SoundRef};
use rogue_gamestate::{LevelState, SettingsStore, UserSettings};

pub struct AudioSubsystem<B: AudioBackend> {
    backend: B,
    developer: AudioDeveloperSettings,
    world: Option<AudioWorldSettings>,
    user_settings: Option<UserSettings>,
    settings_store: Option<SettingsStore>,
    world_music_player: Option<SoundHandle>,
    current_music: Option<SoundRef>,
}

impl<B: AudioBackend> AudioSubsystem<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            developer: AudioDeveloperSettings::default(),
            world: None,
            user_settings: None,
            settings_store: None,
            world_music_player: None,
            current_music: None,
        }
    }

    /// Where `save_audio_settings` writes
    pub fn with_settings_store(mut self, store: SettingsStore) -> Self {
        self.settings_store = Some(store);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn developer_settings(&self) -> &AudioDeveloperSettings {
        &self.developer
    }

    pub fn user_settings(&self) -> Option<&UserSettings> {
        self.user_settings.as_ref()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Load the project audio assets. Missing mix or classes are reported
    /// and their volume changes are skipped later.
    pub fn initialize(&mut self, developer: &AudioDeveloperSettings) {
        if developer.default_sound_mix_modifier.is_none() {
            log::error!("default sound mix modifier is not set, check the developer settings");
        }
        for class in MixClass::ALL {
            if developer.sound_class(class).is_none() {
                log::error!("{:?} sound class is not set, check the developer settings", class);
            }
        }
        self.developer = developer.clone();
    }

    /// Bind to a freshly started level and push the user volumes into the mix
    pub fn world_begin_play(&mut self, world: &AudioWorldSettings, user_settings: Option<UserSettings>) {
        self.world = Some(world.clone());
        self.user_settings = user_settings;
        self.update_mixers_from_settings();
    }

    /// The music player persists into the next level
    pub fn world_end_play(&mut self) {
        self.world = None;
    }

    pub fn update(&mut self, delta: f32) {
        self.backend.update(delta);
    }

    fn update_mixers_from_settings(&mut self) {
        let Some(settings) = self.user_settings else {
            return;
        };
        self.apply_volume_change_to_mix(MixClass::Main, settings.main_volume, 0.0);
        self.apply_volume_change_to_mix(MixClass::Music, settings.music_volume, 0.0);
        self.apply_volume_change_to_mix(MixClass::Sfx, settings.sfx_volume, 0.0);
    }

    fn apply_volume_change_to_mix(&mut self, class: MixClass, volume: f32, fade_in: f32) {
        let Some(mix) = self.developer.default_sound_mix_modifier.as_deref() else {
            return;
        };
        if self.developer.sound_class(class).is_none() {
            log::debug!("skipping volume change for unset {:?} class", class);
            return;
        }
        self.backend.set_mix_class_override(mix, class, volume, fade_in);
        self.backend.push_mix_modifier(mix);
    }

    // ------------------------------------------------------------------
    // Volumes
    // ------------------------------------------------------------------

    pub fn set_main_volume(&mut self, volume: f32, fade_in: f32) {
        self.set_volume(MixClass::Main, volume, fade_in);
    }

    pub fn set_music_volume(&mut self, volume: f32, fade_in: f32) {
        self.set_volume(MixClass::Music, volume, fade_in);
    }

    pub fn set_sfx_volume(&mut self, volume: f32, fade_in: f32) {
        self.set_volume(MixClass::Sfx, volume, fade_in);
    }

    fn set_volume(&mut self, class: MixClass, volume: f32, fade_in: f32) {
        let Some(settings) = self.user_settings.as_mut() else {
            log::error!("cannot set {:?} volume without user settings", class);
            return;
        };
        let applied = match class {
            MixClass::Main => {
                settings.set_main_volume(volume);
                settings.main_volume
            }
            MixClass::Music => {
                settings.set_music_volume(volume);
                settings.music_volume
            }
            MixClass::Sfx => {
                settings.set_sfx_volume(volume);
                settings.sfx_volume
            }
        };
        self.apply_volume_change_to_mix(class, applied, fade_in);
    }

    pub fn main_volume(&self) -> f32 {
        self.volume(MixClass::Main)
    }

    pub fn music_volume(&self) -> f32 {
        self.volume(MixClass::Music)
    }

    pub fn sfx_volume(&self) -> f32 {
        self.volume(MixClass::Sfx)
    }

    fn volume(&self, class: MixClass) -> f32 {
        match self.user_settings {
            Some(s) => match class {
                MixClass::Main => s.main_volume,
                MixClass::Music => s.music_volume,
                MixClass::Sfx => s.sfx_volume,
            },
            None => {
                log::error!("no user settings, reporting full {:?} volume", class);
                1.0
            }
        }
    }

    /// Write the current volumes through the settings store
    pub fn save_audio_settings(&self) -> Result<()> {
        let Some(settings) = self.user_settings.as_ref() else {
            log::error!("cannot save audio settings without user settings");
            return Ok(());
        };
        let Some(store) = self.settings_store.as_ref() else {
            log::error!("cannot save audio settings without a settings store");
            return Ok(());
        };
        store.save(settings)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // World music
    // ------------------------------------------------------------------

    pub fn world_music_initialized(&self) -> bool {
        self.world_music_player.is_some()
    }

    pub fn world_music_player(&self) -> Option<SoundHandle> {
        self.world_music_player
    }

    /// Last track handed to the music player
    pub fn current_music(&self) -> Option<&SoundRef> {
        self.current_music.as_ref()
    }

    pub fn is_world_music_paused(&self) -> bool {
        self.world_music_player
            .map(|h| self.backend.is_paused(h))
            .unwrap_or(false)
    }

    pub fn play_sound_as_world_music(&mut self, music: &SoundRef) {
        self.play_world_music(music);
    }

    /// Hidden loading screen starts the level music, a shown one stops it
    pub fn loading_screen_visibility_changed(&mut self, visible: bool) {
        if !visible {
            self.start_default_world_music();
        } else if let Some(player) = self.world_music_player {
            self.backend.stop(player);
        }
    }

    pub fn level_state_changed(&mut self, state: LevelState) {
        match state {
            LevelState::Paused | LevelState::Running => self.toggle_pause_world_music(),
            LevelState::GameOver => {
                let music = self.developer.level_fail_music.clone();
                self.switch_to_stinger(music);
            }
            LevelState::Victory => {
                let music = self.developer.level_complete_music.clone();
                self.switch_to_stinger(music);
            }
            LevelState::Preload | LevelState::Ready => {}
        }
    }

    fn start_default_world_music(&mut self) {
        let Some(world) = self.world.as_ref() else {
            log::error!("no world settings, cannot start world music");
            return;
        };
        let Some(music) = world.world_music.clone() else {
            log::warn!("world music is not set, check the world settings");
            return;
        };
        self.play_world_music(&music);
    }

    fn play_world_music(&mut self, music: &SoundRef) {
        if !music.is_valid() {
            log::warn!("ignoring empty world music reference");
            return;
        }

        let player = match self.world_music_player {
            Some(player) => player,
            None => match self.backend.create_sound_2d(music, MixClass::Music) {
                Ok(player) => {
                    self.world_music_player = Some(player);
                    if let Some(settings) = self.user_settings {
                        self.set_music_volume(settings.music_volume, 0.0);
                    }
                    player
                }
                Err(e) => {
                    log::error!("failed to create world music player: {}", e);
                    return;
                }
            },
        };

        if self.backend.is_paused(player) {
            self.backend.set_paused(player, false);
        }
        if self.backend.is_playing(player) {
            self.backend.stop(player);
        }

        if let Err(e) = self.backend.set_sound(player, music).and_then(|_| self.backend.play(player)) {
            log::error!("failed to play {}: {}", music.path(), e);
            return;
        }
        log::info!("world music: {}", music.path());
        self.current_music = Some(music.clone());
    }

    fn toggle_pause_world_music(&mut self) {
        let Some(player) = self.world_music_player else {
            return;
        };
        let paused = self.backend.is_paused(player);
        self.backend.set_paused(player, !paused);
    }

    /// Stop the world music, then play `music` if there is one
    fn switch_to_stinger(&mut self, music: Option<SoundRef>) {
        let Some(player) = self.world_music_player else {
            return;
        };
        self.backend.stop(player);

        let Some(music) = music.filter(SoundRef::is_valid) else {
            return;
        };
        if let Err(e) = self.backend.set_sound(player, &music).and_then(|_| self.backend.play(player)) {
            log::error!("failed to play {}: {}", music.path(), e);
            return;
        }
        self.current_music = Some(music);
    }
}

impl<B: AudioBackend> std::fmt::Debug for AudioSubsystem<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioSubsystem")
            .field("user_settings", &self.user_settings)
            .field("world_music_player", &self.world_music_player)
            .field("current_music", &self.current_music)
            .finish()
    }
}
