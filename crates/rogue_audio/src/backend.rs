//! Output backend seam

use crate::error::{AudioError, Result};
use crate::mixer::{MixBuses, MixClass};
use crate::settings::SoundRef;
use std::collections::HashMap;

/// Handle to a created sound player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u64);

impl SoundHandle {
    /// Invalid handle constant
    pub const INVALID: SoundHandle = SoundHandle(0);
}

/// What the audio subsystem needs from an output device
pub trait AudioBackend {
    /// Override the volume of `class` within `mix`, fading over `fade_in` seconds
    fn set_mix_class_override(&mut self, mix: &str, class: MixClass, volume: f32, fade_in: f32);

    /// Make `mix` active so its overrides take effect
    fn push_mix_modifier(&mut self, mix: &str);

    /// Create a stopped 2D player for `sound` routed to `class`
    fn create_sound_2d(&mut self, sound: &SoundRef, class: MixClass) -> Result<SoundHandle>;

    /// Play from the beginning
    fn play(&mut self, handle: SoundHandle) -> Result<()>;

    fn stop(&mut self, handle: SoundHandle);

    fn set_paused(&mut self, handle: SoundHandle, paused: bool);

    fn is_paused(&self, handle: SoundHandle) -> bool;

    /// Swap the sound the player uses; takes effect on the next `play`
    fn set_sound(&mut self, handle: SoundHandle, sound: &SoundRef) -> Result<()>;

    /// Active, including while paused
    fn is_playing(&self, handle: SoundHandle) -> bool;

    /// Advance fades
    fn update(&mut self, _delta: f32) {}
}

/// Recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    SetMixClassOverride { mix: String, class: MixClass, volume: f32, fade_in: f32 },
    PushMixModifier(String),
    CreateSound2d(SoundRef),
    Play(SoundRef),
    Stop(SoundHandle),
    SetPaused(SoundHandle, bool),
    SetSound(SoundRef),
}

#[derive(Debug, Clone)]
struct HeadlessSound {
    sound: SoundRef,
    class: MixClass,
    playing: bool,
    paused: bool,
}

/// Backend without an output device. Tracks player state and mix volumes
/// and keeps a log of every call.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    sounds: HashMap<u64, HeadlessSound>,
    next_handle: u64,
    buses: MixBuses,
    active_mixes: Vec<String>,
    calls: Vec<BackendCall>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            ..Default::default()
        }
    }

    pub fn buses(&self) -> &MixBuses {
        &self.buses
    }

    pub fn active_mixes(&self) -> &[String] {
        &self.active_mixes
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn sound_count(&self) -> usize {
        self.sounds.len()
    }

    /// Sound currently assigned to a player
    pub fn current_sound(&self, handle: SoundHandle) -> Option<&SoundRef> {
        self.sounds.get(&handle.0).map(|s| &s.sound)
    }

    /// Volume a player would be heard at
    pub fn output_volume(&self, handle: SoundHandle) -> f32 {
        match self.sounds.get(&handle.0) {
            Some(s) if s.playing && !s.paused => self.buses.effective_volume(s.class),
            _ => 0.0,
        }
    }

    fn sound_mut(&mut self, handle: SoundHandle) -> Result<&mut HeadlessSound> {
        self.sounds.get_mut(&handle.0).ok_or(AudioError::InvalidHandle)
    }
}

impl AudioBackend for HeadlessBackend {
    fn set_mix_class_override(&mut self, mix: &str, class: MixClass, volume: f32, fade_in: f32) {
        self.calls.push(BackendCall::SetMixClassOverride {
            mix: mix.to_string(),
            class,
            volume,
            fade_in,
        });
        self.buses.set_volume(class, volume, fade_in);
    }

    fn push_mix_modifier(&mut self, mix: &str) {
        self.calls.push(BackendCall::PushMixModifier(mix.to_string()));
        if !self.active_mixes.iter().any(|m| m == mix) {
            self.active_mixes.push(mix.to_string());
        }
    }

    fn create_sound_2d(&mut self, sound: &SoundRef, class: MixClass) -> Result<SoundHandle> {
        if !sound.is_valid() {
            return Err(AudioError::FileNotFound(sound.path().to_string()));
        }
        self.calls.push(BackendCall::CreateSound2d(sound.clone()));
        let id = self.next_handle.max(1);
        self.next_handle = id + 1;
        self.sounds.insert(
            id,
            HeadlessSound {
                sound: sound.clone(),
                class,
                playing: false,
                paused: false,
            },
        );
        Ok(SoundHandle(id))
    }

    fn play(&mut self, handle: SoundHandle) -> Result<()> {
        let sound = self.sound_mut(handle)?;
        sound.playing = true;
        let played = sound.sound.clone();
        self.calls.push(BackendCall::Play(played));
        Ok(())
    }

    fn stop(&mut self, handle: SoundHandle) {
        if let Some(sound) = self.sounds.get_mut(&handle.0) {
            sound.playing = false;
            self.calls.push(BackendCall::Stop(handle));
        }
    }

    fn set_paused(&mut self, handle: SoundHandle, paused: bool) {
        if let Some(sound) = self.sounds.get_mut(&handle.0) {
            sound.paused = paused;
            self.calls.push(BackendCall::SetPaused(handle, paused));
        }
    }

    fn is_paused(&self, handle: SoundHandle) -> bool {
        self.sounds.get(&handle.0).map(|s| s.paused).unwrap_or(false)
    }

    fn set_sound(&mut self, handle: SoundHandle, sound: &SoundRef) -> Result<()> {
        let player = self.sound_mut(handle)?;
        player.sound = sound.clone();
        self.calls.push(BackendCall::SetSound(sound.clone()));
        Ok(())
    }

    fn is_playing(&self, handle: SoundHandle) -> bool {
        self.sounds.get(&handle.0).map(|s| s.playing).unwrap_or(false)
    }

    fn update(&mut self, delta: f32) {
        self.buses.update(delta);
    }
}
