//! Playback through rodio

use crate::backend::{AudioBackend, SoundHandle};
use crate::error::{AudioError, Result};
use crate::mixer::{MixBuses, MixClass};
use crate::settings::SoundRef;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

struct RodioPlayer {
    sound: SoundRef,
    class: MixClass,
    sink: Option<Sink>,
    paused: bool,
}

/// Backend on the default output device
pub struct RodioBackend {
    /// Output stream (must be kept alive)
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    audio_path: PathBuf,
    players: HashMap<u64, RodioPlayer>,
    next_handle: u64,
    buses: MixBuses,
}

impl RodioBackend {
    pub fn new() -> Result<Self> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| AudioError::DeviceInit(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            audio_path: PathBuf::new(),
            players: HashMap::new(),
            next_handle: 1,
            buses: MixBuses::new(),
        })
    }

    /// Base directory for relative sound paths
    pub fn with_audio_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.audio_path = path.into();
        self
    }

    fn resolve_path(&self, sound: &SoundRef) -> PathBuf {
        let path = Path::new(sound.path());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.audio_path.join(path)
        }
    }

    fn open(&self, sound: &SoundRef) -> Result<Decoder<BufReader<File>>> {
        let full_path = self.resolve_path(sound);
        let file = File::open(&full_path)
            .map_err(|_| AudioError::FileNotFound(full_path.display().to_string()))?;
        Decoder::new(BufReader::new(file)).map_err(|e| AudioError::LoadError(e.to_string()))
    }

    fn refresh_volumes(&self) {
        for player in self.players.values() {
            if let Some(sink) = &player.sink {
                sink.set_volume(self.buses.effective_volume(player.class));
            }
        }
    }
}

impl AudioBackend for RodioBackend {
    fn set_mix_class_override(&mut self, _mix: &str, class: MixClass, volume: f32, fade_in: f32) {
        self.buses.set_volume(class, volume, fade_in);
        self.refresh_volumes();
    }

    fn push_mix_modifier(&mut self, mix: &str) {
        log::trace!("mix {} active", mix);
    }

    fn create_sound_2d(&mut self, sound: &SoundRef, class: MixClass) -> Result<SoundHandle> {
        if !self.resolve_path(sound).is_file() {
            return Err(AudioError::FileNotFound(sound.path().to_string()));
        }
        let id = self.next_handle;
        self.next_handle += 1;
        self.players.insert(
            id,
            RodioPlayer {
                sound: sound.clone(),
                class,
                sink: None,
                paused: false,
            },
        );
        Ok(SoundHandle(id))
    }

    fn play(&mut self, handle: SoundHandle) -> Result<()> {
        let (sound, class, paused) = match self.players.get(&handle.0) {
            Some(p) => (p.sound.clone(), p.class, p.paused),
            None => return Err(AudioError::InvalidHandle),
        };

        let source = self.open(&sound)?;
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioError::DeviceInit(e.to_string()))?;
        sink.set_volume(self.buses.effective_volume(class));
        sink.append(source);
        if paused {
            sink.pause();
        }

        if let Some(player) = self.players.get_mut(&handle.0) {
            if let Some(old) = player.sink.replace(sink) {
                old.stop();
            }
        }
        Ok(())
    }

    fn stop(&mut self, handle: SoundHandle) {
        if let Some(sink) = self.players.get_mut(&handle.0).and_then(|p| p.sink.take()) {
            sink.stop();
        }
    }

    fn set_paused(&mut self, handle: SoundHandle, paused: bool) {
        if let Some(player) = self.players.get_mut(&handle.0) {
            player.paused = paused;
            if let Some(sink) = &player.sink {
                if paused {
                    sink.pause();
                } else {
                    sink.play();
                }
            }
        }
    }

    fn is_paused(&self, handle: SoundHandle) -> bool {
        self.players.get(&handle.0).map(|p| p.paused).unwrap_or(false)
    }

    fn set_sound(&mut self, handle: SoundHandle, sound: &SoundRef) -> Result<()> {
        let player = self.players.get_mut(&handle.0).ok_or(AudioError::InvalidHandle)?;
        player.sound = sound.clone();
        Ok(())
    }

    fn is_playing(&self, handle: SoundHandle) -> bool {
        self.players
            .get(&handle.0)
            .and_then(|p| p.sink.as_ref())
            .map(|s| !s.empty())
            .unwrap_or(false)
    }

    fn update(&mut self, delta: f32) {
        self.buses.update(delta);
        self.refresh_volumes();
    }
}
