//! Rogue Audio - Audio Mixing Layer
//!
//! Volume control and world music on top of a pluggable output backend.
//!
//! # Features
//!
//! - Main / Music / SFX mix classes with timed fades
//! - User volume levels applied as mix overrides and persisted on request
//! - A single world music player that survives level changes
//! - Pause, game over and victory music driven by the level state
//! - Headless backend for tests and simulation, `rodio` backend behind
//!   the `rodio` feature
//!
//! # Architecture
//!
//! ```text
//!  LevelState ──┐
//!  LoadingScreen├──► AudioSubsystem ──► AudioBackend ──► MixBuses
//!  UserSettings ┘         │                 │
//!                         └─ world music ───┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use rogue_audio::prelude::*;
//!
//! let mut audio = AudioSubsystem::new(HeadlessBackend::new());
//! audio.initialize(&AudioDeveloperSettings::default());
//! audio.world_begin_play(&AudioWorldSettings::with_music("music/level1.ogg"), Some(settings));
//! audio.loading_screen_visibility_changed(false);
//! audio.set_music_volume(0.3, 0.5);
//! ```

pub mod backend;
pub mod error;
pub mod mixer;
#[cfg(feature = "rodio")]
pub mod rodio_backend;
pub mod settings;
pub mod subsystem;

pub mod prelude {
    pub use crate::backend::{AudioBackend, BackendCall, HeadlessBackend, SoundHandle};
    pub use crate::error::{AudioError, Result};
    pub use crate::mixer::{MixBus, MixBuses, MixClass};
    #[cfg(feature = "rodio")]
    pub use crate::rodio_backend::RodioBackend;
    pub use crate::settings::{AudioDeveloperSettings, AudioWorldSettings, SoundRef};
    pub use crate::subsystem::AudioSubsystem;
}

pub use prelude::*;
