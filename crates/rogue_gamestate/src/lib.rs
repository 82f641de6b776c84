//! Rogue GameState - Level State and Settings
//!
//! # Features
//!
//! - Level lifecycle: `Preload → Ready → Running ⇄ Paused`, ending in
//!   `GameOver` or `Victory`
//! - Level countdown that ends the match when it runs out
//! - Deferred boss victory so death animations can finish
//! - Observers notified once per real state change
//! - User settings (volume levels) persisted as JSON
//!
//! # Example
//!
//! ```ignore
//! use rogue_gamestate::prelude::*;
//!
//! let mut level = LevelStateMachine::new(LevelConfig::default());
//! level.subscribe(|event| log::info!("level: {:?}", event));
//! level.begin_play();
//!
//! loop {
//!     level.tick(dt);
//!     if level.has_match_ended() { break; }
//! }
//!
//! let settings = SettingsStore::user_scoped("rogue")
//!     .map(|store| store.load_or_default())
//!     .unwrap_or_default();
//! ```

pub mod level;
pub mod settings;
pub mod state;

pub mod prelude {
    pub use crate::level::{LevelConfig, LevelEvent, LevelStateMachine, LevelTimer, ObserverId};
    pub use crate::settings::{SaveError, SettingsStore, UserSettings};
    pub use crate::state::LevelState;
}

pub use prelude::*;
