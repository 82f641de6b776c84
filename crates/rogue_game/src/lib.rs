//! Rogue Game - World Facade
//!
//! Builds a playable level from a [`GameConfig`] and drives every gameplay
//! system in a fixed order each frame.
//!
//! # Features
//!
//! - TOML game config with defaults for every section, path override via
//!   `ROGUE_CONFIG`
//! - Level layout: platforms, enemies with patrol routes and volumes,
//!   camera zones, hazards, pickups, level exit and kill Z
//! - Overlap routing into combat, level state, camera and audio
//! - Restart with full respawn
//!
//! # Architecture
//!
//! ```text
//! tick(dt):
//!   input ─► movement (player, enemies) ─► overlaps ─► combat events
//!         ─► level countdown ─► level events ─► camera ─► audio fades
//! ```
//!
//! # Example
//!
//! ```ignore
//! use rogue_game::prelude::*;
//!
//! let config = GameConfig::load()?;
//! let mut world = GameWorld::new(config, HeadlessBackend::new());
//! world.begin_play();
//!
//! world.input(InputAction::Move(1.0));
//! while !world.level().has_match_ended() {
//!     world.tick(1.0 / 60.0);
//! }
//! ```

pub mod config;
pub mod input;
pub mod world;

pub mod prelude {
    pub use crate::config::{
        CameraZone, ConfigError, DeveloperSettings, EnemySpawn, GameConfig, Hazard, LevelLayout, Pickup,
        PickupKind, Result, WorldSettings, CONFIG_ENV,
    };
    pub use crate::input::InputAction;
    pub use crate::world::{GameWorld, WorldSnapshot};
    pub use rogue_audio::{AudioBackend, HeadlessBackend};
    pub use rogue_gamestate::LevelState;
}

pub use prelude::*;
