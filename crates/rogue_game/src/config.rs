//! Game configuration loaded from TOML

use rogue_audio::{AudioDeveloperSettings, AudioWorldSettings};
use rogue_camera::{CameraConfig, CameraWorldSettings};
use rogue_character::{EnemyConfig, PlayerConfig};
use rogue_gamestate::LevelConfig;
use rogue_math::Vec3;
use rogue_movement::{FloorSegment, MovementError, Platforms};
use rogue_triggers::BoxVolume;
use rogue_ui::HudConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "ROGUE_CONFIG";

/// Errors that can occur when loading the game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid {archetype} movement: {source}")]
    Movement {
        archetype: &'static str,
        #[source]
        source: MovementError,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Per-world settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub camera: CameraWorldSettings,
    pub audio: AudioWorldSettings,
    /// Falling below this Z puts the player out of bounds
    pub kill_z: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            camera: CameraWorldSettings::default(),
            audio: AudioWorldSettings::default(),
            kill_z: -1000.0,
        }
    }
}

/// Project-wide settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeveloperSettings {
    pub audio: AudioDeveloperSettings,
}

/// An enemy placed in the level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySpawn {
    pub location: Vec3,
    /// Uses the boss archetype; its death wins the level after a delay
    pub boss: bool,
    pub patrol: Vec<Vec3>,
    /// Player presence here wakes the enemy up
    pub patrol_volume: Option<BoxVolume>,
    /// Player presence here makes the enemy chase faster
    pub attack_volume: Option<BoxVolume>,
}

impl Default for EnemySpawn {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            boss: false,
            patrol: Vec::new(),
            patrol_volume: None,
            attack_volume: None,
        }
    }
}

/// Switches the camera to a fixed point while the player is inside
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraZone {
    pub volume: BoxVolume,
    pub fixed_point: Vec3,
}

/// Damages the player on contact
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hazard {
    pub volume: BoxVolume,
    /// Knockback on contact; none is a plain hit
    #[serde(default)]
    pub launch_force: Option<Vec3>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PickupKind {
    HitPoints { amount: u32 },
    SpeedPowerup { duration: f32, multiplier: f32 },
}

/// Consumed on first touch
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub volume: BoxVolume,
    pub kind: PickupKind,
}

/// Everything placed in the level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    pub player_spawn: Vec3,
    pub platforms: Platforms,
    pub enemies: Vec<EnemySpawn>,
    pub camera_zones: Vec<CameraZone>,
    pub hazards: Vec<Hazard>,
    pub pickups: Vec<Pickup>,
    pub level_exit: Option<BoxVolume>,
    /// Seconds between the boss dying and victory
    pub boss_defeat_delay: f32,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            player_spawn: Vec3::new(0.0, 0.0, 90.0),
            platforms: Platforms::new(vec![
                FloorSegment::new(-500.0, 3000.0, 0.0),
                FloorSegment::new(3300.0, 6500.0, 0.0),
            ]),
            enemies: vec![EnemySpawn {
                location: Vec3::new(1500.0, 0.0, 90.0),
                patrol: vec![Vec3::new(1300.0, 0.0, 90.0), Vec3::new(1700.0, 0.0, 90.0)],
                patrol_volume: Some(BoxVolume::new(Vec3::new(1500.0, 0.0, 150.0), Vec3::new(900.0, 300.0, 400.0))),
                attack_volume: Some(BoxVolume::new(Vec3::new(1500.0, 0.0, 150.0), Vec3::new(300.0, 300.0, 300.0))),
                ..Default::default()
            }],
            camera_zones: vec![CameraZone {
                volume: BoxVolume::new(Vec3::new(5000.0, 0.0, 300.0), Vec3::new(500.0, 300.0, 600.0)),
                fixed_point: Vec3::new(5200.0, 0.0, 300.0),
            }],
            hazards: vec![Hazard {
                volume: BoxVolume::new(Vec3::new(2600.0, 0.0, 20.0), Vec3::new(50.0, 100.0, 20.0)),
                launch_force: Some(Vec3::new(-400.0, 0.0, 600.0)),
            }],
            pickups: vec![
                Pickup {
                    volume: BoxVolume::new(Vec3::new(800.0, 0.0, 90.0), Vec3::new(30.0, 100.0, 30.0)),
                    kind: PickupKind::HitPoints { amount: 1 },
                },
                Pickup {
                    volume: BoxVolume::new(Vec3::new(3600.0, 0.0, 90.0), Vec3::new(30.0, 100.0, 30.0)),
                    kind: PickupKind::SpeedPowerup {
                        duration: 5.0,
                        multiplier: 1.5,
                    },
                },
            ],
            level_exit: Some(BoxVolume::new(Vec3::new(6300.0, 0.0, 150.0), Vec3::new(50.0, 300.0, 300.0))),
            boss_defeat_delay: 2.0,
        }
    }
}

impl LevelLayout {
    /// Flat floor with nothing else in it
    pub fn empty() -> Self {
        Self {
            platforms: Platforms::new(vec![FloorSegment::new(-10_000.0, 10_000.0, 0.0)]),
            enemies: Vec::new(),
            camera_zones: Vec::new(),
            hazards: Vec::new(),
            pickups: Vec::new(),
            level_exit: None,
            ..Default::default()
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldSettings,
    pub developer: DeveloperSettings,
    pub camera: CameraConfig,
    pub level: LevelConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    /// Fields missing from a `[boss]` table fall back to the plain enemy
    /// defaults, not the boss preset
    pub boss: EnemyConfig,
    pub hud: HudConfig,
    pub layout: LevelLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldSettings::default(),
            developer: DeveloperSettings::default(),
            camera: CameraConfig::default(),
            level: LevelConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            boss: EnemyConfig::boss(),
            hud: HudConfig::default(),
            layout: LevelLayout::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Load the file named by `ROGUE_CONFIG`, or use defaults when unset
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("loading game config from {}", path.display());
                Self::from_file(&path)
            }
            None => {
                log::info!("{} not set, using the default game config", CONFIG_ENV);
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let movement = |archetype: &'static str, config: &rogue_movement::MovementConfig| {
            config
                .validate()
                .map_err(|source| ConfigError::Movement { archetype, source })
        };
        movement("player", &self.player.movement)?;
        movement("enemy", &self.enemy.movement)?;
        movement("boss", &self.boss.movement)?;

        if self.player.hit_points == 0 {
            return Err(ConfigError::Invalid("player needs at least one hit point".into()));
        }
        if !(self.level.time_per_level > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "time_per_level must be positive, got {}",
                self.level.time_per_level
            )));
        }
        if self.world.kill_z >= self.layout.player_spawn.z {
            return Err(ConfigError::Invalid("kill_z must be below the player spawn".into()));
        }
        Ok(())
    }

    /// Archetype for a spawn
    pub fn enemy_config(&self, spawn: &EnemySpawn) -> EnemyConfig {
        if spawn.boss {
            self.boss.clone()
        } else {
            self.enemy.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rogue_camera::CameraMode;

    #[test]
    fn test_defaults_validate() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.boss.hit_points, 5);
        assert_eq!(config.level.time_per_level, 60.0);
    }

    #[test]
    fn test_parse_partial_config() {
        let text = r#"
            [level]
            time_per_level = 90.0

            [world]
            kill_z = -2000.0

            [world.camera]
            default_mode = "Fixed"

            [player]
            hit_points = 5

            [player.movement]
            coyote_time = 0.2
        "#;
        let config = GameConfig::from_toml_str(text, Path::new("inline.toml")).unwrap();
        assert_eq!(config.level.time_per_level, 90.0);
        assert_eq!(config.world.kill_z, -2000.0);
        assert_eq!(config.world.camera.default_mode, CameraMode::Fixed);
        assert_eq!(config.player.hit_points, 5);
        assert_eq!(config.player.movement.coyote_time, 0.2);
        assert_eq!(config.player.movement.jump_max_count, 2);
    }

    #[test]
    fn test_parse_layout() {
        let text = r#"
            [layout]
            player_spawn = { x = 100.0, y = 0.0, z = 90.0 }
            level_exit = { center = { x = 900.0, y = 0.0, z = 100.0 }, half_extents = { x = 50.0, y = 100.0, z = 100.0 } }

            [[layout.pickups]]
            volume = { center = { x = 300.0, y = 0.0, z = 90.0 }, half_extents = { x = 20.0, y = 20.0, z = 20.0 } }
            kind = { type = "speed_powerup", duration = 3.0, multiplier = 2.0 }

            [[layout.enemies]]
            location = { x = 500.0, y = 0.0, z = 90.0 }
            boss = true
        "#;
        let config = GameConfig::from_toml_str(text, Path::new("inline.toml")).unwrap();
        let layout = &config.layout;
        assert_eq!(layout.player_spawn.x, 100.0);
        assert!(layout.level_exit.is_some());
        assert_eq!(
            layout.pickups[0].kind,
            PickupKind::SpeedPowerup {
                duration: 3.0,
                multiplier: 2.0
            }
        );
        assert!(layout.enemies[0].boss);
        assert_eq!(config.enemy_config(&layout.enemies[0]).hit_points, 5);
    }

    #[test]
    fn test_invalid_movement_rejected() {
        let text = r#"
            [player.movement]
            gravity_z = 500.0
        "#;
        let err = GameConfig::from_toml_str(text, Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Movement { archetype: "player", .. }));
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = GameConfig::from_toml_str("level = [", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
