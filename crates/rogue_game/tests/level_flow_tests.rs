//! Integration tests for rogue_game
//!
//! Plays small levels end to end through the public world API

use rogue_audio::{AudioDeveloperSettings, AudioWorldSettings, SoundRef};
use rogue_camera::CameraMode;
use rogue_character::Combatant;
use rogue_game::prelude::*;
use rogue_gamestate::SettingsStore;
use rogue_math::Vec3;
use rogue_movement::{FloorSegment, Platforms};
use rogue_triggers::BoxVolume;

const DT: f32 = 1.0 / 60.0;

fn config_with(layout: LevelLayout) -> GameConfig {
    let mut config = GameConfig::default();
    config.layout = layout;
    config
}

fn start(config: GameConfig) -> GameWorld {
    let mut world = GameWorld::new(config, HeadlessBackend::new());
    world.begin_play();
    world
}

fn run(world: &mut GameWorld, seconds: f32) {
    let frames = (seconds / DT).round() as u32;
    for _ in 0..frames {
        world.tick(DT);
    }
}

fn enemy_at(x: f32) -> EnemySpawn {
    EnemySpawn {
        location: Vec3::new(x, 0.0, 90.0),
        ..Default::default()
    }
}

fn hit_points(world: &GameWorld) -> u32 {
    world.player().character().combat.current_hit_points()
}

#[test]
fn test_countdown_ends_in_game_over() {
    let mut config = config_with(LevelLayout::empty());
    config.level.time_per_level = 2.0;
    config.developer.audio = AudioDeveloperSettings::default().with_level_fail_music("music/fail.ogg");
    config.world.audio = AudioWorldSettings::with_music("music/level.ogg");
    let mut world = start(config);

    assert_eq!(world.audio().current_music().map(SoundRef::path), Some("music/level.ogg"));

    run(&mut world, 1.9);
    assert_eq!(world.level().level_state(), LevelState::Running);

    run(&mut world, 0.2);
    assert_eq!(world.level().level_state(), LevelState::GameOver);
    assert_eq!(world.level().remaining_time(), 0.0);
    assert!(world.end_screen().is_some());
    assert_eq!(world.audio().current_music().map(SoundRef::path), Some("music/fail.ogg"));
}

#[test]
fn test_stomp_kills_enemy() {
    let mut layout = LevelLayout::empty();
    layout.player_spawn = Vec3::new(0.0, 0.0, 400.0);
    layout.enemies.push(enemy_at(0.0));
    let mut world = start(config_with(layout));

    let mut bounced = false;
    for _ in 0..60 {
        world.tick(DT);
        if world.enemy(0).is_some_and(|e| e.is_dead()) {
            bounced = world.player().character().velocity().z > 0.0;
            break;
        }
    }

    assert!(world.enemy(0).is_some_and(|e| e.is_dead()));
    assert!(bounced);
    assert_eq!(hit_points(&world), world.config().player.hit_points);
    assert_eq!(world.level().level_state(), LevelState::Running);
}

#[test]
fn test_walking_into_enemy_hurts() {
    let mut layout = LevelLayout::empty();
    layout.enemies.push(enemy_at(300.0));
    let mut world = start(config_with(layout));

    world.input(InputAction::Move(1.0));
    run(&mut world, 1.0);

    assert_eq!(hit_points(&world), world.config().player.hit_points - 1);
    assert!(world.enemy(0).is_some_and(|e| !e.is_dead()));
}

#[test]
fn test_speed_powerup_passes_through_enemies() {
    let mut layout = LevelLayout::empty();
    layout.pickups.push(Pickup {
        volume: BoxVolume::new(Vec3::new(0.0, 0.0, 90.0), Vec3::new(20.0, 20.0, 20.0)),
        kind: PickupKind::SpeedPowerup {
            duration: 5.0,
            multiplier: 1.5,
        },
    });
    layout.enemies.push(enemy_at(400.0));
    let mut world = start(config_with(layout));
    assert!(world.player().is_speed_powerup_active());

    world.input(InputAction::Move(1.0));
    run(&mut world, 1.5);

    assert!(world.player().location().x > 500.0);
    assert_eq!(hit_points(&world), world.config().player.hit_points);
}

#[test]
fn test_falling_into_pit_is_out_of_bounds() {
    let mut layout = LevelLayout::empty();
    layout.platforms = Platforms::new(vec![FloorSegment::new(-500.0, 400.0, 0.0)]);
    let mut world = start(config_with(layout));

    world.input(InputAction::Move(1.0));
    run(&mut world, 5.0);

    assert_eq!(world.level().level_state(), LevelState::GameOver);
    assert!(!world.player().is_dead());
    assert!(world.player().location().z < world.config().world.kill_z);
}

#[test]
fn test_boss_death_wins_after_delay() {
    let mut layout = LevelLayout::empty();
    layout.enemies.push(EnemySpawn {
        boss: true,
        ..enemy_at(2000.0)
    });
    layout.boss_defeat_delay = 1.0;
    let mut world = start(config_with(layout));
    assert_eq!(world.enemy(0).map(|e| e.config().hit_points), Some(5));

    if let Some(boss) = world.enemy_mut(0) {
        assert!(boss.kill_character());
    }
    world.tick(DT);
    assert_eq!(world.level().level_state(), LevelState::Running);
    assert!(world.level().is_victory_pending());

    run(&mut world, 1.1);
    assert_eq!(world.level().level_state(), LevelState::Victory);
}

#[test]
fn test_player_death_is_game_over() {
    let mut world = start(config_with(LevelLayout::empty()));
    world.player_mut().kill_character();
    world.tick(DT);
    assert_eq!(world.level().level_state(), LevelState::GameOver);

    // Input is ignored once the match is over
    let x = world.player().location().x;
    world.input(InputAction::Move(1.0));
    run(&mut world, 0.5);
    assert_eq!(world.player().location().x, x);
}

#[test]
fn test_camera_zone_switches_modes() {
    let mut layout = LevelLayout::empty();
    layout.camera_zones.push(CameraZone {
        volume: BoxVolume::new(Vec3::new(0.0, 0.0, 90.0), Vec3::new(100.0, 300.0, 300.0)),
        fixed_point: Vec3::new(0.0, -800.0, 300.0),
    });
    let mut world = start(config_with(layout));
    assert_eq!(world.camera().camera_mode(), CameraMode::Fixed);

    world.input(InputAction::Move(1.0));
    run(&mut world, 1.0);
    assert_eq!(world.camera().camera_mode(), CameraMode::Follow);
}

#[test]
fn test_restart_respawns_everything() {
    let mut layout = LevelLayout::empty();
    layout.player_spawn = Vec3::new(0.0, 0.0, 400.0);
    layout.enemies.push(enemy_at(0.0));
    let mut config = config_with(layout);
    config.level.time_per_level = 3.0;
    let mut world = start(config);

    run(&mut world, 3.5);
    assert_eq!(world.level().level_state(), LevelState::GameOver);
    assert!(world.enemy(0).is_some_and(|e| e.is_dead()));

    world.reset_level();
    assert_eq!(world.level().level_state(), LevelState::Running);
    assert_eq!(world.level().remaining_time(), 3.0);
    assert!(world.end_screen().is_none());
    assert!(world.enemy(0).is_some_and(|e| !e.is_dead()));
    assert_eq!(world.player().location(), Vec3::new(0.0, 0.0, 400.0));
    assert_eq!(hit_points(&world), world.config().player.hit_points);

    // The enemy can be stomped again
    run(&mut world, 1.0);
    assert!(world.enemy(0).is_some_and(|e| e.is_dead()));
}

#[test]
fn test_pause_pauses_music() {
    let mut config = config_with(LevelLayout::empty());
    config.world.audio = AudioWorldSettings::with_music("music/level.ogg");
    let mut world = start(config);
    assert!(!world.audio().is_world_music_paused());

    world.pause_game();
    assert!(world.audio().is_world_music_paused());

    world.unpause_game();
    assert!(!world.audio().is_world_music_paused());
}

#[test]
fn test_settings_survive_restart_of_the_game() {
    let dir = tempfile::tempdir().unwrap();

    let mut world = GameWorld::new(config_with(LevelLayout::empty()), HeadlessBackend::new())
        .with_settings_store(SettingsStore::new(dir.path()));
    world.begin_play();
    world.audio_mut().set_music_volume(0.2, 0.0);
    world.save_settings().unwrap();

    let mut again = GameWorld::new(config_with(LevelLayout::empty()), HeadlessBackend::new())
        .with_settings_store(SettingsStore::new(dir.path()));
    again.begin_play();
    assert_eq!(again.audio().music_volume(), 0.2);
}
