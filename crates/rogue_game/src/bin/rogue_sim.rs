//! Headless level simulator
//!
//! Plays the configured level with a simple autopilot (run right, jump on
//! a fixed rhythm) and prints a JSON snapshot once per simulated second.
//!
//! Run with: cargo run -p rogue_game --bin rogue_sim -- --seconds 30
//!       or: ROGUE_CONFIG=level.toml cargo run --bin rogue_sim

use rogue_game::prelude::*;
use rogue_gamestate::SettingsStore;
use std::path::PathBuf;

struct SimArgs {
    config: Option<PathBuf>,
    seconds: f32,
    fps: u32,
    settings_dir: Option<PathBuf>,
    jump_interval: f32,
}

impl Default for SimArgs {
    fn default() -> Self {
        Self {
            config: None,
            seconds: 60.0,
            fps: 60,
            settings_dir: None,
            jump_interval: 1.2,
        }
    }
}

impl SimArgs {
    fn from_env() -> Self {
        let mut args = Self::default();
        let mut iter = std::env::args().skip(1);

        while let Some(arg) = iter.next() {
            let value = match arg.as_str() {
                "--config" | "--seconds" | "--fps" | "--settings-dir" | "--jump-interval" => iter.next(),
                other => {
                    log::warn!("ignoring unknown argument {}", other);
                    continue;
                }
            };
            let Some(value) = value else {
                log::warn!("{} needs a value", arg);
                continue;
            };

            match arg.as_str() {
                "--config" => args.config = Some(PathBuf::from(value)),
                "--settings-dir" => args.settings_dir = Some(PathBuf::from(value)),
                "--seconds" => match value.parse() {
                    Ok(seconds) => args.seconds = seconds,
                    Err(_) => log::warn!("bad --seconds value {}", value),
                },
                "--fps" => match value.parse::<u32>() {
                    Ok(fps) if fps > 0 => args.fps = fps,
                    _ => log::warn!("bad --fps value {}", value),
                },
                "--jump-interval" => match value.parse() {
                    Ok(interval) => args.jump_interval = interval,
                    Err(_) => log::warn!("bad --jump-interval value {}", value),
                },
                _ => {}
            }
        }

        args
    }
}

/// Runs right and taps jump on a rhythm
struct Autopilot {
    interval: f32,
    hold: f32,
    clock: f32,
    jumping: bool,
}

impl Autopilot {
    fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(0.1),
            hold: 0.2,
            clock: 0.0,
            jumping: false,
        }
    }

    fn drive<B: AudioBackend>(&mut self, world: &mut GameWorld<B>, delta: f32) {
        world.input(InputAction::Move(1.0));

        self.clock += delta;
        if !self.jumping && self.clock >= self.interval {
            world.input(InputAction::JumpPressed);
            self.jumping = true;
            self.clock = 0.0;
        } else if self.jumping && self.clock >= self.hold {
            world.input(InputAction::JumpReleased);
            self.jumping = false;
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = SimArgs::from_env();

    let config = match &args.config {
        Some(path) => GameConfig::from_file(path),
        None => GameConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut world = GameWorld::new(config, HeadlessBackend::new());
    let store = match &args.settings_dir {
        Some(dir) => Some(SettingsStore::new(dir)),
        None => SettingsStore::user_scoped("rogue"),
    };
    if let Some(store) = store {
        log::info!("user settings at {}", store.path().display());
        world = world.with_settings_store(store);
    }

    world.begin_play();

    let delta = 1.0 / args.fps as f32;
    let frames = (args.seconds * args.fps as f32).ceil() as u64;
    let mut autopilot = Autopilot::new(args.jump_interval);

    for frame in 1..=frames {
        if !world.level().has_match_ended() {
            autopilot.drive(&mut world, delta);
        }
        world.tick(delta);

        if frame % u64::from(args.fps) == 0 || world.level().has_match_ended() {
            match serde_json::to_string(&world.snapshot()) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("failed to serialize snapshot: {}", e),
            }
        }

        if world.level().has_match_ended() {
            break;
        }
    }

    log::info!(
        "simulation finished in {:?} after {} frames",
        world.level().level_state(),
        world.frame()
    );

    if let Err(e) = world.save_settings() {
        log::error!("failed to save settings: {}", e);
    }
    world.end_play();
}
