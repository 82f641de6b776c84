//! Player character

use crate::character::{Character, Combatant};
use crate::collision::CollisionResponse;
use crate::hooks::PlayerHooks;
use rogue_combat::{CombatEvent, HitOutcome, NoHooks};
use rogue_core::{EntityId, TimerManager};
use rogue_math::{consts::KINDA_SMALL_NUMBER, Vec3};
use rogue_movement::{CharacterMovement, FloorQuery, MovementConfig, MovementEvent};
use rogue_triggers::{BoxVolume, CollisionChannel};
use serde::{Deserialize, Serialize};

/// Player tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub hit_points: u32,
    /// Input is disabled for this long after a hit (0 = no stun)
    pub hit_stun_duration: f32,
    /// Hits are ignored for this long after a hit (0 = none)
    pub hit_invulnerability_duration: f32,
    /// Whether hits taken in the air stun
    pub stun_mid_air: bool,
    pub movement: MovementConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            hit_points: 3,
            hit_stun_duration: 0.5,
            hit_invulnerability_duration: 1.0,
            stun_mid_air: false,
            movement: MovementConfig::default(),
        }
    }
}

/// Player timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerTimer {
    HitStun,
    HitInvulnerability,
    SpeedPowerup,
}

/// The player character
pub struct Player {
    character: Character,
    config: PlayerConfig,
    hooks: Box<dyn PlayerHooks + Send>,
    timers: TimerManager<PlayerTimer>,
    input_enabled: bool,
    hit_invulnerable: bool,
    speed_powerup_active: bool,
    initial_max_walk_speed: f32,
    initial_max_acceleration: f32,
    default_enemy_response: CollisionResponse,
    default_projectile_response: CollisionResponse,
}

impl Player {
    pub fn new(id: EntityId, config: PlayerConfig, spawn: Vec3) -> Self {
        let movement = CharacterMovement::new(config.movement.clone(), spawn);
        let character = Character::new(id, movement, config.hit_points, CollisionChannel::Player);

        // Powerups change these; remember where they started
        let initial_max_walk_speed = character.movement.max_walk_speed();
        let initial_max_acceleration = character.movement.max_acceleration();
        let default_enemy_response = character.collision.response_to(CollisionChannel::Enemy);
        let default_projectile_response = character.collision.response_to(CollisionChannel::Projectile);

        Self {
            character,
            config,
            hooks: Box::new(NoHooks),
            timers: TimerManager::new(),
            input_enabled: true,
            hit_invulnerable: false,
            speed_powerup_active: false,
            initial_max_walk_speed,
            initial_max_acceleration,
            default_enemy_response,
            default_projectile_response,
        }
    }

    pub fn with_hooks(mut self, hooks: impl PlayerHooks + Send + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn location(&self) -> Vec3 {
        self.character.location()
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn is_hit_invulnerable(&self) -> bool {
        self.hit_invulnerable
    }

    pub fn is_speed_powerup_active(&self) -> bool {
        self.speed_powerup_active
    }

    pub fn timers(&self) -> &TimerManager<PlayerTimer> {
        &self.timers
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn set_move_input(&mut self, axis: f32) {
        if self.input_enabled {
            self.character.movement.set_input(axis);
        }
    }

    pub fn press_jump(&mut self) {
        if self.input_enabled {
            self.character.movement.jump();
        }
    }

    pub fn release_jump(&mut self) {
        if self.input_enabled {
            self.character.movement.stop_jumping();
        }
    }

    fn disable_input(&mut self) {
        self.input_enabled = false;
        self.character.movement.set_input(0.0);
    }

    fn enable_input(&mut self) {
        if !self.character.is_dead() {
            self.input_enabled = true;
        }
    }

    // ------------------------------------------------------------------
    // Combat
    // ------------------------------------------------------------------

    /// Death: lock input, cut the jump short, then the shared death flow
    fn character_death(&mut self) {
        self.disable_input();

        if self.character.movement.jump_state().jump_current_count > 0 {
            self.character.movement.stop_jumping();
        }

        let velocity = self.character.velocity();
        if velocity.z > 0.0 {
            self.character.movement.set_velocity(velocity.with_z(0.0));
        }

        self.timers.clear_all();
        self.character.character_death(&mut *self.hooks);
    }

    /// Grant hit points to a living player
    pub fn add_hitpoints(&mut self, points: u32) {
        let Some(total) = self.character.combat.add_hit_points(points) else {
            return;
        };
        self.hooks.on_hit_points_added(total);
        self.character.push_event(CombatEvent::HitPointsAdded {
            entity: self.character.id(),
            added: points,
            total,
        });
    }

    /// Speed up, become invulnerable and pass through enemies and projectiles.
    /// Activating again restarts the full duration.
    pub fn activate_speed_powerup(&mut self, duration: f32, max_speed_multiplier: f32) {
        if !(duration > 0.0) || !max_speed_multiplier.is_finite() || max_speed_multiplier <= 0.0 {
            log::warn!(
                "ignoring speed powerup with duration {} and multiplier {}",
                duration,
                max_speed_multiplier
            );
            return;
        }

        self.speed_powerup_active = true;

        let movement = &mut self.character.movement;
        movement.set_max_acceleration(self.initial_max_acceleration * max_speed_multiplier);
        movement.set_max_walk_speed(self.initial_max_walk_speed * max_speed_multiplier);

        self.hit_invulnerable = true;

        let collision = &mut self.character.collision;
        collision.set_response(CollisionChannel::Enemy, CollisionResponse::Ignore);
        collision.set_response(CollisionChannel::Projectile, CollisionResponse::Ignore);

        self.timers.set_timer(PlayerTimer::SpeedPowerup, duration);
        self.hooks.on_speed_powerup_activated(duration);
    }

    fn stop_speed_powerup(&mut self) {
        let movement = &mut self.character.movement;
        movement.set_max_acceleration(self.initial_max_acceleration);
        movement.set_max_walk_speed(self.initial_max_walk_speed);

        self.speed_powerup_active = false;
        self.hit_invulnerable = self.timers.is_active(&PlayerTimer::HitInvulnerability);

        let collision = &mut self.character.collision;
        collision.set_response(CollisionChannel::Enemy, self.default_enemy_response);
        collision.set_response(CollisionChannel::Projectile, self.default_projectile_response);
    }

    /// Take one hit point and start stun and invulnerability unless the
    /// hit landed mid-air
    fn apply_hit(&mut self, airborne: bool) -> HitOutcome {
        if self.hit_invulnerable {
            return HitOutcome::Ignored;
        }

        let outcome = self.character.take_hit(&mut *self.hooks);
        match outcome {
            HitOutcome::Ignored => return outcome,
            HitOutcome::Killed => {
                self.character_death();
                return outcome;
            }
            HitOutcome::Damaged { .. } => {}
        }

        if !self.config.stun_mid_air && airborne {
            return outcome;
        }

        if self.config.hit_stun_duration > 0.0 {
            self.disable_input();
            self.timers.set_timer(PlayerTimer::HitStun, self.config.hit_stun_duration);
        }

        if self.config.hit_invulnerability_duration > 0.0 {
            self.hit_invulnerable = true;
            self.timers
                .set_timer(PlayerTimer::HitInvulnerability, self.config.hit_invulnerability_duration);
        }

        outcome
    }

    fn stop_hit_stun(&mut self) {
        self.enable_input();
    }

    fn stop_hit_invulnerability(&mut self) {
        self.hit_invulnerable = self.speed_powerup_active;
    }

    // ------------------------------------------------------------------
    // Enemy jumps
    // ------------------------------------------------------------------

    /// A stomp counts when alive, not rising, and at or above the top of the
    /// enemy's hurt box
    pub fn is_enemy_jump_valid(&self, hurt_box: &BoxVolume) -> bool {
        if self.character.is_dead() {
            return false;
        }

        // Rising through a hurt box is not a stomp
        if self.character.velocity().z > 0.0 {
            return false;
        }

        let upper_bound_z = hurt_box.top_z() - KINDA_SMALL_NUMBER;
        self.character.location().z >= upper_bound_z
    }

    /// Bounce off an enemy
    pub fn jump_from_enemy_hurt_box(&mut self) {
        if self.character.movement.do_enemy_jump() {
            self.hooks.on_enemy_jump();
        }
    }

    pub fn launch_character(&mut self, velocity: Vec3, xy_override: bool, z_override: bool) {
        self.character.movement.launch(velocity, xy_override, z_override);
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Fire due timers, then move
    pub fn tick(&mut self, delta: f32, floor: &dyn FloorQuery) -> Vec<MovementEvent> {
        for timer in self.timers.tick(delta) {
            log::trace!("player timer {:?} expired", timer);
            match timer {
                PlayerTimer::HitStun => self.stop_hit_stun(),
                PlayerTimer::HitInvulnerability => self.stop_hit_invulnerability(),
                PlayerTimer::SpeedPowerup => self.stop_speed_powerup(),
            }
        }

        self.character.update(delta, floor)
    }

    /// Back to spawn state for a restarted level
    pub fn respawn(&mut self, location: Vec3) {
        self.timers.clear_all();
        if self.speed_powerup_active {
            self.stop_speed_powerup();
        }
        self.hit_invulnerable = false;
        self.character.respawn(location);
        self.input_enabled = true;
    }
}

impl Combatant for Player {
    fn character(&self) -> &Character {
        &self.character
    }

    fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    fn hit_character(&mut self) -> HitOutcome {
        let airborne = self.character.movement.is_falling();
        self.apply_hit(airborne)
    }

    fn hit_character_with_launch_force(&mut self, force: Vec3) -> HitOutcome {
        if self.hit_invulnerable {
            return HitOutcome::Ignored;
        }
        // The knockback makes the player airborne; stun follows where the
        // hit landed
        let airborne = self.character.movement.is_falling();
        if !self.character.launch_for_hit(force) {
            return HitOutcome::Ignored;
        }
        self.apply_hit(airborne)
    }

    fn kill_character(&mut self) -> bool {
        if !self.character.combat.kill() {
            return false;
        }
        self.character_death();
        true
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("character", &self.character)
            .field("input_enabled", &self.input_enabled)
            .field("hit_invulnerable", &self.hit_invulnerable)
            .field("speed_powerup_active", &self.speed_powerup_active)
            .finish()
    }
}
