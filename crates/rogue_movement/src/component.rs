//! Character movement component

use crate::config::MovementConfig;
use crate::events::MovementEvent;
use crate::floor::FloorQuery;
use crate::jump::{can_jump_internal, JumpState};
use crate::state::{MovementMode, MovementState};
use rogue_math::{finterp_constant_to, Vec3};

/// Feet within this distance of the floor stay grounded
const FLOOR_SNAP_DISTANCE: f32 = 2.0;

/// Movement for one character: jump bookkeeping, fall state and a kinematic
/// integrator constrained to the X/Z plane.
#[derive(Debug, Clone)]
pub struct CharacterMovement {
    config: MovementConfig,
    state: MovementState,
    jump: JumpState,
    mode: MovementMode,
    default_mode: MovementMode,
    velocity: Vec3,
    /// Capsule centre
    location: Vec3,
    max_walk_speed: f32,
    max_acceleration: f32,
    /// Multiplier over the configured walk speed
    speed_multiplier: f32,
    /// Lateral input in [-1, 1]
    input_x: f32,
    owner_dead: bool,
    /// Apex notification is armed for the current fall
    notify_apex: bool,
    events: Vec<MovementEvent>,
}

impl CharacterMovement {
    pub fn new(config: MovementConfig, location: Vec3) -> Self {
        Self {
            state: MovementState::new(config.gravity_scale),
            jump: JumpState::new(config.jump_max_count, config.jump_max_hold_time),
            mode: MovementMode::Walking,
            default_mode: MovementMode::Walking,
            velocity: Vec3::ZERO,
            location,
            max_walk_speed: config.max_walk_speed,
            max_acceleration: config.max_acceleration,
            speed_multiplier: 1.0,
            input_x: 0.0,
            owner_dead: false,
            notify_apex: false,
            events: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn jump_state(&self) -> &JumpState {
        &self.jump
    }

    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.mode == MovementMode::Falling
    }

    #[inline]
    pub fn is_moving_on_ground(&self) -> bool {
        self.mode == MovementMode::Walking
    }

    pub fn gravity_scale(&self) -> f32 {
        self.state.gravity_scale
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity.with_y(0.0);
    }

    pub fn location(&self) -> Vec3 {
        self.location
    }

    pub fn set_location(&mut self, location: Vec3) {
        self.location = location;
    }

    /// Location of the capsule bottom
    pub fn feet_location(&self) -> Vec3 {
        self.location - Vec3::Z * self.config.capsule_half_height
    }

    pub fn max_walk_speed(&self) -> f32 {
        self.max_walk_speed
    }

    pub fn set_max_walk_speed(&mut self, speed: f32) {
        self.max_walk_speed = speed.max(0.0);
    }

    pub fn max_acceleration(&self) -> f32 {
        self.max_acceleration
    }

    pub fn set_max_acceleration(&mut self, acceleration: f32) {
        self.max_acceleration = acceleration.max(0.0);
    }

    /// Walk at `multiplier` times the configured speed. Non-positive or
    /// non-finite multipliers are ignored.
    pub fn set_movement_speed_multiplier(&mut self, multiplier: f32) {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            log::warn!("ignoring movement speed multiplier {}", multiplier);
            return;
        }
        self.speed_multiplier = multiplier;
        self.max_walk_speed = self.config.max_walk_speed * multiplier;
    }

    /// Back to the configured walk speed
    pub fn revert_movement_speed_multiplier(&mut self) {
        self.speed_multiplier = 1.0;
        self.max_walk_speed = self.config.max_walk_speed;
    }

    pub fn movement_speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// The owner died; no further jumps are allowed
    pub fn set_owner_dead(&mut self, dead: bool) {
        self.owner_dead = dead;
    }

    /// Lateral input, clamped to [-1, 1]
    pub fn set_input(&mut self, axis: f32) {
        self.input_x = if axis.is_finite() { axis.clamp(-1.0, 1.0) } else { 0.0 };
    }

    pub fn input(&self) -> f32 {
        self.input_x
    }

    // ------------------------------------------------------------------
    // Modes
    // ------------------------------------------------------------------

    pub fn set_movement_mode(&mut self, mode: MovementMode) {
        if mode == self.mode {
            return;
        }
        let previous = self.mode;
        self.mode = mode;
        self.on_movement_mode_changed(previous);
    }

    /// Stop all movement until a mode is set again
    pub fn disable_movement(&mut self) {
        self.velocity = Vec3::ZERO;
        self.set_movement_mode(MovementMode::None);
    }

    /// Re-enable movement in the default mode
    pub fn set_default_movement_mode(&mut self) {
        self.set_movement_mode(self.default_mode);
    }

    /// React to a mode transition. `self.mode` already holds the new mode.
    pub fn on_movement_mode_changed(&mut self, previous: MovementMode) {
        match (previous, self.mode) {
            (MovementMode::Falling, MovementMode::Walking) => {
                self.state.is_airborne = false;
                self.state.airborne_time = 0.0;
                self.state.reset_fall();
                self.state.ignore_initial_jump_state_reset = false;
                self.state.performing_enemy_jump = false;
                self.notify_apex = false;
                self.events.push(MovementEvent::Landed {
                    location: self.location,
                });
            }
            (_, MovementMode::Falling) => {
                self.state.is_airborne = true;
                self.state.airborne_time = 0.0;
                self.state.fall_time = 0.0;
                self.notify_apex = true;
            }
            (_, MovementMode::None) => {
                self.state.is_airborne = false;
                self.state.airborne_time = 0.0;
                self.state.reset_fall();
                self.notify_apex = false;
            }
            _ => {}
        }

        // Landing always clears the jump; a fall only does when the button is up
        if !self.jump.pressed_jump || !self.is_falling() {
            self.jump.reset(self.is_falling());
        }

        log::trace!("movement mode {:?} -> {:?}", previous, self.mode);
        self.events.push(MovementEvent::ModeChanged {
            previous,
            current: self.mode,
        });
    }

    // ------------------------------------------------------------------
    // Jumping
    // ------------------------------------------------------------------

    /// Jump button pressed
    pub fn jump(&mut self) {
        self.jump.press();
    }

    /// Jump button released
    pub fn stop_jumping(&mut self) {
        self.jump.pressed_jump = false;
        self.stop_jump_input();
        self.jump.reset(self.is_falling());
    }

    /// Whether the character may jump this tick
    pub fn can_jump(&self) -> bool {
        can_jump_internal(&self.jump, self.owner_dead)
    }

    /// Whether the current movement mode permits a jump attempt
    pub fn can_attempt_jump(&self) -> bool {
        if self.owner_dead {
            return false;
        }
        if self.state.performing_enemy_jump {
            return true;
        }
        matches!(self.mode, MovementMode::Walking | MovementMode::Falling)
    }

    /// Apply take-off velocity. Called every tick the jump is held; only the
    /// first call of a jump resets the fall state.
    pub fn do_jump(&mut self, _is_replaying: bool, _delta: f32) -> bool {
        if !self.can_attempt_jump() {
            return false;
        }

        if !self.state.ignore_initial_jump_state_reset {
            self.state.reset_fall();
            self.state.ignore_initial_jump_state_reset = true;
        }

        self.state.jump_input_active = true;
        self.velocity.z = self.velocity.z.max(self.config.jump_z_velocity());
        self.notify_apex = true;
        self.set_movement_mode(MovementMode::Falling);
        true
    }

    /// The jump input stopped; the next jump starts fresh
    pub fn stop_jump_input(&mut self) {
        self.state.jump_input_active = false;
        self.state.ignore_initial_jump_state_reset = false;
    }

    /// Bounce off an enemy regardless of the jump count
    pub fn do_enemy_jump(&mut self) -> bool {
        self.state.performing_enemy_jump = true;
        self.state.ignore_initial_jump_state_reset = false;

        let jumped = self.do_jump(false, 0.0);

        self.state.performing_enemy_jump = false;
        // A bounce without the button held eases out like a released jump
        self.state.jump_input_active = self.jump.pressed_jump;
        jumped
    }

    /// Descent started: begin the falling gravity blend
    pub fn notify_jump_apex(&mut self) {
        self.state.apply_falling_gravity = true;
        self.state.fall_time = 0.0;
        self.state.gravity_scale = self.config.fall_begin_gravity_scale;
        self.events.push(MovementEvent::Apex {
            location: self.location,
        });
    }

    /// Per-tick jump check, before integration
    pub fn check_jump_input(&mut self, delta: f32) {
        self.jump.jump_current_count_pre_jump = self.jump.jump_current_count;

        if !self.jump.pressed_jump {
            return;
        }

        // Past the coyote window the grounded jump is gone
        if !self.jump.was_jumping
            && self.jump.jump_current_count == 0
            && self.is_falling()
            && self.state.airborne_time > self.config.coyote_time
        {
            self.jump.jump_current_count += 1;
        }

        let did_jump = self.can_jump() && self.do_jump(false, delta);
        if did_jump && !self.jump.was_jumping {
            self.jump.jump_current_count += 1;
            self.jump.jump_force_time_remaining = self.jump.jump_max_hold_time;
            self.events.push(MovementEvent::Jumped {
                jump_count: self.jump.jump_current_count,
            });
        }

        self.jump.was_jumping = did_jump;
    }

    /// Per-tick hold accounting, after integration
    pub fn clear_jump_input(&mut self, delta: f32) {
        self.jump.clear_input(delta);
    }

    // ------------------------------------------------------------------
    // Timers and gravity
    // ------------------------------------------------------------------

    /// Advance the airborne and fall timers
    pub fn tick_movement_timers(&mut self, delta: f32) {
        if delta <= 0.0 {
            return;
        }
        if self.state.is_airborne {
            self.state.airborne_time += delta;
        }
        if self.state.apply_falling_gravity {
            self.state.fall_time += delta;
        }
    }

    /// Ease gravity while falling; raise it while rising after an early release
    pub fn interpolate_falling_gravity(&mut self, _delta: f32) {
        if self.state.apply_falling_gravity {
            let alpha = self.state.fall_time / self.config.fall_gravity_blend_time;
            self.state.gravity_scale = self.config.gravity_easing.evaluate(
                self.config.fall_begin_gravity_scale,
                self.config.fall_max_gravity_scale,
                alpha,
            );
        } else if self.state.is_airborne && self.velocity.z > 0.0 {
            let released_early = !self.state.jump_input_active && self.jump.jump_current_count > 0;
            self.state.gravity_scale = if released_early {
                self.state.default_gravity_scale * self.config.early_release_gravity_multiplier
            } else {
                self.state.default_gravity_scale
            };
        }
    }

    /// Movement-component tick: timers then gravity
    pub fn tick(&mut self, delta: f32) {
        self.tick_movement_timers(delta);
        self.interpolate_falling_gravity(delta);
    }

    // ------------------------------------------------------------------
    // Forces and integration
    // ------------------------------------------------------------------

    /// Launch with `launch_velocity`, optionally replacing the current XY
    /// and Z velocity instead of adding to it
    pub fn launch(&mut self, launch_velocity: Vec3, xy_override: bool, z_override: bool) {
        if self.mode == MovementMode::None {
            return;
        }

        let mut velocity = launch_velocity;
        if !xy_override {
            velocity.x += self.velocity.x;
        }
        if !z_override {
            velocity.z += self.velocity.z;
        }

        self.velocity = velocity.with_y(0.0);
        self.set_movement_mode(MovementMode::Falling);
        self.events.push(MovementEvent::Launched {
            velocity: self.velocity,
        });
    }

    fn apply_lateral_input(&mut self, delta: f32) {
        let control = if self.is_falling() { self.config.air_control } else { 1.0 };

        if self.input_x != 0.0 {
            let target = self.input_x * self.max_walk_speed;
            let accel = self.max_acceleration * control;
            self.velocity.x = finterp_constant_to(self.velocity.x, target, delta, accel);
        } else if self.is_moving_on_ground() {
            self.velocity.x = finterp_constant_to(self.velocity.x, 0.0, delta, self.config.braking_deceleration);
        }
    }

    /// Integrate one step against `floor`. Platforms are one-way: they only
    /// catch a character from above.
    pub fn integrate(&mut self, delta: f32, floor: &dyn FloorQuery) {
        if self.mode == MovementMode::None || delta <= 0.0 {
            return;
        }

        self.apply_lateral_input(delta);

        let half_height = self.config.capsule_half_height;
        let previous_feet = self.location.z - half_height;
        let mut next = self.location;
        next.x += self.velocity.x * delta;

        if self.is_moving_on_ground() {
            match floor.floor_z(next.x, previous_feet + self.config.max_step_height) {
                Some(z) if previous_feet - z <= FLOOR_SNAP_DISTANCE => {
                    next.z = z + half_height;
                    self.location = next;
                }
                _ => {
                    self.location = next;
                    self.set_movement_mode(MovementMode::Falling);
                    self.events.push(MovementEvent::WalkedOffLedge {
                        location: self.location,
                    });
                }
            }
            return;
        }

        let start_vz = self.velocity.z;
        self.velocity.z += self.config.gravity_z * self.state.gravity_scale * delta;
        next.z += (start_vz + self.velocity.z) * 0.5 * delta;

        if self.velocity.z <= 0.0 {
            if let Some(z) = floor.floor_z(next.x, previous_feet + FLOOR_SNAP_DISTANCE) {
                if next.z - half_height <= z {
                    next.z = z + half_height;
                    self.velocity.z = 0.0;
                    self.location = next;
                    self.set_movement_mode(MovementMode::Walking);
                    return;
                }
            }
        }

        self.location = next;

        if self.notify_apex && self.velocity.z <= 0.0 {
            self.notify_apex = false;
            self.notify_jump_apex();
        }
    }

    /// Full per-tick update in the order a character runs it
    pub fn update(&mut self, delta: f32, floor: &dyn FloorQuery) {
        self.check_jump_input(delta);
        self.tick(delta);
        self.integrate(delta, floor);
        self.clear_jump_input(delta);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<MovementEvent> {
        std::mem::take(&mut self.events)
    }
}
