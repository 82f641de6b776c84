//! Movement state

/// Movement mode of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovementMode {
    /// On the ground
    #[default]
    Walking,
    /// In the air, rising or falling
    Falling,
    /// Movement disabled
    None,
}

/// Per-character jump and fall state
#[derive(Debug, Clone, PartialEq)]
pub struct MovementState {
    /// Gravity scale captured at creation
    pub default_gravity_scale: f32,
    pub is_airborne: bool,
    /// Seconds since leaving the ground
    pub airborne_time: f32,
    /// Seconds since the apex; never exceeds `airborne_time`
    pub fall_time: f32,
    /// Current gravity multiplier
    pub gravity_scale: f32,
    /// Falling gravity blend is running
    pub apply_falling_gravity: bool,
    /// A jump input is being processed
    pub jump_input_active: bool,
    /// Repeated jump calls while held must not reset fall state
    pub ignore_initial_jump_state_reset: bool,
    /// Lets an enemy bounce pass the jump checks
    pub performing_enemy_jump: bool,
}

impl MovementState {
    pub fn new(default_gravity_scale: f32) -> Self {
        Self {
            default_gravity_scale,
            is_airborne: false,
            airborne_time: 0.0,
            fall_time: 0.0,
            gravity_scale: default_gravity_scale,
            apply_falling_gravity: false,
            jump_input_active: false,
            ignore_initial_jump_state_reset: false,
            performing_enemy_jump: false,
        }
    }

    /// Clear the fall blend and restore default gravity
    pub(crate) fn reset_fall(&mut self) {
        self.fall_time = 0.0;
        self.apply_falling_gravity = false;
        self.gravity_scale = self.default_gravity_scale;
    }
}

impl Default for MovementState {
    fn default() -> Self {
        Self::new(1.0)
    }
}
