//! Jump bookkeeping and the jump eligibility policy

/// Character-side jump bookkeeping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JumpState {
    /// Jump button is held and still inside its hold window
    pub pressed_jump: bool,
    /// The previous jump check performed a jump
    pub was_jumping: bool,
    /// Jumps performed since the last landing
    pub jump_current_count: u32,
    /// `jump_current_count` at the start of this tick's jump check
    pub jump_current_count_pre_jump: u32,
    pub jump_max_count: u32,
    /// Seconds a held jump keeps applying take-off velocity
    pub jump_max_hold_time: f32,
    /// Seconds the jump button has been held
    pub jump_key_hold_time: f32,
    /// Hold force left for the current jump
    pub jump_force_time_remaining: f32,
}

impl JumpState {
    pub fn new(jump_max_count: u32, jump_max_hold_time: f32) -> Self {
        Self {
            jump_max_count,
            jump_max_hold_time,
            ..Default::default()
        }
    }

    /// Button pressed
    pub fn press(&mut self) {
        self.pressed_jump = true;
        self.jump_key_hold_time = 0.0;
    }

    /// Clear the jump. The count only resets when not falling.
    pub fn reset(&mut self, is_falling: bool) {
        self.pressed_jump = false;
        self.was_jumping = false;
        self.jump_key_hold_time = 0.0;
        self.jump_force_time_remaining = 0.0;

        if !is_falling {
            self.jump_current_count = 0;
            self.jump_current_count_pre_jump = 0;
        }
    }

    /// End-of-tick hold accounting
    pub fn clear_input(&mut self, delta: f32) {
        if self.pressed_jump {
            self.jump_key_hold_time += delta;

            // Still held, but the hold window is over
            if self.jump_key_hold_time >= self.jump_max_hold_time {
                self.pressed_jump = false;
            }
        } else {
            self.jump_force_time_remaining = 0.0;
            self.was_jumping = false;
        }
    }
}

/// Whether the character may jump this tick.
///
/// A fresh jump (or any jump when holds are disabled) needs a free jump
/// slot. A continuing jump also needs the button held inside the hold
/// window, and may use the last slot it already occupies.
pub fn can_jump_internal(jump: &JumpState, is_dead: bool) -> bool {
    if is_dead {
        return false;
    }

    if !jump.was_jumping || jump.jump_max_hold_time <= 0.0 {
        jump.jump_current_count < jump.jump_max_count
    } else {
        let jump_key_hold = jump.pressed_jump && jump.jump_key_hold_time < jump.jump_max_hold_time;
        jump_key_hold
            && (jump.jump_current_count < jump.jump_max_count
                || (jump.was_jumping && jump.jump_current_count == jump.jump_max_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_cannot_jump() {
        let jump = JumpState::new(2, 0.2);
        assert!(!can_jump_internal(&jump, true));
        assert!(can_jump_internal(&jump, false));
    }

    #[test]
    fn test_fresh_jump_needs_free_slot() {
        let mut jump = JumpState::new(2, 0.2);
        jump.jump_current_count = 2;
        assert!(!can_jump_internal(&jump, false));
        jump.jump_current_count = 1;
        assert!(can_jump_internal(&jump, false));
    }

    #[test]
    fn test_held_jump_may_use_last_slot() {
        let mut jump = JumpState::new(2, 0.2);
        jump.press();
        jump.was_jumping = true;
        jump.jump_current_count = 2;
        jump.jump_key_hold_time = 0.1;
        assert!(can_jump_internal(&jump, false));

        // Hold window over
        jump.jump_key_hold_time = 0.2;
        assert!(!can_jump_internal(&jump, false));

        // Released
        jump.jump_key_hold_time = 0.1;
        jump.pressed_jump = false;
        assert!(!can_jump_internal(&jump, false));
    }

    #[test]
    fn test_no_hold_time_uses_count_only() {
        let mut jump = JumpState::new(1, 0.0);
        jump.was_jumping = true;
        jump.jump_current_count = 1;
        assert!(!can_jump_internal(&jump, false));
    }

    #[test]
    fn test_clear_input_ends_hold_window() {
        let mut jump = JumpState::new(2, 0.2);
        jump.press();
        jump.clear_input(0.1);
        assert!(jump.pressed_jump);
        jump.clear_input(0.1);
        assert!(!jump.pressed_jump);

        jump.was_jumping = true;
        jump.jump_force_time_remaining = 0.1;
        jump.clear_input(0.1);
        assert!(!jump.was_jumping);
        assert_eq!(jump.jump_force_time_remaining, 0.0);
    }

    #[test]
    fn test_reset_keeps_count_while_falling() {
        let mut jump = JumpState::new(2, 0.2);
        jump.jump_current_count = 1;
        jump.reset(true);
        assert_eq!(jump.jump_current_count, 1);
        jump.reset(false);
        assert_eq!(jump.jump_current_count, 0);
    }
}
