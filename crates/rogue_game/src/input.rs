//! Player input actions

use serde::{Deserialize, Serialize};

/// Input queued for the next tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputAction {
    /// Horizontal axis in `-1.0..=1.0`
    Move(f32),
    JumpPressed,
    JumpReleased,
    /// Pause a running level, or resume a paused one
    TogglePause,
}

impl InputAction {
    /// Gameplay input is dropped outside a running level
    pub fn is_gameplay(&self) -> bool {
        !matches!(self, Self::TogglePause)
    }
}
