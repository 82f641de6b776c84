//! Movement events

use crate::state::MovementMode;
use rogue_math::Vec3;

/// Notifications produced while moving, drained by the owning character
#[derive(Debug, Clone, PartialEq)]
pub enum MovementEvent {
    /// Mode changed from `previous` to `current`
    ModeChanged {
        previous: MovementMode,
        current: MovementMode,
    },
    /// A new jump started (not a held continuation)
    Jumped { jump_count: u32 },
    /// Vertical velocity crossed zero while falling
    Apex { location: Vec3 },
    /// Touched down after falling
    Landed { location: Vec3 },
    /// Started falling without jumping
    WalkedOffLedge { location: Vec3 },
    /// Launched by an external force
    Launched { velocity: Vec3 },
}
