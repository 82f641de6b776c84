//! Rogue Movement - Character Movement Core
//!
//! Platformer-feel movement layered on a simple kinematic integrator.
//!
//! # Features
//!
//! - Coyote time: a jump pressed shortly after walking off a ledge still
//!   counts as the grounded jump
//! - Variable jump height: holding the button keeps the take-off velocity
//!   for up to the jump's max hold time; releasing early raises gravity
//! - Apex falling gravity: once the character starts descending, gravity
//!   eases from a begin scale to a max scale over a blend time
//! - Multi-jump bookkeeping with the hold-time aware eligibility policy
//! - Enemy bounce jumps that ignore the jump-count ceiling
//!
//! # Architecture
//!
//! ```text
//! per tick:  check_jump_input ─► tick (timers, gravity easing) ─► integrate ─► clear_jump_input
//!                 │                                                   │
//!            can_jump ─► do_jump                         mode changes / apex / landing
//!                                                                     │
//!                                                              MovementEvent queue
//! ```
//!
//! # Example
//!
//! ```ignore
//! use rogue_movement::prelude::*;
//!
//! let mut movement = CharacterMovement::new(MovementConfig::default(), Vec3::new(0.0, 0.0, 90.0));
//! let floor = FlatFloor::new(0.0);
//!
//! movement.jump();
//! movement.update(1.0 / 60.0, &floor);
//! for event in movement.drain_events() {
//!     log::debug!("{:?}", event);
//! }
//! ```

pub mod component;
pub mod config;
pub mod error;
pub mod events;
pub mod floor;
pub mod jump;
pub mod state;

pub mod prelude {
    pub use crate::component::CharacterMovement;
    pub use crate::config::MovementConfig;
    pub use crate::error::{MovementError, Result};
    pub use crate::events::MovementEvent;
    pub use crate::floor::{FlatFloor, FloorQuery, FloorSegment, Platforms};
    pub use crate::jump::{can_jump_internal, JumpState};
    pub use crate::state::{MovementMode, MovementState};
    pub use rogue_math::Vec3;
}

pub use prelude::*;
