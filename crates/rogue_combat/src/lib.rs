//! Rogue Combat - Hit Points and Death
//!
//! Integer hit points where every hit costs exactly one point.
//!
//! # Features
//!
//! - Hit points that only go down through hits and never below zero
//! - Death that happens exactly once, whether from a hit or a kill
//! - Launch forces constrained to the side-scroller plane
//! - Hook trait for presentation reactions (animations, effects)
//!
//! # Example
//!
//! ```ignore
//! use rogue_combat::prelude::*;
//!
//! let mut combat = CombatState::new(3);
//! match combat.hit() {
//!     HitOutcome::Killed => hooks.on_character_death(),
//!     HitOutcome::Damaged { remaining } => log::debug!("{} left", remaining),
//!     HitOutcome::Ignored => {}
//! }
//! ```

pub mod damage;
pub mod events;
pub mod health;
pub mod hooks;

pub mod prelude {
    pub use crate::damage::LaunchForce;
    pub use crate::events::CombatEvent;
    pub use crate::health::{CombatState, HitOutcome};
    pub use crate::hooks::{CombatHooks, NoHooks};
}

pub use prelude::*;
