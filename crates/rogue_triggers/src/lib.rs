//! Rogue Triggers - Trigger Volume System
//!
//! Overlap detection for the side-scroller's volumes: the camera's movement
//! box, enemy hit/hurt boxes, patrol and attack zones, kill planes and level
//! exits.
//!
//! # Features
//!
//! - Axis-aligned box volumes, optionally attached to a moving owner
//! - Begin/End overlap events, each emitted exactly once per transition
//! - Collision-channel and entity filtering
//!
//! # Example
//!
//! ```ignore
//! use rogue_triggers::prelude::*;
//!
//! let mut triggers = TriggerSystem::new();
//! triggers.register(box_id, Trigger::new(BoxVolume::from_half_extents(Vec3::new(100.0, 50.0, 50.0)))
//!     .with_filter(TriggerFilter::channels(CollisionChannel::Player.mask())));
//!
//! for event in triggers.update(&[(box_id, camera_location)], &bodies) {
//!     if event.is_begin() { /* ... */ }
//! }
//! ```

pub mod events;
pub mod filter;
pub mod system;
pub mod volume;

pub mod prelude {
    pub use crate::events::{TriggerEvent, TriggerEventType};
    pub use crate::filter::{CollisionChannel, TriggerFilter};
    pub use crate::system::{OverlapBody, Trigger, TriggerSystem};
    pub use crate::volume::BoxVolume;
}

pub use prelude::*;
