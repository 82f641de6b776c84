//! Rogue Camera - Side-Scrolling Camera Rig
//!
//! A camera that trails the player along the scroll axis, or glides to a
//! fixed point for set pieces.
//!
//! # Features
//!
//! - `Follow` mode: X catch-up speed ramps with how deep the player is in
//!   the rig's movement box, scaled by the player's own top speed
//! - Z tracking that only settles downward between landings and clamps to
//!   world cutoff bounds
//! - `Fixed` mode: eases to a world point and stops once it arrives
//! - Graceful fallback when the follow target goes away
//! - [`CameraSubsystem`] owning the rig for a world session
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               CameraSubsystem                 │
//! │  owner ──► CameraRig ──► movement box trigger │
//! └──────────────────────┬───────────────────────┘
//!                        │ tick (post-physics)
//!        ┌───────────────┼────────────────┐
//!        ▼               ▼                ▼
//!      None           Follow            Fixed
//!                 X: constant-to     vinterp_to
//!                 Y: back to default
//!                 Z: interp-to clamped target
//! ```
//!
//! # Example
//!
//! ```ignore
//! use rogue_camera::prelude::*;
//!
//! let mut cameras = CameraSubsystem::new(CameraConfig::default());
//! cameras.on_world_begin_play(&world_settings, Some((player_id, spawn)));
//!
//! // After movement has run for the frame
//! cameras.tick(dt, Some(&FollowTarget::new(player_body, max_walk_speed)));
//! ```

pub mod config;
pub mod rig;
pub mod subsystem;

pub mod prelude {
    pub use crate::config::{CameraConfig, CameraMode, CameraWorldSettings};
    pub use crate::rig::{CameraRig, CameraState, FollowTarget};
    pub use crate::subsystem::CameraSubsystem;
    pub use rogue_math::Vec3;
}

pub use prelude::*;
