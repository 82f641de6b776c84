//! # rogue_math - Gameplay Math
//!
//! Small math layer for a side-scrolling world: a plain `Vec3` (X is the
//! scroll axis, Z is up), frame-rate aware interpolation helpers that never
//! overshoot their target, and the easing curves used to blend gravity.

pub mod easing;
pub mod interp;
pub mod vector;

pub use easing::*;
pub use interp::*;
pub use vector::*;

/// Common math constants
pub mod consts {
    /// Squared distances under this count as "arrived" for interpolation
    pub const SMALL_NUMBER: f32 = 1e-8;
    /// Looser tolerance used for reached-target checks
    pub const KINDA_SMALL_NUMBER: f32 = 1e-4;
    pub const PI: f32 = core::f32::consts::PI;
    pub const FRAC_PI_2: f32 = PI / 2.0;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp value between min and max
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min { min }
    else if value > max { max }
    else { value }
}

/// Approximate float equality with an absolute tolerance
#[inline]
pub fn is_nearly_equal(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

pub mod prelude {
    pub use crate::consts;
    pub use crate::easing::{ease, EasingCurve, EasingFunc};
    pub use crate::interp::{finterp_constant_to, finterp_to, vinterp_constant_to, vinterp_to};
    pub use crate::vector::Vec3;
    pub use crate::{clamp, is_nearly_equal, lerp};
}
