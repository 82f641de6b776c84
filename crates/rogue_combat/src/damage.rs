//! Launch forces

use rogue_math::Vec3;
use serde::{Deserialize, Serialize};

/// Knockback velocity applied with a hit.
///
/// Characters never leave the X/Z plane, so the Y component is always
/// dropped. Non-finite input collapses to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LaunchForce(Vec3);

impl LaunchForce {
    pub fn new(force: Vec3) -> Self {
        if !force.is_finite() {
            log::warn!("discarding non-finite launch force {:?}", force);
            return Self(Vec3::ZERO);
        }
        Self(force.with_y(0.0))
    }

    /// Force along `direction` (normalised, flattened) scaled by `strength`
    pub fn along(direction: Vec3, strength: f32) -> Self {
        Self::new(direction.with_y(0.0).normalize_or_zero() * strength)
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.0
    }
}

impl From<Vec3> for LaunchForce {
    fn from(force: Vec3) -> Self {
        Self::new(force)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_is_zeroed() {
        let force = LaunchForce::new(Vec3::new(100.0, 75.0, 300.0));
        assert_eq!(force.velocity(), Vec3::new(100.0, 0.0, 300.0));
    }

    #[test]
    fn test_non_finite_is_zero() {
        let force = LaunchForce::new(Vec3::new(f32::NAN, 0.0, 1.0));
        assert_eq!(force.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_along_direction() {
        let force = LaunchForce::along(Vec3::new(3.0, 9.0, 4.0), 10.0);
        assert!((force.velocity().x - 6.0).abs() < 1e-4);
        assert!((force.velocity().z - 8.0).abs() < 1e-4);
        assert_eq!(force.velocity().y, 0.0);
    }
}
