//! Frame-rate aware interpolation
//!
//! These follow the usual game-engine contract: the result moves from
//! `current` toward `target` and never passes it, whatever the delta time.

use crate::consts::SMALL_NUMBER;
use crate::vector::Vec3;

/// Exponential approach: covers `delta * speed` of the remaining distance per
/// call (clamped to the whole distance). Non-positive speed snaps to target.
#[inline]
pub fn finterp_to(current: f32, target: f32, delta: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }

    let dist = target - current;
    if dist * dist < SMALL_NUMBER {
        return target;
    }

    let step = (delta * speed).clamp(0.0, 1.0);
    current + dist * step
}

/// Constant-speed approach: moves at most `speed * delta` units per call.
/// Non-positive speed leaves `current` unchanged.
#[inline]
pub fn finterp_constant_to(current: f32, target: f32, delta: f32, speed: f32) -> f32 {
    let dist = target - current;
    if dist * dist < SMALL_NUMBER {
        return target;
    }

    let step = (speed * delta).max(0.0);
    current + dist.clamp(-step, step)
}

/// Vector form of [`finterp_to`]
#[inline]
pub fn vinterp_to(current: Vec3, target: Vec3, delta: f32, speed: f32) -> Vec3 {
    if speed <= 0.0 {
        return target;
    }

    let dist = target - current;
    if dist.length_squared() < SMALL_NUMBER {
        return target;
    }

    let step = (delta * speed).clamp(0.0, 1.0);
    current + dist * step
}

/// Vector form of [`finterp_constant_to`]
#[inline]
pub fn vinterp_constant_to(current: Vec3, target: Vec3, delta: f32, speed: f32) -> Vec3 {
    let dist = target - current;
    let dist_sq = dist.length_squared();
    let step = (speed * delta).max(0.0);

    if dist_sq < SMALL_NUMBER {
        return target;
    }
    if step * step >= dist_sq {
        return target;
    }

    current + dist.normalize_or_zero() * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_finterp_to_never_overshoots() {
        // A huge delta only reaches the target
        assert_eq!(finterp_to(0.0, 10.0, 5.0, 10.0), 10.0);
        let v = finterp_to(0.0, 10.0, 0.1, 5.0);
        assert_relative_eq!(v, 5.0);
    }

    #[test]
    fn test_finterp_to_zero_speed_snaps() {
        assert_eq!(finterp_to(3.0, 10.0, 0.016, 0.0), 10.0);
    }

    #[test]
    fn test_finterp_constant_to() {
        assert_relative_eq!(finterp_constant_to(0.0, 10.0, 0.5, 4.0), 2.0);
        assert_relative_eq!(finterp_constant_to(0.0, -10.0, 0.5, 4.0), -2.0);
        assert_eq!(finterp_constant_to(9.5, 10.0, 1.0, 4.0), 10.0);
        // Zero speed holds position
        assert_eq!(finterp_constant_to(1.0, 10.0, 1.0, 0.0), 1.0);
    }

    #[test]
    fn test_vinterp_to() {
        let a = Vec3::ZERO;
        let b = Vec3::new(10.0, 0.0, 10.0);
        let v = vinterp_to(a, b, 0.05, 10.0);
        assert_relative_eq!(v.x, 5.0);
        assert_relative_eq!(v.z, 5.0);
        assert_eq!(vinterp_to(a, b, 1.0, 10.0), b);
    }

    #[test]
    fn test_vinterp_constant_to() {
        let v = vinterp_constant_to(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 0.5, 4.0);
        assert_relative_eq!(v.z, 2.0);
        let v = vinterp_constant_to(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), 0.5, 4.0);
        assert_eq!(v.z, 1.0);
    }
}
