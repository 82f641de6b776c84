//! Movement configuration

use crate::error::{MovementError, Result};
use rogue_math::{EasingCurve, EasingFunc};
use serde::{Deserialize, Serialize};

/// Character movement tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Height of the jump apex at default gravity without hold extension
    pub apex_jump_height: f32,

    /// Grace window after walking off a ledge in which a jump still counts
    /// as the grounded jump
    pub coyote_time: f32,

    /// Gravity multiplier while ascending after the jump input was released
    pub early_release_gravity_multiplier: f32,

    /// Gravity scale applied at the apex
    pub fall_begin_gravity_scale: f32,

    /// Gravity scale reached after the blend time
    pub fall_max_gravity_scale: f32,

    /// Seconds to blend from begin to max falling gravity
    pub fall_gravity_blend_time: f32,

    /// Curve used for the falling gravity blend
    pub gravity_easing: EasingCurve,

    /// World gravity along Z (negative is down)
    pub gravity_z: f32,

    /// Gravity scale the character starts with
    pub gravity_scale: f32,

    /// Maximum jumps before landing
    pub jump_max_count: u32,

    /// How long a held jump keeps its take-off velocity
    pub jump_max_hold_time: f32,

    pub max_walk_speed: f32,
    pub max_acceleration: f32,
    pub braking_deceleration: f32,

    /// Fraction of lateral acceleration available in the air
    pub air_control: f32,

    /// Collision capsule half height; locations are capsule centres
    pub capsule_half_height: f32,
    pub capsule_radius: f32,

    /// Highest ledge the character walks up without being blocked
    pub max_step_height: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            apex_jump_height: 500.0,
            coyote_time: 0.1,
            early_release_gravity_multiplier: 2.0,
            fall_begin_gravity_scale: 2.5,
            fall_max_gravity_scale: 5.0,
            fall_gravity_blend_time: 0.25,
            gravity_easing: EasingCurve::new(EasingFunc::Linear)
                .with_blend_exp(2.0)
                .with_steps(2),
            gravity_z: -980.0,
            gravity_scale: 1.0,
            jump_max_count: 2,
            jump_max_hold_time: 0.2,
            max_walk_speed: 600.0,
            max_acceleration: 2048.0,
            braking_deceleration: 2048.0,
            air_control: 0.8,
            capsule_half_height: 90.0,
            capsule_radius: 40.0,
            max_step_height: 45.0,
        }
    }
}

impl MovementConfig {
    /// Tuning for enemies: a single jump, no hold extension
    pub fn enemy() -> Self {
        Self {
            jump_max_count: 1,
            jump_max_hold_time: 0.0,
            max_walk_speed: 200.0,
            ..Default::default()
        }
    }

    /// Take-off velocity that reaches `apex_jump_height` at the default
    /// gravity scale
    pub fn jump_z_velocity(&self) -> f32 {
        (2.0 * self.gravity_z.abs() * self.gravity_scale * self.apex_jump_height).sqrt()
    }

    /// Check the ranges the editor would enforce
    pub fn validate(&self) -> Result<()> {
        fn at_least(field: &'static str, value: f32, min: f32) -> Result<()> {
            if value.is_finite() && value >= min {
                Ok(())
            } else {
                Err(MovementError::InvalidConfig {
                    field,
                    value,
                    reason: "below minimum",
                })
            }
        }

        at_least("apex_jump_height", self.apex_jump_height, 1.0)?;
        at_least("coyote_time", self.coyote_time, 0.0)?;
        at_least("early_release_gravity_multiplier", self.early_release_gravity_multiplier, 1.0)?;
        at_least("fall_begin_gravity_scale", self.fall_begin_gravity_scale, 1.0)?;
        at_least("fall_max_gravity_scale", self.fall_max_gravity_scale, 1.0)?;
        at_least("fall_gravity_blend_time", self.fall_gravity_blend_time, 0.1)?;
        at_least("gravity_easing.blend_exp", self.gravity_easing.blend_exp, 0.0)?;
        at_least("jump_max_hold_time", self.jump_max_hold_time, 0.0)?;
        at_least("max_walk_speed", self.max_walk_speed, 0.0)?;
        at_least("max_acceleration", self.max_acceleration, 0.0)?;
        at_least("capsule_half_height", self.capsule_half_height, 1.0)?;

        if self.gravity_z >= 0.0 || !self.gravity_z.is_finite() {
            return Err(MovementError::InvalidConfig {
                field: "gravity_z",
                value: self.gravity_z,
                reason: "gravity must point down",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_valid() {
        assert!(MovementConfig::default().validate().is_ok());
        assert!(MovementConfig::enemy().validate().is_ok());
    }

    #[test]
    fn test_jump_velocity_from_apex() {
        let config = MovementConfig::default();
        assert_relative_eq!(config.jump_z_velocity(), (2.0f32 * 980.0 * 500.0).sqrt());
    }

    #[test]
    fn test_rejects_short_blend() {
        let config = MovementConfig {
            fall_gravity_blend_time: 0.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MovementError::InvalidConfig { field: "fall_gravity_blend_time", .. }));
    }

    #[test]
    fn test_partial_toml_style_config_uses_defaults() {
        let config: MovementConfig = serde_json::from_str(r#"{ "coyote_time": 0.2 }"#).unwrap();
        assert_relative_eq!(config.coyote_time, 0.2);
        assert_relative_eq!(config.apex_jump_height, 500.0);
    }
}
