//! Camera configuration

use rogue_math::Vec3;
use rogue_triggers::BoxVolume;
use serde::{Deserialize, Serialize};

/// Which behavior the camera runs each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CameraMode {
    #[default]
    None,
    Follow,
    Fixed,
}

/// Tuning of the camera rig
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Scales the lateral catch-up speed on top of the target's walk speed
    pub lateral_follow_speed_multiplier: f32,
    /// Interp speed of the Z follow
    pub follow_z_speed: f32,
    /// Interp speed toward a fixed point
    pub fixed_point_interpolation_speed: f32,
    /// Movement trigger box, relative to the rig root
    pub movement_box: BoxVolume,
    /// Camera component offset from the rig root
    pub spring_arm_offset: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lateral_follow_speed_multiplier: 1.0,
            follow_z_speed: 3.0,
            fixed_point_interpolation_speed: 2.0,
            movement_box: BoxVolume::new(Vec3::new(200.0, 0.0, 0.0), Vec3::new(200.0, 500.0, 2000.0)),
            spring_arm_offset: Vec3::new(0.0, -1500.0, 150.0),
        }
    }
}

/// Per-world camera settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraWorldSettings {
    /// Worlds without a managed camera (menus) leave this off
    pub spawn_camera: bool,
    pub default_mode: CameraMode,
    /// Below this Z the camera stops following the target down
    pub cutoff_lower_bound_z: f32,
    /// Above this Z the camera stops following the target up
    pub cutoff_upper_bound_z: f32,
}

impl Default for CameraWorldSettings {
    fn default() -> Self {
        Self {
            spawn_camera: true,
            default_mode: CameraMode::Follow,
            cutoff_lower_bound_z: -400.0,
            cutoff_upper_bound_z: 750.0,
        }
    }
}

impl CameraWorldSettings {
    /// Settings for a world that manages its own camera
    pub fn unmanaged() -> Self {
        Self {
            spawn_camera: false,
            default_mode: CameraMode::None,
            ..Default::default()
        }
    }
}
