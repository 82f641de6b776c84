//! Trigger volume shapes

use rogue_math::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box, stored as centre plus half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxVolume {
    /// World-space centre (or offset from the owner when attached)
    pub center: Vec3,
    /// Half extents (width/2, depth/2, height/2)
    pub half_extents: Vec3,
}

impl BoxVolume {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Box centred on the origin
    pub fn from_half_extents(half_extents: Vec3) -> Self {
        Self::new(Vec3::ZERO, half_extents)
    }

    /// Same extents, moved so its centre sits at `owner + self.center`
    pub fn attached_to(&self, owner: Vec3) -> Self {
        Self::new(owner + self.center, self.half_extents)
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// X of the edge a right-scrolling target enters through
    #[inline]
    pub fn trailing_edge_x(&self) -> f32 {
        self.center.x - self.half_extents.x
    }

    /// Z of the top face
    #[inline]
    pub fn top_z(&self) -> f32 {
        self.center.z + self.half_extents.z
    }

    /// Inclusive point containment
    pub fn contains_point(&self, point: Vec3) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y && d.z <= self.half_extents.z
    }

    /// Inclusive box/box overlap
    pub fn intersects(&self, other: &BoxVolume) -> bool {
        let d = (other.center - self.center).abs();
        let r = self.half_extents + other.half_extents;
        d.x <= r.x && d.y <= r.y && d.z <= r.z
    }
}

impl Default for BoxVolume {
    fn default() -> Self {
        Self::from_half_extents(Vec3::splat(50.0))
    }
}
