//! Floor queries used by the integrator

use serde::{Deserialize, Serialize};

/// Answers "where is the ground under this X?"
pub trait FloorQuery {
    /// Top Z of the highest floor under `x` that is at or below `max_z`
    fn floor_z(&self, x: f32, max_z: f32) -> Option<f32>;
}

/// Infinite flat ground
#[derive(Debug, Clone, Copy)]
pub struct FlatFloor {
    pub z: f32,
}

impl FlatFloor {
    pub fn new(z: f32) -> Self {
        Self { z }
    }
}

impl FloorQuery for FlatFloor {
    fn floor_z(&self, _x: f32, max_z: f32) -> Option<f32> {
        (self.z <= max_z).then_some(self.z)
    }
}

/// One horizontal walkable span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorSegment {
    pub min_x: f32,
    pub max_x: f32,
    /// Top surface
    pub z: f32,
}

impl FloorSegment {
    pub fn new(min_x: f32, max_x: f32, z: f32) -> Self {
        Self { min_x, max_x, z }
    }

    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x >= self.min_x && x <= self.max_x
    }
}

/// A level's platforms. Gaps between segments are pits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Platforms {
    pub segments: Vec<FloorSegment>,
}

impl Platforms {
    pub fn new(segments: Vec<FloorSegment>) -> Self {
        Self { segments }
    }
}

impl FloorQuery for Platforms {
    fn floor_z(&self, x: f32, max_z: f32) -> Option<f32> {
        self.segments
            .iter()
            .filter(|s| s.spans(x) && s.z <= max_z)
            .map(|s| s.z)
            .reduce(f32::max)
    }
}
