//! Hit points and death

use serde::{Deserialize, Serialize};

/// Result of a single hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// The character was already dead
    Ignored,
    /// A point was lost and the character lives
    Damaged { remaining: u32 },
    /// This hit took the last point
    Killed,
}

/// Hit point state of a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    /// Hit points at spawn
    pub hit_points: u32,
    /// Points left. Zero means dead.
    current_hit_points: u32,
}

impl CombatState {
    /// Create a new combat state at full hit points
    pub fn new(hit_points: u32) -> Self {
        Self {
            hit_points,
            current_hit_points: hit_points,
        }
    }

    #[inline]
    pub fn current_hit_points(&self) -> u32 {
        self.current_hit_points
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.current_hit_points == 0
    }

    /// Take one hit
    pub fn hit(&mut self) -> HitOutcome {
        if self.is_dead() {
            return HitOutcome::Ignored;
        }

        self.current_hit_points = self.current_hit_points.saturating_sub(1);

        if self.is_dead() {
            HitOutcome::Killed
        } else {
            HitOutcome::Damaged {
                remaining: self.current_hit_points,
            }
        }
    }

    /// Drop straight to zero. Returns true only if this call caused the death.
    pub fn kill(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        self.current_hit_points = 0;
        true
    }

    /// Add hit points to a living character. Returns the new total, or
    /// `None` when the character is dead.
    pub fn add_hit_points(&mut self, points: u32) -> Option<u32> {
        if self.is_dead() {
            return None;
        }
        self.current_hit_points = self.current_hit_points.saturating_add(points);
        Some(self.current_hit_points)
    }

    /// Back to full hit points for a restarted level
    pub fn reset(&mut self) {
        self.current_hit_points = self.hit_points;
    }
}

impl Default for CombatState {
    fn default() -> Self {
        Self::new(1)
    }
}
