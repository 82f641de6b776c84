//! Trigger filtering

use rogue_core::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Collision object channel of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionChannel {
    WorldStatic,
    Player,
    Enemy,
    Projectile,
    Camera,
}

impl CollisionChannel {
    /// Bit for this channel
    #[inline]
    pub const fn mask(self) -> u32 {
        1 << self as u32
    }
}

/// Filter for what bodies can activate a trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerFilter {
    /// Accepted channels (bitmask of [`CollisionChannel::mask`])
    pub channels: u32,
    /// Specific entities that can trigger (empty = any)
    pub allowed_entities: HashSet<EntityId>,
    /// Specific entities that cannot trigger
    pub blocked_entities: HashSet<EntityId>,
}

impl TriggerFilter {
    /// Accept everything
    pub fn new() -> Self {
        Self {
            channels: u32::MAX,
            allowed_entities: HashSet::new(),
            blocked_entities: HashSet::new(),
        }
    }

    /// Accept only the given channel mask
    pub fn channels(mask: u32) -> Self {
        Self {
            channels: mask,
            ..Self::new()
        }
    }

    /// Only this entity may trigger
    pub fn with_entity(mut self, entity: EntityId) -> Self {
        self.allowed_entities.insert(entity);
        self
    }

    pub fn without_entity(mut self, entity: EntityId) -> Self {
        self.blocked_entities.insert(entity);
        self
    }

    /// Check a body against the filter
    pub fn accepts(&self, entity: EntityId, channel: CollisionChannel) -> bool {
        if self.channels & channel.mask() == 0 {
            return false;
        }
        if self.blocked_entities.contains(&entity) {
            return false;
        }
        self.allowed_entities.is_empty() || self.allowed_entities.contains(&entity)
    }
}

impl Default for TriggerFilter {
    fn default() -> Self {
        Self::new()
    }
}
