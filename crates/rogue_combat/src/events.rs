//! Combat events

use rogue_core::EntityId;

/// Events emitted by characters as they take hits and die
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    /// A hit landed
    Hit { entity: EntityId, remaining: u32 },
    /// The character died. Emitted once per character life.
    Death { entity: EntityId },
    /// Hit points were granted
    HitPointsAdded { entity: EntityId, added: u32, total: u32 },
}

impl CombatEvent {
    pub fn entity(&self) -> EntityId {
        match self {
            Self::Hit { entity, .. } | Self::Death { entity } | Self::HitPointsAdded { entity, .. } => *entity,
        }
    }
}
