//! Trigger events

use rogue_core::EntityId;
use rogue_math::Vec3;

/// Type of trigger event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerEventType {
    /// Body started overlapping the volume
    Begin,
    /// Body stopped overlapping the volume
    End,
}

/// A trigger event
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEvent {
    pub event_type: TriggerEventType,
    /// The trigger entity
    pub trigger_entity: EntityId,
    /// The body that caused the event
    pub other_entity: EntityId,
    /// World centre of the volume at the time of the event
    pub trigger_position: Vec3,
    /// Position of the other body at the time of the event
    pub other_position: Vec3,
}

impl TriggerEvent {
    pub fn begin(trigger: EntityId, other: EntityId) -> Self {
        Self {
            event_type: TriggerEventType::Begin,
            trigger_entity: trigger,
            other_entity: other,
            trigger_position: Vec3::ZERO,
            other_position: Vec3::ZERO,
        }
    }

    pub fn end(trigger: EntityId, other: EntityId) -> Self {
        Self {
            event_type: TriggerEventType::End,
            ..Self::begin(trigger, other)
        }
    }

    pub fn with_trigger_position(mut self, pos: Vec3) -> Self {
        self.trigger_position = pos;
        self
    }

    pub fn with_other_position(mut self, pos: Vec3) -> Self {
        self.other_position = pos;
        self
    }

    #[inline]
    pub fn is_begin(&self) -> bool {
        self.event_type == TriggerEventType::Begin
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.event_type == TriggerEventType::End
    }
}
