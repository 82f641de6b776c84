//! Trigger system for processing overlaps

use crate::events::TriggerEvent;
use crate::filter::{CollisionChannel, TriggerFilter};
use crate::volume::BoxVolume;
use rogue_core::{CoreError, EntityId};
use rogue_math::Vec3;
use std::collections::{BTreeSet, HashMap};

/// A body that can overlap triggers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapBody {
    pub id: EntityId,
    /// World-space bounds of the body
    pub bounds: BoxVolume,
    pub channel: CollisionChannel,
}

impl OverlapBody {
    pub fn new(id: EntityId, position: Vec3, half_extents: Vec3, channel: CollisionChannel) -> Self {
        Self {
            id,
            bounds: BoxVolume::new(position, half_extents),
            channel,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.bounds.center
    }
}

/// A registered trigger volume
#[derive(Debug, Clone)]
pub struct Trigger {
    /// Volume relative to its owner
    pub volume: BoxVolume,
    pub filter: TriggerFilter,
    pub enabled: bool,
    overlapping: BTreeSet<EntityId>,
}

impl Trigger {
    pub fn new(volume: BoxVolume) -> Self {
        Self {
            volume,
            filter: TriggerFilter::new(),
            enabled: true,
            overlapping: BTreeSet::new(),
        }
    }

    pub fn with_filter(mut self, filter: TriggerFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Bodies currently inside
    pub fn overlapping(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.overlapping.iter().copied()
    }
}

/// The trigger system that processes all triggers
#[derive(Debug, Default)]
pub struct TriggerSystem {
    triggers: HashMap<EntityId, Trigger>,
}

impl TriggerSystem {
    pub fn new() -> Self {
        Self {
            triggers: HashMap::new(),
        }
    }

    /// Register a trigger, replacing any previous one with this id
    pub fn register(&mut self, id: EntityId, trigger: Trigger) {
        self.triggers.insert(id, trigger);
    }

    pub fn unregister(&mut self, id: EntityId) -> Option<Trigger> {
        self.triggers.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Trigger> {
        self.triggers.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Trigger> {
        self.triggers.get_mut(&id)
    }

    /// Enable or disable a trigger. Overlaps of a disabled trigger end on the
    /// next update.
    pub fn set_enabled(&mut self, id: EntityId, enabled: bool) -> rogue_core::Result<()> {
        let trigger = self.triggers.get_mut(&id).ok_or(CoreError::EntityNotFound(id))?;
        trigger.enabled = enabled;
        Ok(())
    }

    pub fn is_overlapping(&self, trigger: EntityId, other: EntityId) -> bool {
        self.triggers
            .get(&trigger)
            .is_some_and(|t| t.overlapping.contains(&other))
    }

    /// World-space volume of a trigger attached at `owner`
    pub fn world_volume(&self, id: EntityId, owner: Vec3) -> Option<BoxVolume> {
        self.triggers.get(&id).map(|t| t.volume.attached_to(owner))
    }

    /// Update overlaps.
    ///
    /// `owners` gives the current location of each trigger's owner; triggers
    /// with no owner entry keep their previous overlaps untouched. Bodies
    /// missing from `bodies` are treated as gone and end their overlaps.
    pub fn update(&mut self, owners: &[(EntityId, Vec3)], bodies: &[OverlapBody]) -> Vec<TriggerEvent> {
        let mut events = Vec::new();

        for &(trigger_id, owner_pos) in owners {
            let Some(trigger) = self.triggers.get_mut(&trigger_id) else {
                continue;
            };

            let world = trigger.volume.attached_to(owner_pos);
            let mut now_overlapping = BTreeSet::new();

            if trigger.enabled {
                for body in bodies {
                    if body.id == trigger_id || !trigger.filter.accepts(body.id, body.channel) {
                        continue;
                    }
                    if world.intersects(&body.bounds) {
                        now_overlapping.insert(body.id);
                        if !trigger.overlapping.contains(&body.id) {
                            events.push(
                                TriggerEvent::begin(trigger_id, body.id)
                                    .with_trigger_position(world.center)
                                    .with_other_position(body.position()),
                            );
                        }
                    }
                }
            }

            for &gone in trigger.overlapping.difference(&now_overlapping) {
                let position = bodies
                    .iter()
                    .find(|b| b.id == gone)
                    .map_or(Vec3::ZERO, OverlapBody::position);
                events.push(
                    TriggerEvent::end(trigger_id, gone)
                        .with_trigger_position(world.center)
                        .with_other_position(position),
                );
            }

            trigger.overlapping = now_overlapping;
        }

        if !events.is_empty() {
            log::trace!("trigger update produced {} events", events.len());
        }

        events
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(x: f32) -> OverlapBody {
        OverlapBody::new(EntityId::new(10), Vec3::new(x, 0.0, 0.0), Vec3::new(10.0, 10.0, 40.0), CollisionChannel::Player)
    }

    fn system() -> (TriggerSystem, EntityId) {
        let id = EntityId::new(1);
        let mut triggers = TriggerSystem::new();
        triggers.register(
            id,
            Trigger::new(BoxVolume::from_half_extents(Vec3::new(100.0, 50.0, 50.0)))
                .with_filter(TriggerFilter::channels(CollisionChannel::Player.mask())),
        );
        (triggers, id)
    }

    #[test]
    fn test_begin_and_end_once() {
        let (mut triggers, id) = system();
        let owner = [(id, Vec3::ZERO)];

        assert!(triggers.update(&owner, &[player(-300.0)]).is_empty());

        let events = triggers.update(&owner, &[player(-100.0)]);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_begin());
        assert!(triggers.is_overlapping(id, EntityId::new(10)));

        // Staying inside produces nothing
        assert!(triggers.update(&owner, &[player(0.0)]).is_empty());

        let events = triggers.update(&owner, &[player(300.0)]);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_end());
        assert_eq!(events[0].other_position.x, 300.0);
    }

    #[test]
    fn test_moving_owner() {
        let (mut triggers, id) = system();
        let body = [player(500.0)];
        assert!(triggers.update(&[(id, Vec3::ZERO)], &body).is_empty());
        let events = triggers.update(&[(id, Vec3::new(450.0, 0.0, 0.0))], &body);
        assert!(events[0].is_begin());
        assert_eq!(events[0].trigger_position.x, 450.0);
    }

    #[test]
    fn test_filtered_channel_ignored() {
        let (mut triggers, id) = system();
        let enemy = OverlapBody::new(EntityId::new(11), Vec3::ZERO, Vec3::splat(10.0), CollisionChannel::Enemy);
        assert!(triggers.update(&[(id, Vec3::ZERO)], &[enemy]).is_empty());
    }

    #[test]
    fn test_disabled_trigger_ends_overlaps() {
        let (mut triggers, id) = system();
        let owner = [(id, Vec3::ZERO)];
        triggers.update(&owner, &[player(0.0)]);
        triggers.set_enabled(id, false).unwrap();
        let events = triggers.update(&owner, &[player(0.0)]);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_end());
    }

    #[test]
    fn test_enable_unknown_trigger() {
        let (mut triggers, _) = system();
        let missing = EntityId::new(99);
        assert_eq!(triggers.set_enabled(missing, true), Err(CoreError::EntityNotFound(missing)));
    }

    #[test]
    fn test_removed_body_ends_overlap() {
        let (mut triggers, id) = system();
        let owner = [(id, Vec3::ZERO)];
        triggers.update(&owner, &[player(0.0)]);
        let events = triggers.update(&owner, &[]);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_end());
    }
}
