//! Shared character behavior

use crate::collision::CollisionProfile;
use rogue_combat::{CombatEvent, CombatHooks, CombatState, HitOutcome, LaunchForce};
use rogue_core::EntityId;
use rogue_math::Vec3;
use rogue_movement::{CharacterMovement, FloorQuery, MovementEvent};
use rogue_triggers::{CollisionChannel, OverlapBody};

/// Movement, hit points and collision of one character
#[derive(Debug, Clone)]
pub struct Character {
    id: EntityId,
    pub movement: CharacterMovement,
    pub combat: CombatState,
    pub collision: CollisionProfile,
    /// Died in the air; freeze once on the ground
    freeze_on_landing: bool,
    events: Vec<CombatEvent>,
}

impl Character {
    pub fn new(id: EntityId, movement: CharacterMovement, hit_points: u32, channel: CollisionChannel) -> Self {
        Self {
            id,
            movement,
            combat: CombatState::new(hit_points),
            collision: CollisionProfile::new(channel),
            freeze_on_landing: false,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.combat.is_dead()
    }

    #[inline]
    pub fn location(&self) -> Vec3 {
        self.movement.location()
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.movement.velocity()
    }

    /// Waiting to land before freezing
    pub fn is_freeze_pending(&self) -> bool {
        self.freeze_on_landing
    }

    /// Capsule as an overlap body, or `None` once collision is off
    pub fn overlap_body(&self) -> Option<OverlapBody> {
        if !self.collision.enabled {
            return None;
        }
        let config = self.movement.config();
        Some(OverlapBody::new(
            self.id,
            self.location(),
            Vec3::new(config.capsule_radius, config.capsule_radius, config.capsule_half_height),
            self.collision.object_channel,
        ))
    }

    /// Lose one hit point without running death. Returns what happened.
    pub fn take_hit<H: CombatHooks + ?Sized>(&mut self, hooks: &mut H) -> HitOutcome {
        let outcome = self.combat.hit();
        if outcome == HitOutcome::Ignored {
            return outcome;
        }

        hooks.on_character_hit();
        self.events.push(CombatEvent::Hit {
            entity: self.id,
            remaining: self.combat.current_hit_points(),
        });
        outcome
    }

    /// Hit and, if it was the last point, die
    pub fn hit_character<H: CombatHooks + ?Sized>(&mut self, hooks: &mut H) -> HitOutcome {
        let outcome = self.take_hit(hooks);
        if outcome == HitOutcome::Killed {
            self.character_death(hooks);
        }
        outcome
    }

    /// Replace the current velocity with the launch force. Returns false
    /// when dead.
    pub fn launch_for_hit(&mut self, force: Vec3) -> bool {
        if self.is_dead() {
            return false;
        }
        self.movement.launch(LaunchForce::new(force).velocity(), true, true);
        true
    }

    pub fn hit_character_with_launch_force<H: CombatHooks + ?Sized>(&mut self, force: Vec3, hooks: &mut H) -> HitOutcome {
        if !self.launch_for_hit(force) {
            return HitOutcome::Ignored;
        }
        self.hit_character(hooks)
    }

    /// Kill outright. Does nothing if already dead.
    pub fn kill_character<H: CombatHooks + ?Sized>(&mut self, hooks: &mut H) -> bool {
        if !self.combat.kill() {
            return false;
        }
        self.character_death(hooks);
        true
    }

    /// Death handling. On the ground the corpse freezes now; in the air it
    /// keeps falling and freezes on landing.
    pub fn character_death<H: CombatHooks + ?Sized>(&mut self, hooks: &mut H) {
        self.movement.set_owner_dead(true);

        if self.movement.is_falling() {
            self.freeze_on_landing = true;
        } else {
            self.freeze();
        }

        // No hit animation plays on death, so fire the effect directly
        hooks.on_hit_effect();
        hooks.on_character_death();

        log::debug!("{} died", self.id);
        self.events.push(CombatEvent::Death { entity: self.id });
    }

    fn freeze(&mut self) {
        self.movement.disable_movement();
        self.collision.enabled = false;
        self.freeze_on_landing = false;
    }

    /// Touched down after falling
    pub fn on_landed(&mut self) {
        if self.is_dead() && self.movement.is_moving_on_ground() {
            self.freeze();
        }
    }

    /// Run movement for one tick and react to landing
    pub fn update(&mut self, delta: f32, floor: &dyn FloorQuery) -> Vec<MovementEvent> {
        self.movement.update(delta, floor);
        let events = self.movement.drain_events();
        if events.iter().any(|e| matches!(e, MovementEvent::Landed { .. })) {
            self.on_landed();
        }
        events
    }

    /// Record a combat event raised by a role layer
    pub(crate) fn push_event(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Restore for a restarted level
    pub fn respawn(&mut self, location: Vec3) {
        self.combat.reset();
        self.collision.enabled = true;
        self.freeze_on_landing = false;
        self.movement.set_owner_dead(false);
        self.movement.set_location(location);
        self.movement.set_velocity(Vec3::ZERO);
        self.movement.set_default_movement_mode();
        self.events.clear();
    }
}

/// Anything that takes hits. Roles override the flows they extend.
pub trait Combatant {
    fn character(&self) -> &Character;
    fn character_mut(&mut self) -> &mut Character;

    fn hit_character(&mut self) -> HitOutcome;
    fn hit_character_with_launch_force(&mut self, force: Vec3) -> HitOutcome;
    fn kill_character(&mut self) -> bool;

    fn id(&self) -> EntityId {
        self.character().id()
    }

    fn is_dead(&self) -> bool {
        self.character().is_dead()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rogue_combat::NoHooks;
    use rogue_movement::{FlatFloor, MovementConfig, MovementMode};

    #[derive(Default)]
    struct Counter {
        hits: u32,
        deaths: u32,
        effects: u32,
    }

    impl CombatHooks for Counter {
        fn on_character_hit(&mut self) {
            self.hits += 1;
        }
        fn on_character_death(&mut self) {
            self.deaths += 1;
        }
        fn on_hit_effect(&mut self) {
            self.effects += 1;
        }
    }

    fn character(hit_points: u32) -> Character {
        let movement = CharacterMovement::new(MovementConfig::default(), Vec3::new(0.0, 0.0, 90.0));
        Character::new(EntityId::new(1), movement, hit_points, CollisionChannel::Enemy)
    }

    #[test]
    fn test_single_death_from_hits() {
        let mut c = character(2);
        let mut hooks = Counter::default();
        for _ in 0..5 {
            c.hit_character(&mut hooks);
        }
        assert_eq!(hooks.hits, 2);
        assert_eq!(hooks.deaths, 1);
        assert_eq!(hooks.effects, 1);

        let deaths = c
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, CombatEvent::Death { .. }))
            .count();
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_double_kill_one_death() {
        let mut c = character(5);
        let mut hooks = Counter::default();
        assert!(c.kill_character(&mut hooks));
        assert!(!c.kill_character(&mut hooks));
        assert_eq!(hooks.deaths, 1);
        assert_eq!(c.combat.current_hit_points(), 0);
    }

    #[test]
    fn test_grounded_death_freezes_now() {
        let mut c = character(1);
        c.kill_character(&mut NoHooks);
        assert_eq!(c.movement.mode(), MovementMode::None);
        assert!(!c.collision.enabled);
        assert!(c.overlap_body().is_none());
    }

    #[test]
    fn test_airborne_death_freezes_on_landing() {
        let mut c = character(1);
        let floor = FlatFloor::new(0.0);
        c.movement.launch(Vec3::new(0.0, 0.0, 400.0), true, true);
        c.kill_character(&mut NoHooks);

        assert!(c.is_freeze_pending());
        assert!(c.collision.enabled);

        for _ in 0..240 {
            c.update(1.0 / 60.0, &floor);
        }
        assert_eq!(c.movement.mode(), MovementMode::None);
        assert!(!c.collision.enabled);
        assert!(!c.is_freeze_pending());
    }

    #[test]
    fn test_launch_force_zeroes_y_and_overrides() {
        let mut c = character(3);
        c.movement.set_velocity(Vec3::new(500.0, 0.0, -100.0));
        let outcome = c.hit_character_with_launch_force(Vec3::new(-100.0, 80.0, 200.0), &mut NoHooks);
        assert_eq!(outcome, HitOutcome::Damaged { remaining: 2 });
        assert_eq!(c.velocity(), Vec3::new(-100.0, 0.0, 200.0));
    }

    #[test]
    fn test_dead_ignores_launch() {
        let mut c = character(1);
        c.kill_character(&mut NoHooks);
        let outcome = c.hit_character_with_launch_force(Vec3::new(0.0, 0.0, 500.0), &mut NoHooks);
        assert_eq!(outcome, HitOutcome::Ignored);
        assert_eq!(c.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_respawn() {
        let mut c = character(2);
        c.kill_character(&mut NoHooks);
        c.respawn(Vec3::new(10.0, 0.0, 90.0));
        assert!(!c.is_dead());
        assert!(c.collision.enabled);
        assert!(c.movement.can_attempt_jump());
        assert_eq!(c.movement.mode(), MovementMode::Walking);
    }
}
