//! Enemy character
//!
//! Enemies stand still until the player enters their patrol volume, walk a
//! patrol route while the player is nearby, and speed up inside their attack
//! volume. Touching the hit box hurts the player; landing on the hurt box
//! from above hurts the enemy and bounces the player.

use crate::character::{Character, Combatant};
use crate::hooks::EnemyHooks;
use crate::player::Player;
use rogue_combat::{HitOutcome, NoHooks};
use rogue_core::{EntityId, TimerManager};
use rogue_math::Vec3;
use rogue_movement::{CharacterMovement, FloorQuery, MovementConfig, MovementEvent, MovementMode};
use rogue_triggers::{BoxVolume, CollisionChannel};
use serde::{Deserialize, Serialize};

/// Enemy tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub hit_points: u32,
    /// 0 disables hit stun
    pub hit_stun_duration: f32,
    /// Knockback applied to the player on touch (0 = plain hit)
    pub touch_force: f32,
    /// Horizontal recoil given to a player that stomps this enemy
    pub stomp_recoil: f32,
    /// Walk speed multiplier while the player is in the attack volume
    pub attack_speed_multiplier: f32,
    /// Patrol point counts as reached within this X distance
    pub patrol_acceptance_radius: f32,
    /// Damaging box, relative to the capsule centre
    pub hit_box: BoxVolume,
    /// Stomp box on top of the enemy, relative to the capsule centre
    pub hurt_box: BoxVolume,
    pub movement: MovementConfig,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            hit_points: 1,
            hit_stun_duration: 0.5,
            touch_force: 500.0,
            stomp_recoil: 300.0,
            attack_speed_multiplier: 4.0,
            patrol_acceptance_radius: 10.0,
            hit_box: BoxVolume::from_half_extents(Vec3::new(45.0, 45.0, 80.0)),
            hurt_box: BoxVolume::new(Vec3::new(0.0, 0.0, 95.0), Vec3::new(40.0, 40.0, 10.0)),
            movement: MovementConfig::enemy(),
        }
    }
}

impl EnemyConfig {
    /// Heavy enemy used as a level boss
    pub fn boss() -> Self {
        Self {
            hit_points: 5,
            hit_stun_duration: 1.0,
            touch_force: 800.0,
            attack_speed_multiplier: 2.0,
            ..Default::default()
        }
    }
}

/// Enemy timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyTimer {
    HitStun,
}

/// Ordered patrol points, walked in a loop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatrolRoute {
    pub points: Vec<Vec3>,
    #[serde(skip)]
    current: usize,
}

impl PatrolRoute {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points, current: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_point(&self) -> Option<Vec3> {
        self.points.get(self.current).copied()
    }

    /// Advance, rolling over to the first point after the last
    pub fn increment(&mut self) {
        if self.points.is_empty() {
            return;
        }
        self.current = if self.current + 1 >= self.points.len() { 0 } else { self.current + 1 };
    }
}

/// What the enemy is hooked up to in the level
#[derive(Debug, Clone, Default)]
pub struct EnemyInit {
    pub patrol: Option<PatrolRoute>,
    pub patrol_trigger: Option<EntityId>,
    pub attack_trigger: Option<EntityId>,
}

/// An enemy character
pub struct Enemy {
    character: Character,
    config: EnemyConfig,
    hooks: Box<dyn EnemyHooks + Send>,
    timers: TimerManager<EnemyTimer>,
    patrol: Option<PatrolRoute>,
    patrol_trigger: Option<EntityId>,
    attack_trigger: Option<EntityId>,
    stunned: bool,
    attacking: bool,
}

impl Enemy {
    pub fn new(id: EntityId, config: EnemyConfig, spawn: Vec3) -> Self {
        let movement = CharacterMovement::new(config.movement.clone(), spawn);
        Self {
            character: Character::new(id, movement, config.hit_points, CollisionChannel::Enemy),
            config,
            hooks: Box::new(NoHooks),
            timers: TimerManager::new(),
            patrol: None,
            patrol_trigger: None,
            attack_trigger: None,
            stunned: false,
            attacking: false,
        }
    }

    pub fn with_hooks(mut self, hooks: impl EnemyHooks + Send + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }

    pub fn location(&self) -> Vec3 {
        self.character.location()
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn patrol_trigger(&self) -> Option<EntityId> {
        self.patrol_trigger
    }

    pub fn attack_trigger(&self) -> Option<EntityId> {
        self.attack_trigger
    }

    pub fn patrol(&self) -> Option<&PatrolRoute> {
        self.patrol.as_ref()
    }

    /// Hit box in world space
    pub fn hit_box_world(&self) -> BoxVolume {
        self.config.hit_box.attached_to(self.location())
    }

    /// Hurt box in world space
    pub fn hurt_box_world(&self) -> BoxVolume {
        self.config.hurt_box.attached_to(self.location())
    }

    /// Wire up the patrol route and trigger volumes
    pub fn init(&mut self, init: EnemyInit) {
        self.patrol = init.patrol.filter(|route| !route.is_empty());
        if self.patrol.is_some() {
            self.hooks.on_setup_patrol();
        }
        self.patrol_trigger = init.patrol_trigger;
        self.attack_trigger = init.attack_trigger;
    }

    /// Start inert. A player already inside a volume at level start gets no
    /// begin-overlap, so pass that in here.
    pub fn begin_play(&mut self, player_in_attack_volume: bool, player_in_patrol_volume: bool) {
        self.character.movement.disable_movement();

        if player_in_attack_volume && self.attack_trigger.is_some() {
            self.on_begin_attack_trigger_overlap(CollisionChannel::Player);
        }
        if player_in_patrol_volume && self.patrol_trigger.is_some() {
            self.on_begin_patrol_trigger_overlap(CollisionChannel::Player);
        }
    }

    // ------------------------------------------------------------------
    // Combat
    // ------------------------------------------------------------------

    fn stop_hit_stun(&mut self) {
        self.stunned = false;
        self.hooks.on_stop_hit_stun();
    }

    /// The player touched the hit box
    pub fn hit_begin_overlap(&mut self, player: &mut Player, force: f32) -> HitOutcome {
        if self.character.is_dead() || player.is_dead() {
            return HitOutcome::Ignored;
        }

        if force <= 0.0 {
            player.hit_character()
        } else {
            let direction = (player.location() - self.location()).normalize_or_zero();
            player.hit_character_with_launch_force(direction * force)
        }
    }

    /// The player entered the hurt box. A valid stomp recoils the player,
    /// bounces them and hurts this enemy.
    pub fn hurt_begin_overlap(&mut self, player: &mut Player, hurt_box: &BoxVolume, recoil: f32) -> bool {
        if self.character.is_dead() {
            return false;
        }

        if !player.is_enemy_jump_valid(hurt_box) {
            return false;
        }

        if recoil > 0.0 {
            let velocity = player.character().velocity();
            let force = Vec3::new(velocity.normalize_or_zero().x * -recoil, 0.0, -velocity.z);
            player.launch_character(force, true, true);
        }

        player.jump_from_enemy_hurt_box();

        self.hit_character();
        true
    }

    // ------------------------------------------------------------------
    // Patrol
    // ------------------------------------------------------------------

    /// Advance the route and return the new target, `None` for enemies
    /// without a route
    pub fn get_next_patrol_location(&mut self) -> Option<Vec3> {
        let patrol = self.patrol.as_mut()?;
        patrol.increment();
        patrol.current_point()
    }

    pub fn increment_patrol_point(&mut self) {
        if let Some(patrol) = self.patrol.as_mut() {
            patrol.increment();
        }
    }

    pub fn set_movement_speed_multiplier(&mut self, multiplier: f32) {
        self.character.movement.set_movement_speed_multiplier(multiplier);
    }

    pub fn revert_movement_speed_multiplier(&mut self) {
        self.character.movement.revert_movement_speed_multiplier();
    }

    pub fn movement_speed_multiplier(&self) -> f32 {
        self.character.movement.movement_speed_multiplier()
    }

    // ------------------------------------------------------------------
    // Volumes
    // ------------------------------------------------------------------

    pub fn on_begin_patrol_trigger_overlap(&mut self, other: CollisionChannel) {
        if other != CollisionChannel::Player || self.character.is_dead() {
            return;
        }
        self.character.movement.set_default_movement_mode();
        self.hooks.on_player_entered_patrol_volume();
    }

    pub fn on_end_patrol_trigger_overlap(&mut self, other: CollisionChannel) {
        if other != CollisionChannel::Player || self.character.is_dead() {
            return;
        }
        // Stay on course until landing if the player leaves mid-jump
        if self.character.movement.mode() != MovementMode::Falling {
            self.character.movement.disable_movement();
        }
        self.character.movement.set_input(0.0);
        self.hooks.on_player_exited_patrol_volume();
    }

    pub fn on_begin_attack_trigger_overlap(&mut self, other: CollisionChannel) {
        if other != CollisionChannel::Player {
            return;
        }
        self.attacking = true;
        self.set_movement_speed_multiplier(self.config.attack_speed_multiplier);
        self.hooks.on_player_entered_attack_volume();
    }

    pub fn on_end_attack_trigger_overlap(&mut self, other: CollisionChannel) {
        if other != CollisionChannel::Player {
            return;
        }
        self.attacking = false;
        self.revert_movement_speed_multiplier();
        self.hooks.on_player_exited_attack_volume();
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Steer toward the player while attacking, otherwise along the route
    fn steer(&mut self, player_location: Option<Vec3>) {
        if self.stunned || self.character.is_dead() || !self.character.movement.is_moving_on_ground() {
            self.character.movement.set_input(0.0);
            return;
        }

        let here = self.location();
        let radius = self.config.patrol_acceptance_radius;
        let target = match (self.attacking, player_location) {
            (true, Some(player)) => Some(player),
            _ => {
                let current = self.patrol.as_ref().and_then(PatrolRoute::current_point);
                match current {
                    Some(point) if (point.x - here.x).abs() <= radius => self.get_next_patrol_location(),
                    point => point,
                }
            }
        };

        let axis = match target {
            Some(target) if (target.x - here.x).abs() > radius => (target.x - here.x).signum(),
            _ => 0.0,
        };
        self.character.movement.set_input(axis);
    }

    /// Fire due timers, steer, then move
    pub fn tick(&mut self, delta: f32, floor: &dyn FloorQuery, player_location: Option<Vec3>) -> Vec<MovementEvent> {
        for timer in self.timers.tick(delta) {
            match timer {
                EnemyTimer::HitStun => self.stop_hit_stun(),
            }
        }

        self.steer(player_location);
        self.character.update(delta, floor)
    }

    /// Back to spawn state for a restarted level
    pub fn respawn(&mut self, location: Vec3) {
        self.timers.clear_all();
        self.stunned = false;
        self.attacking = false;
        self.character.respawn(location);
        self.revert_movement_speed_multiplier();
        self.character.movement.disable_movement();
    }
}

impl Combatant for Enemy {
    fn character(&self) -> &Character {
        &self.character
    }

    fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    fn hit_character(&mut self) -> HitOutcome {
        let outcome = self.character.hit_character(&mut *self.hooks);
        if !matches!(outcome, HitOutcome::Damaged { .. }) {
            if outcome == HitOutcome::Killed {
                self.timers.clear_all();
                self.stunned = false;
            }
            return outcome;
        }

        if self.config.hit_stun_duration > 0.0 {
            self.stunned = true;
            self.hooks.on_hit_stun();
            self.timers.set_timer(EnemyTimer::HitStun, self.config.hit_stun_duration);
        }
        outcome
    }

    fn hit_character_with_launch_force(&mut self, force: Vec3) -> HitOutcome {
        if !self.character.launch_for_hit(force) {
            return HitOutcome::Ignored;
        }
        self.hit_character()
    }

    fn kill_character(&mut self) -> bool {
        if !self.character.kill_character(&mut *self.hooks) {
            return false;
        }
        self.timers.clear_all();
        self.stunned = false;
        true
    }
}

impl std::fmt::Debug for Enemy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enemy")
            .field("character", &self.character)
            .field("patrol", &self.patrol)
            .field("stunned", &self.stunned)
            .field("attacking", &self.attacking)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerConfig;
    use approx::assert_relative_eq;
    use parking_lot::Mutex;
    use rogue_combat::{CombatEvent, CombatHooks};
    use rogue_movement::FlatFloor;
    use std::sync::Arc;

    const DT: f32 = 1.0 / 60.0;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<&'static str>>>);

    impl CombatHooks for Recorder {
        fn on_character_death(&mut self) {
            self.0.lock().push("death");
        }
    }

    impl EnemyHooks for Recorder {
        fn on_hit_stun(&mut self) {
            self.0.lock().push("stun");
        }
        fn on_stop_hit_stun(&mut self) {
            self.0.lock().push("stop_stun");
        }
        fn on_setup_patrol(&mut self) {
            self.0.lock().push("setup_patrol");
        }
        fn on_player_entered_patrol_volume(&mut self) {
            self.0.lock().push("patrol_enter");
        }
        fn on_player_entered_attack_volume(&mut self) {
            self.0.lock().push("attack_enter");
        }
    }

    fn enemy(config: EnemyConfig) -> Enemy {
        Enemy::new(EntityId::new(10), config, Vec3::new(0.0, 0.0, 90.0))
    }

    fn player_at(location: Vec3) -> Player {
        Player::new(EntityId::new(1), PlayerConfig::default(), location)
    }

    #[test]
    fn test_patrol_rollover() {
        let mut route = PatrolRoute::new(vec![Vec3::X, Vec3::Z, Vec3::ONE]);
        route.increment();
        route.increment();
        assert_eq!(route.current_index(), 2);
        route.increment();
        assert_eq!(route.current_index(), 0);

        let mut e = enemy(EnemyConfig::default());
        assert_eq!(e.get_next_patrol_location(), None);
        e.init(EnemyInit {
            patrol: Some(PatrolRoute::new(vec![Vec3::X, Vec3::Z])),
            ..Default::default()
        });
        assert_eq!(e.get_next_patrol_location(), Some(Vec3::Z));
        assert_eq!(e.get_next_patrol_location(), Some(Vec3::X));
    }

    #[test]
    fn test_hit_stun() {
        let floor = FlatFloor::new(0.0);
        let recorder = Recorder::default();
        let mut e = enemy(EnemyConfig {
            hit_points: 3,
            ..Default::default()
        })
        .with_hooks(recorder.clone());

        e.hit_character();
        assert!(e.is_stunned());
        for _ in 0..35 {
            e.tick(DT, &floor, None);
        }
        assert!(!e.is_stunned());
        assert_eq!(*recorder.0.lock(), vec!["stun", "stop_stun"]);
    }

    #[test]
    fn test_lethal_hit_does_not_stun() {
        let recorder = Recorder::default();
        let mut e = enemy(EnemyConfig::default()).with_hooks(recorder.clone());
        assert_eq!(e.hit_character(), HitOutcome::Killed);
        assert!(!e.is_stunned());
        assert_eq!(*recorder.0.lock(), vec!["death"]);
    }

    #[test]
    fn test_touch_knocks_player_back() {
        let mut e = enemy(EnemyConfig::default());
        let mut p = player_at(Vec3::new(100.0, 0.0, 90.0));

        let outcome = e.hit_begin_overlap(&mut p, 500.0);
        assert_eq!(outcome, HitOutcome::Damaged { remaining: 2 });
        assert_relative_eq!(p.character().velocity().x, 500.0);
        assert_relative_eq!(p.character().velocity().z, 0.0);

        // Dead enemies do no damage
        e.kill_character();
        let mut p = player_at(Vec3::new(100.0, 0.0, 90.0));
        assert_eq!(e.hit_begin_overlap(&mut p, 500.0), HitOutcome::Ignored);
    }

    #[test]
    fn test_plain_touch_without_force() {
        let mut e = enemy(EnemyConfig::default());
        let mut p = player_at(Vec3::new(100.0, 0.0, 90.0));
        assert_eq!(e.hit_begin_overlap(&mut p, 0.0), HitOutcome::Damaged { remaining: 2 });
        assert_eq!(p.character().velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_stomp() {
        let mut e = enemy(EnemyConfig::default());
        let hurt_box = e.hurt_box_world();
        let mut p = player_at(Vec3::new(10.0, 0.0, hurt_box.top_z() + 5.0));
        p.launch_character(Vec3::new(200.0, 0.0, -300.0), true, true);

        assert!(e.hurt_begin_overlap(&mut p, &hurt_box, 300.0));
        assert!(e.is_dead());
        assert!(p.character().velocity().z > 0.0);
        assert!(p.character().velocity().x < 0.0);
        assert_eq!(p.character().combat.current_hit_points(), 3);

        let deaths: Vec<_> = e.character_mut().drain_events();
        assert!(matches!(deaths.as_slice(), [CombatEvent::Hit { .. }, CombatEvent::Death { .. }]));
    }

    #[test]
    fn test_stomp_from_below_is_rejected() {
        let mut e = enemy(EnemyConfig::default());
        let hurt_box = e.hurt_box_world();
        let mut p = player_at(Vec3::new(0.0, 0.0, hurt_box.top_z() - 20.0));
        p.launch_character(Vec3::new(0.0, 0.0, 300.0), true, true);

        assert!(!e.hurt_begin_overlap(&mut p, &hurt_box, 300.0));
        assert!(!e.is_dead());
    }

    #[test]
    fn test_volumes_enable_movement_and_speed() {
        let recorder = Recorder::default();
        let mut e = enemy(EnemyConfig::default()).with_hooks(recorder.clone());
        e.init(EnemyInit {
            patrol: None,
            patrol_trigger: Some(EntityId::new(100)),
            attack_trigger: Some(EntityId::new(101)),
        });
        e.begin_play(false, false);
        assert_eq!(e.character().movement.mode(), MovementMode::None);

        // Only the player counts
        e.on_begin_patrol_trigger_overlap(CollisionChannel::Projectile);
        assert_eq!(e.character().movement.mode(), MovementMode::None);

        e.on_begin_patrol_trigger_overlap(CollisionChannel::Player);
        assert_eq!(e.character().movement.mode(), MovementMode::Walking);

        e.on_begin_attack_trigger_overlap(CollisionChannel::Player);
        assert_relative_eq!(e.movement_speed_multiplier(), 4.0);
        assert_relative_eq!(e.character().movement.max_walk_speed(), 800.0);

        e.on_end_attack_trigger_overlap(CollisionChannel::Player);
        assert_relative_eq!(e.character().movement.max_walk_speed(), 200.0);

        e.on_end_patrol_trigger_overlap(CollisionChannel::Player);
        assert_eq!(e.character().movement.mode(), MovementMode::None);

        assert_eq!(*recorder.0.lock(), vec!["patrol_enter", "attack_enter"]);
    }

    #[test]
    fn test_begin_play_with_player_inside() {
        let mut e = enemy(EnemyConfig::default());
        e.init(EnemyInit {
            patrol: None,
            patrol_trigger: Some(EntityId::new(100)),
            attack_trigger: None,
        });
        e.begin_play(true, true);
        assert_eq!(e.character().movement.mode(), MovementMode::Walking);
        assert!(!e.is_attacking());
    }

    #[test]
    fn test_walks_patrol_route() {
        let floor = FlatFloor::new(0.0);
        let mut e = enemy(EnemyConfig::default());
        e.init(EnemyInit {
            patrol: Some(PatrolRoute::new(vec![Vec3::new(200.0, 0.0, 90.0), Vec3::new(-200.0, 0.0, 90.0)])),
            patrol_trigger: Some(EntityId::new(100)),
            attack_trigger: None,
        });
        e.begin_play(false, true);

        for _ in 0..50 {
            e.tick(DT, &floor, None);
        }
        assert!(e.location().x > 100.0);
        assert_eq!(e.patrol().map(PatrolRoute::current_index), Some(0));

        // Reaches the first point at about one second and turns around
        for _ in 0..60 {
            e.tick(DT, &floor, None);
        }
        assert_eq!(e.patrol().map(PatrolRoute::current_index), Some(1));
        assert!(e.location().x < 190.0);
        assert!(e.character().velocity().x < 0.0);
    }
}
