//! The camera rig and its per-tick behaviors

use crate::config::{CameraConfig, CameraMode, CameraWorldSettings};
use rogue_core::EntityId;
use rogue_math::{consts::KINDA_SMALL_NUMBER, finterp_constant_to, finterp_to, vinterp_to, Vec3};
use rogue_triggers::{BoxVolume, CollisionChannel, OverlapBody, Trigger, TriggerFilter, TriggerSystem};

/// Snapshot of the followed character for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowTarget {
    pub body: OverlapBody,
    /// The target's current top speed; catch-up speed scales with it
    pub max_walk_speed: f32,
}

impl FollowTarget {
    pub fn new(body: OverlapBody, max_walk_speed: f32) -> Self {
        Self { body, max_walk_speed }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.body.id
    }

    #[inline]
    pub fn location(&self) -> Vec3 {
        self.body.position()
    }
}

/// Mode and tracking state of the rig
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub mode: CameraMode,
    /// X catch-up speed for this tick
    pub current_lateral_speed: f32,
    pub is_overlapping_movement_box: bool,
    /// Z the camera eases toward
    pub follow_target_z: f32,
    pub fixed_point_location: Vec3,
    pub fixed_point_interpolation_speed: f32,
    pub reached_fixed_point: bool,
}

/// Camera rig: a root location, a movement box attached to it and a spring
/// arm offset to the actual camera
#[derive(Debug)]
pub struct CameraRig {
    id: EntityId,
    config: CameraConfig,
    settings: CameraWorldSettings,
    state: CameraState,
    location: Vec3,
    /// Y the rig returns to in follow mode
    default_y: f32,
    follow_target: Option<EntityId>,
    last_target_location: Option<Vec3>,
    triggers: TriggerSystem,
}

impl CameraRig {
    pub fn new(id: EntityId, config: CameraConfig, settings: CameraWorldSettings, location: Vec3) -> Self {
        let mut triggers = TriggerSystem::new();
        triggers.register(
            id,
            Trigger::new(config.movement_box)
                .with_filter(TriggerFilter::channels(CollisionChannel::Player.mask())),
        );

        Self {
            id,
            state: CameraState {
                mode: CameraMode::None,
                current_lateral_speed: 0.0,
                is_overlapping_movement_box: false,
                follow_target_z: location.z,
                fixed_point_location: location,
                fixed_point_interpolation_speed: config.fixed_point_interpolation_speed,
                reached_fixed_point: false,
            },
            config,
            settings,
            location,
            default_y: location.y,
            follow_target: None,
            last_target_location: None,
            triggers,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn mode(&self) -> CameraMode {
        self.state.mode
    }

    pub fn location(&self) -> Vec3 {
        self.location
    }

    pub fn set_location(&mut self, location: Vec3) {
        self.location = location;
    }

    pub fn follow_target(&self) -> Option<EntityId> {
        self.follow_target
    }

    /// World position of the camera at the end of the spring arm
    pub fn camera_world_position(&self) -> Vec3 {
        self.location + self.config.spring_arm_offset
    }

    /// Movement box in world space
    pub fn movement_box(&self) -> BoxVolume {
        self.config.movement_box.attached_to(self.location)
    }

    /// Follow `target`, starting from its current location
    pub fn set_follow_target(&mut self, target: EntityId, location: Vec3) {
        self.follow_target = Some(target);
        self.last_target_location = Some(location);
        self.state.follow_target_z = location.z;
    }

    pub fn set_camera_fixed_point_target(&mut self, target: Vec3) {
        self.state.fixed_point_location = target;
        self.state.reached_fixed_point = false;
    }

    pub fn set_fixed_point_interpolation_speed(&mut self, speed: f32) {
        self.state.fixed_point_interpolation_speed = speed;
    }

    pub fn set_camera_mode(&mut self, new_mode: CameraMode) {
        let old_mode = self.state.mode;
        if new_mode != old_mode {
            if old_mode == CameraMode::Follow {
                self.state.is_overlapping_movement_box = false;
            }

            match new_mode {
                CameraMode::Fixed => self.state.reached_fixed_point = false,
                CameraMode::Follow => {
                    // The target may already be past the box edge, e.g. after
                    // leaving a fixed point. Treat that as overlapping so the
                    // camera catches up instead of snapping.
                    let edge_x = self.movement_box().trailing_edge_x();
                    if self.last_target_location.is_some_and(|target| target.x >= edge_x) {
                        self.state.is_overlapping_movement_box = true;
                    }
                }
                CameraMode::None => {}
            }

            log::debug!("camera mode {:?} -> {:?}", old_mode, new_mode);
        }

        self.state.mode = new_mode;
    }

    /// The followed character landed
    pub fn on_character_landed(&mut self, landed_z: f32) {
        self.state.follow_target_z = landed_z;
    }

    // ------------------------------------------------------------------
    // Movement box overlaps
    // ------------------------------------------------------------------

    pub fn movement_box_overlap_begin(&mut self, other: EntityId) {
        if self.state.mode != CameraMode::Follow || self.follow_target != Some(other) {
            return;
        }
        self.state.is_overlapping_movement_box = true;
    }

    /// The target left the movement box. Leaving past the box centre snaps
    /// the camera onto the target.
    pub fn movement_box_overlap_end(&mut self, other: EntityId, target_location: Option<Vec3>) {
        if self.follow_target != Some(other) {
            return;
        }

        self.state.is_overlapping_movement_box = false;

        if self.state.mode != CameraMode::Follow {
            return;
        }

        if let Some(target) = target_location {
            if target.x > self.movement_box().center.x {
                self.location = Vec3::new(target.x, self.location.y, target.z);
            }
        }
    }

    fn update_movement_box_overlap(&mut self, target: Option<&FollowTarget>) {
        let bodies: Vec<OverlapBody> = target.map(|t| t.body).into_iter().collect();
        for event in self.triggers.update(&[(self.id, self.location)], &bodies) {
            if event.is_begin() {
                self.movement_box_overlap_begin(event.other_entity);
            } else {
                self.movement_box_overlap_end(event.other_entity, target.map(FollowTarget::location));
            }
        }
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Post-physics update. `target` is `None` once the followed character
    /// is gone.
    pub fn tick(&mut self, delta: f32, target: Option<&FollowTarget>) {
        let target = target.filter(|t| Some(t.id()) == self.follow_target);
        // Tracked in every mode so a later switch to Follow sees where the
        // target is now
        if let Some(target) = target {
            self.last_target_location = Some(target.location());
        }
        self.update_movement_box_overlap(target);

        match self.state.mode {
            CameraMode::Follow => self.tick_follow_behavior(delta, target),
            CameraMode::Fixed => self.tick_fixed_point(delta),
            CameraMode::None => {}
        }
    }

    fn tick_follow_behavior(&mut self, delta: f32, target: Option<&FollowTarget>) {
        let Some(target) = target else {
            self.interpolate_to_last_known_follow_location(delta);
            return;
        };

        if self.state.is_overlapping_movement_box {
            self.calculate_lateral_speed(target);
        } else {
            self.state.current_lateral_speed = 0.0;
        }

        self.interpolate_from_follow_target(delta, target.location());
    }

    fn tick_fixed_point(&mut self, delta: f32) {
        if self.state.reached_fixed_point {
            return;
        }

        let current = self.location;
        let next = vinterp_to(
            current,
            self.state.fixed_point_location,
            delta,
            self.state.fixed_point_interpolation_speed,
        );
        self.location = next;

        if current.distance_squared(next) <= KINDA_SMALL_NUMBER {
            self.state.reached_fixed_point = true;
        }
    }

    /// Catch-up speed from how far the target is past the box's trailing
    /// edge, as a fraction of the box half-width
    pub fn calculate_lateral_speed(&mut self, target: &FollowTarget) {
        let movement_box = self.movement_box();
        let half_width = movement_box.half_extents.x;
        if half_width <= 0.0 {
            self.state.current_lateral_speed = 0.0;
            return;
        }

        let past_edge = (target.location().x - movement_box.trailing_edge_x()).max(0.0);
        let fraction = past_edge / half_width;
        self.state.current_lateral_speed =
            fraction * self.config.lateral_follow_speed_multiplier * target.max_walk_speed.max(0.0);
    }

    fn interpolate_from_follow_target(&mut self, delta: f32, target: Vec3) {
        let current = self.location;
        let speed = self.state.current_lateral_speed;

        let step_x = finterp_constant_to(current.x, target.x, delta, speed);

        // Off the default Y after leaving a fixed point
        let step_y = if current.y != self.default_y {
            finterp_constant_to(current.y, self.default_y, delta, speed)
        } else {
            self.default_y
        };

        let lower = self.settings.cutoff_lower_bound_z;
        let upper = self.settings.cutoff_upper_bound_z;
        if target.z <= lower {
            self.state.follow_target_z = lower;
        } else if target.z >= upper {
            self.state.follow_target_z = upper;
        } else if target.z < self.state.follow_target_z {
            self.state.follow_target_z = target.z;
        }

        let step_z = finterp_to(current.z, self.state.follow_target_z, delta, self.config.follow_z_speed);

        self.location = Vec3::new(step_x, step_y, step_z);
    }

    fn interpolate_to_last_known_follow_location(&mut self, delta: f32) {
        let current = self.location;
        let step_z = finterp_to(current.z, self.state.follow_target_z, delta, self.config.follow_z_speed);
        self.location = current.with_z(step_z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;
    const PLAYER: EntityId = EntityId::new(1);

    fn target_at(location: Vec3) -> FollowTarget {
        FollowTarget::new(
            OverlapBody::new(PLAYER, location, Vec3::new(40.0, 40.0, 90.0), CollisionChannel::Player),
            600.0,
        )
    }

    fn follow_rig(start: Vec3) -> CameraRig {
        let mut rig = CameraRig::new(
            EntityId::new(99),
            CameraConfig::default(),
            CameraWorldSettings::default(),
            start,
        );
        rig.set_follow_target(PLAYER, start);
        rig.set_camera_mode(CameraMode::Follow);
        rig
    }

    #[test]
    fn test_lateral_speed_zero_at_trailing_edge() {
        let mut rig = follow_rig(Vec3::new(0.0, 0.0, 90.0));
        let target = target_at(Vec3::new(0.0, 0.0, 90.0));
        rig.tick(DT, Some(&target));

        assert!(rig.state().is_overlapping_movement_box);
        assert_relative_eq!(rig.state().current_lateral_speed, 0.0);
        assert_relative_eq!(rig.location().x, 0.0);
    }

    #[test]
    fn test_lateral_speed_at_box_centre() {
        let mut rig = follow_rig(Vec3::new(0.0, 0.0, 90.0));
        let target = target_at(Vec3::new(200.0, 0.0, 90.0));
        rig.tick(DT, Some(&target));

        assert_relative_eq!(rig.state().current_lateral_speed, 600.0);
        assert_relative_eq!(rig.location().x, 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_no_lateral_speed_outside_box() {
        let mut rig = follow_rig(Vec3::new(0.0, 0.0, 90.0));
        let target = target_at(Vec3::new(-300.0, 0.0, 90.0));
        rig.tick(DT, Some(&target));

        assert!(!rig.state().is_overlapping_movement_box);
        assert_relative_eq!(rig.state().current_lateral_speed, 0.0);
    }

    #[test]
    fn test_z_clamps_to_upper_bound() {
        let mut rig = follow_rig(Vec3::new(0.0, 0.0, 90.0));
        let target = target_at(Vec3::new(0.0, 0.0, 1000.0));

        let mut previous = rig.location().z;
        for _ in 0..600 {
            rig.tick(DT, Some(&target));
            let z = rig.location().z;
            assert!(z <= 750.0);
            assert!(z >= previous);
            previous = z;
        }
        assert_relative_eq!(rig.state().follow_target_z, 750.0);
        assert_relative_eq!(rig.location().z, 750.0, epsilon = 1e-2);
    }

    #[test]
    fn test_z_clamps_to_lower_bound() {
        let mut rig = follow_rig(Vec3::new(0.0, 0.0, 90.0));
        let target = target_at(Vec3::new(0.0, 0.0, -2000.0));
        for _ in 0..600 {
            rig.tick(DT, Some(&target));
        }
        assert_relative_eq!(rig.state().follow_target_z, -400.0);
        assert!(rig.location().z >= -400.0);
    }

    #[test]
    fn test_z_only_settles_down_until_landing() {
        let mut rig = follow_rig(Vec3::new(0.0, 0.0, 90.0));

        // A hop does not lift the camera
        rig.tick(DT, Some(&target_at(Vec3::new(0.0, 0.0, 300.0))));
        assert_relative_eq!(rig.state().follow_target_z, 90.0);
        assert_relative_eq!(rig.location().z, 90.0);

        // Dropping below pulls it down
        rig.tick(DT, Some(&target_at(Vec3::new(0.0, 0.0, 40.0))));
        assert_relative_eq!(rig.state().follow_target_z, 40.0);

        // Landing on a higher platform raises the target again
        rig.on_character_landed(290.0);
        rig.tick(DT, Some(&target_at(Vec3::new(0.0, 0.0, 290.0))));
        assert_relative_eq!(rig.state().follow_target_z, 290.0);
        assert!(rig.location().z > 40.0);
    }

    #[test]
    fn test_lost_target_only_moves_z() {
        let mut rig = follow_rig(Vec3::new(0.0, 0.0, 90.0));
        rig.on_character_landed(-100.0);
        rig.set_location(Vec3::new(50.0, 20.0, 90.0));

        rig.tick(DT, None);
        let location = rig.location();
        assert_relative_eq!(location.x, 50.0);
        assert_relative_eq!(location.y, 20.0);
        assert!(location.z < 90.0);
    }

    #[test]
    fn test_fixed_point_reaches_and_stops() {
        let mut rig = follow_rig(Vec3::new(0.0, 0.0, 90.0));
        rig.set_camera_fixed_point_target(Vec3::new(500.0, -200.0, 300.0));
        rig.set_camera_mode(CameraMode::Fixed);
        assert!(!rig.state().reached_fixed_point);

        for _ in 0..2000 {
            rig.tick(DT, None);
            if rig.state().reached_fixed_point {
                break;
            }
        }
        assert!(rig.state().reached_fixed_point);
        let reached_at = rig.location();
        assert!(reached_at.distance(Vec3::new(500.0, -200.0, 300.0)) < 1.0);

        rig.tick(DT, None);
        assert_eq!(rig.location(), reached_at);
    }

    #[test]
    fn test_leaving_follow_clears_overlap_and_reentry_preseeds() {
        let mut rig = follow_rig(Vec3::new(0.0, 0.0, 90.0));
        rig.tick(DT, Some(&target_at(Vec3::new(100.0, 0.0, 90.0))));
        assert!(rig.state().is_overlapping_movement_box);

        rig.set_camera_mode(CameraMode::Fixed);
        assert!(!rig.state().is_overlapping_movement_box);

        rig.set_camera_mode(CameraMode::Follow);
        assert!(rig.state().is_overlapping_movement_box);
    }

    #[test]
    fn test_follow_after_fixed_catches_up_with_moved_target() {
        let start = Vec3::new(0.0, 0.0, 90.0);
        let mut rig = follow_rig(start);
        rig.tick(DT, Some(&target_at(Vec3::new(-300.0, 0.0, 90.0))));
        assert!(!rig.state().is_overlapping_movement_box);

        rig.set_camera_fixed_point_target(start);
        rig.set_camera_mode(CameraMode::Fixed);
        let target = target_at(Vec3::new(300.0, 0.0, 90.0));
        for _ in 0..10 {
            rig.tick(DT, Some(&target));
        }

        rig.set_camera_mode(CameraMode::Follow);
        assert!(rig.state().is_overlapping_movement_box);

        for _ in 0..120 {
            rig.tick(DT, Some(&target));
        }
        assert!(rig.state().current_lateral_speed > 0.0);
        assert!(rig.location().x > 0.0);
    }

    #[test]
    fn test_y_returns_to_default_after_fixed() {
        let mut rig = follow_rig(Vec3::new(0.0, 0.0, 90.0));
        rig.set_location(Vec3::new(0.0, -50.0, 90.0));

        let target = target_at(Vec3::new(200.0, 0.0, 90.0));
        for _ in 0..120 {
            rig.tick(DT, Some(&target));
        }
        assert_relative_eq!(rig.location().y, 0.0);
    }

    #[test]
    fn test_exit_beyond_centre_snaps() {
        let mut rig = follow_rig(Vec3::new(0.0, 0.0, 90.0));
        rig.movement_box_overlap_begin(PLAYER);
        rig.movement_box_overlap_end(PLAYER, Some(Vec3::new(450.0, 0.0, 120.0)));

        assert!(!rig.state().is_overlapping_movement_box);
        assert_eq!(rig.location(), Vec3::new(450.0, 0.0, 120.0));

        // Exiting behind the centre keeps the camera where it is
        let mut rig = follow_rig(Vec3::new(0.0, 0.0, 90.0));
        rig.movement_box_overlap_end(PLAYER, Some(Vec3::new(-60.0, 0.0, 90.0)));
        assert_eq!(rig.location(), Vec3::new(0.0, 0.0, 90.0));
    }

    #[test]
    fn test_other_entities_ignored() {
        let mut rig = follow_rig(Vec3::new(0.0, 0.0, 90.0));
        rig.movement_box_overlap_begin(EntityId::new(7));
        assert!(!rig.state().is_overlapping_movement_box);
    }
}
