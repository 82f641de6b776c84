//! World-scoped camera management

use crate::config::{CameraConfig, CameraMode, CameraWorldSettings};
use crate::rig::{CameraRig, FollowTarget};
use rogue_core::{CoreError, EntityId};
use rogue_math::Vec3;

/// Owns the camera rig for one world session
#[derive(Debug)]
pub struct CameraSubsystem {
    config: CameraConfig,
    rig: Option<CameraRig>,
    owner: Option<EntityId>,
    rig_id: EntityId,
}

impl CameraSubsystem {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            rig: None,
            owner: None,
            rig_id: EntityId::NULL,
        }
    }

    /// Entity id the rig registers its movement box under
    pub fn with_rig_id(mut self, id: EntityId) -> Self {
        self.rig_id = id;
        self
    }

    /// Spawn the rig at the owner's location and start in the world's
    /// default mode. Worlds without a managed camera are skipped.
    pub fn on_world_begin_play(&mut self, settings: &CameraWorldSettings, owner: Option<(EntityId, Vec3)>) {
        self.rig = None;
        self.owner = None;

        if !settings.spawn_camera {
            log::info!("no managed camera for this world, skipping camera setup");
            return;
        }

        let Some((owner, location)) = owner else {
            log::error!("camera setup needs a player to follow, none was given");
            return;
        };

        let mut rig = CameraRig::new(self.rig_id, self.config.clone(), settings.clone(), location);
        rig.set_follow_target(owner, location);
        rig.set_camera_mode(settings.default_mode);

        log::debug!("camera spawned at {:?} following {}", location, owner);
        self.owner = Some(owner);
        self.rig = Some(rig);
    }

    /// Tear down at world end
    pub fn on_world_end_play(&mut self) {
        self.rig = None;
        self.owner = None;
    }

    pub fn rig(&self) -> Option<&CameraRig> {
        self.rig.as_ref()
    }

    pub fn rig_mut(&mut self) -> Option<&mut CameraRig> {
        self.rig.as_mut()
    }

    /// Camera world position, or the origin when there is no camera
    pub fn get_camera_world_position(&self) -> Vec3 {
        self.rig.as_ref().map_or(Vec3::ZERO, CameraRig::camera_world_position)
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.rig.as_ref().map_or(CameraMode::None, CameraRig::mode)
    }

    fn require_rig(&mut self) -> rogue_core::Result<&mut CameraRig> {
        self.rig.as_mut().ok_or(CoreError::MissingDependency("camera rig"))
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        match self.require_rig() {
            Ok(rig) => rig.set_camera_mode(mode),
            Err(e) => log::warn!("set_camera_mode({:?}) ignored: {}", mode, e),
        }
    }

    pub fn set_camera_fixed_point_target(&mut self, target: Vec3) {
        match self.require_rig() {
            Ok(rig) => rig.set_camera_fixed_point_target(target),
            Err(e) => log::warn!("set_camera_fixed_point_target ignored: {}", e),
        }
    }

    pub fn is_player_camera_owner(&self, player: EntityId) -> bool {
        self.owner == Some(player)
    }

    pub fn on_character_landed(&mut self, character: EntityId, landed_z: f32) {
        if !self.is_player_camera_owner(character) {
            return;
        }
        if let Some(rig) = self.rig.as_mut() {
            rig.on_character_landed(landed_z);
        }
    }

    /// Post-physics tick
    pub fn tick(&mut self, delta: f32, target: Option<&FollowTarget>) {
        if let Some(rig) = self.rig.as_mut() {
            rig.tick(delta, target);
        }
    }
}

impl Default for CameraSubsystem {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}
