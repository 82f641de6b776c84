//! The playable world: owns every gameplay system and routes events
//! between them each tick

use crate::config::{GameConfig, PickupKind};
use crate::input::InputAction;
use rogue_audio::{AudioBackend, AudioSubsystem, HeadlessBackend, SoundRef};
use rogue_camera::{CameraMode, CameraSubsystem, FollowTarget};
use rogue_character::{CollisionResponse, Combatant, Enemy, EnemyInit, PatrolRoute, Player};
use rogue_combat::CombatEvent;
use rogue_core::{EntityId, IdGenerator};
use rogue_event::EventChannel;
use rogue_gamestate::{LevelEvent, LevelState, LevelStateMachine, SettingsStore, UserSettings};
use rogue_math::Vec3;
use rogue_movement::{MovementEvent, Platforms};
use rogue_triggers::{BoxVolume, CollisionChannel, OverlapBody, Trigger, TriggerEvent, TriggerFilter, TriggerSystem};
use rogue_ui::{Hud, LayerTag, LoadingScreen, ScreenId};
use serde::Serialize;
use std::collections::BTreeMap;

/// What a registered trigger means to the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriggerRole {
    EnemyHitBox(usize),
    EnemyHurtBox(usize),
    PatrolVolume(usize),
    AttackVolume(usize),
    CameraZone(usize),
    Hazard(usize),
    Pickup(usize),
    LevelExit,
}

impl TriggerRole {
    /// Stomps resolve before touches in the same frame
    fn order(&self) -> u8 {
        match self {
            Self::EnemyHurtBox(_) => 0,
            _ => 1,
        }
    }

    fn is_enemy_volume(&self) -> bool {
        matches!(self, Self::PatrolVolume(_) | Self::AttackVolume(_))
    }
}

struct EnemySlot {
    enemy: Enemy,
    spawn: Vec3,
    boss: bool,
    hit_box: EntityId,
    hurt_box: EntityId,
}

/// Serializable view of the world for tooling and the simulator
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub frame: u64,
    pub elapsed: f64,
    pub level_state: LevelState,
    pub remaining_time: f32,
    pub player: CharacterSnapshot,
    pub enemies: Vec<CharacterSnapshot>,
    pub camera_mode: CameraMode,
    pub camera_position: Vec3,
    pub music: Option<SoundRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterSnapshot {
    pub id: u64,
    pub location: Vec3,
    pub velocity: Vec3,
    pub hit_points: u32,
    pub dead: bool,
}

impl CharacterSnapshot {
    fn of(combatant: &dyn Combatant) -> Self {
        let character = combatant.character();
        Self {
            id: character.id().raw(),
            location: character.location(),
            velocity: character.velocity(),
            hit_points: character.combat.current_hit_points(),
            dead: character.is_dead(),
        }
    }
}

/// A loaded level with its player, enemies and world subsystems
pub struct GameWorld<B: AudioBackend = HeadlessBackend> {
    config: GameConfig,
    ids: IdGenerator,
    player: Player,
    enemies: Vec<EnemySlot>,
    triggers: TriggerSystem,
    roles: BTreeMap<EntityId, TriggerRole>,
    floor: Platforms,
    level: LevelStateMachine,
    camera: CameraSubsystem,
    audio: AudioSubsystem<B>,
    settings_store: Option<SettingsStore>,
    hud: Hud,
    loading: LoadingScreen,
    pending_input: EventChannel<InputAction>,
    pause_menu: Option<ScreenId>,
    end_screen: Option<ScreenId>,
    last_trigger_events: Vec<TriggerEvent>,
    started: bool,
    frame: u64,
    elapsed: f64,
}

impl<B: AudioBackend> GameWorld<B> {
    pub fn new(config: GameConfig, backend: B) -> Self {
        let mut ids = IdGenerator::new();

        let player = Player::new(ids.next_id(), config.player.clone(), config.layout.player_spawn);

        let enemies = config
            .layout
            .enemies
            .iter()
            .map(|spawn| EnemySlot {
                enemy: Enemy::new(ids.next_id(), config.enemy_config(spawn), spawn.location),
                spawn: spawn.location,
                boss: spawn.boss,
                hit_box: EntityId::NULL,
                hurt_box: EntityId::NULL,
            })
            .collect();

        let camera = CameraSubsystem::new(config.camera.clone()).with_rig_id(ids.next_id());

        let mut world = Self {
            floor: config.layout.platforms.clone(),
            level: LevelStateMachine::new(config.level.clone()),
            hud: Hud::new(config.hud.clone()),
            audio: AudioSubsystem::new(backend),
            settings_store: None,
            config,
            ids,
            player,
            enemies,
            triggers: TriggerSystem::new(),
            roles: BTreeMap::new(),
            camera,
            loading: LoadingScreen::new(),
            pending_input: EventChannel::new(),
            pause_menu: None,
            end_screen: None,
            last_trigger_events: Vec::new(),
            started: false,
            frame: 0,
            elapsed: 0.0,
        };
        world.build_triggers();
        world
    }

    /// Persist and restore user settings through `store`
    pub fn with_settings_store(mut self, store: SettingsStore) -> Self {
        self.audio = self.audio.with_settings_store(store.clone());
        self.settings_store = Some(store);
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level(&self) -> &LevelStateMachine {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut LevelStateMachine {
        &mut self.level
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn enemy(&self, index: usize) -> Option<&Enemy> {
        self.enemies.get(index).map(|slot| &slot.enemy)
    }

    pub fn enemy_mut(&mut self, index: usize) -> Option<&mut Enemy> {
        self.enemies.get_mut(index).map(|slot| &mut slot.enemy)
    }

    pub fn camera(&self) -> &CameraSubsystem {
        &self.camera
    }

    pub fn audio(&self) -> &AudioSubsystem<B> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioSubsystem<B> {
        &mut self.audio
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn loading_screen(&self) -> &LoadingScreen {
        &self.loading
    }

    pub fn triggers(&self) -> &TriggerSystem {
        &self.triggers
    }

    /// Trigger events of the last overlap pass
    pub fn trigger_events(&self) -> &[TriggerEvent] {
        &self.last_trigger_events
    }

    pub fn pause_menu(&self) -> Option<ScreenId> {
        self.pause_menu
    }

    pub fn end_screen(&self) -> Option<ScreenId> {
        self.end_screen
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Start the level: audio and HUD come up, the level goes Ready then
    /// Running, and the loading screen is dropped unless held
    pub fn begin_play(&mut self) {
        if self.started {
            log::warn!("begin_play called on a world that is already playing");
            return;
        }
        self.started = true;

        let user_settings = self
            .settings_store
            .as_ref()
            .map_or_else(UserSettings::default, SettingsStore::load_or_default);

        self.audio.initialize(&self.config.developer.audio);
        self.audio.world_begin_play(&self.config.world.audio, Some(user_settings));

        self.loading.begin_loading();
        self.route_loading_events();

        self.hud.begin_play();
        self.level.begin_play();
        self.start_level();

        log::info!("{}", self.debug_info());
    }

    /// Restart the current level with everything back at spawn
    pub fn reset_level(&mut self) {
        if !self.started {
            log::warn!("reset_level called before begin_play");
            return;
        }
        log::info!("restarting level");

        self.loading.begin_loading();
        self.route_loading_events();

        self.close_menus();
        self.pending_input.clear();

        self.player.respawn(self.config.layout.player_spawn);
        for slot in &mut self.enemies {
            slot.enemy.respawn(slot.spawn);
        }
        self.build_triggers();

        self.level.reset_current_level();
        self.start_level();
    }

    /// Tear the world down
    pub fn end_play(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;
        self.camera.on_world_end_play();
        self.audio.world_end_play();
        log::info!("world ended after {} frames", self.frame);
    }

    /// Keep the loading screen up after the level is ready
    pub fn hold_loading_screen(&mut self, hold: bool) {
        self.loading.hold_loading_screen(hold);
        self.route_loading_events();
    }

    pub fn pause_game(&mut self) {
        self.level.pause_game();
        self.route_level_events();
    }

    pub fn unpause_game(&mut self) {
        self.level.unpause_game();
        self.route_level_events();
    }

    /// Queue input for the next tick
    pub fn input(&mut self, action: InputAction) {
        self.pending_input.send(action);
    }

    /// Forward a back action to the topmost screen that handles it
    pub fn back(&mut self) -> bool {
        if self.level.level_state() == LevelState::Paused {
            self.unpause_game();
            return true;
        }
        self.hud.layout_mut().handle_back_action_topmost()
    }

    /// Save the user's volume levels
    pub fn save_settings(&self) -> rogue_audio::Result<()> {
        self.audio.save_audio_settings()
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Advance the world by `delta` seconds
    pub fn tick(&mut self, delta: f32) {
        if !self.started || !(delta > 0.0) {
            return;
        }
        self.frame += 1;
        self.elapsed += f64::from(delta);

        self.apply_input();

        let state = self.level.level_state();
        let simulate = state == LevelState::Running || state.is_terminal();

        if simulate {
            self.tick_characters(delta);
            let events = self.update_overlaps();
            self.route_trigger_events(&events, false);
            self.check_kill_z();
            self.route_combat_events();
        }

        self.level.tick(delta);
        self.route_level_events();

        if simulate {
            let target = self
                .player
                .character()
                .overlap_body()
                .map(|body| FollowTarget::new(body, self.player.character().movement.max_walk_speed()));
            self.camera.tick(delta, target.as_ref());
        }

        self.audio.update(delta);
    }

    fn apply_input(&mut self) {
        let state = self.level.level_state();
        for action in self.pending_input.drain() {
            if action.is_gameplay() && state != LevelState::Running {
                continue;
            }
            match action {
                InputAction::Move(axis) => self.player.set_move_input(axis.clamp(-1.0, 1.0)),
                InputAction::JumpPressed => self.player.press_jump(),
                InputAction::JumpReleased => self.player.release_jump(),
                InputAction::TogglePause => match self.level.level_state() {
                    LevelState::Running => self.pause_game(),
                    LevelState::Paused => self.unpause_game(),
                    other => log::debug!("pause toggle ignored in {:?}", other),
                },
            }
        }
    }

    fn tick_characters(&mut self, delta: f32) {
        for event in self.player.tick(delta, &self.floor) {
            if let MovementEvent::Landed { location } = event {
                self.camera.on_character_landed(self.player.id(), location.z);
            }
        }

        let player_location = (!self.player.is_dead()).then(|| self.player.location());
        for slot in &mut self.enemies {
            slot.enemy.tick(delta, &self.floor, player_location);
        }
    }

    fn check_kill_z(&mut self) {
        if self.level.has_match_ended() {
            return;
        }
        let z = self.player.location().z;
        if z < self.config.world.kill_z {
            log::info!("player fell out of the world at z = {:.1}", z);
            self.level.player_out_of_bounds();
        }
    }

    // ------------------------------------------------------------------
    // Triggers
    // ------------------------------------------------------------------

    fn register_trigger(&mut self, volume: BoxVolume, role: TriggerRole) -> EntityId {
        let id = self.ids.next_id();
        self.triggers.register(
            id,
            Trigger::new(volume).with_filter(TriggerFilter::channels(CollisionChannel::Player.mask())),
        );
        self.roles.insert(id, role);
        id
    }

    /// Register every volume of the layout. Enemy boxes follow their enemy;
    /// everything else is placed in world space.
    fn build_triggers(&mut self) {
        self.triggers = TriggerSystem::new();
        self.roles.clear();

        for index in 0..self.enemies.len() {
            let (hit_box, hurt_box) = {
                let config = self.enemies[index].enemy.config();
                (config.hit_box, config.hurt_box)
            };
            let hit_box = self.register_trigger(hit_box, TriggerRole::EnemyHitBox(index));
            let hurt_box = self.register_trigger(hurt_box, TriggerRole::EnemyHurtBox(index));

            let spawn = &self.config.layout.enemies[index];
            let patrol = (!spawn.patrol.is_empty()).then(|| PatrolRoute::new(spawn.patrol.clone()));
            let (patrol_volume, attack_volume) = (spawn.patrol_volume, spawn.attack_volume);
            let patrol_trigger = patrol_volume.map(|v| self.register_trigger(v, TriggerRole::PatrolVolume(index)));
            let attack_trigger = attack_volume.map(|v| self.register_trigger(v, TriggerRole::AttackVolume(index)));

            let slot = &mut self.enemies[index];
            slot.hit_box = hit_box;
            slot.hurt_box = hurt_box;
            slot.enemy.init(EnemyInit {
                patrol,
                patrol_trigger,
                attack_trigger,
            });
        }

        let layout = self.config.layout.clone();
        for (index, zone) in layout.camera_zones.iter().enumerate() {
            self.register_trigger(zone.volume, TriggerRole::CameraZone(index));
        }
        for (index, hazard) in layout.hazards.iter().enumerate() {
            self.register_trigger(hazard.volume, TriggerRole::Hazard(index));
        }
        for (index, pickup) in layout.pickups.iter().enumerate() {
            self.register_trigger(pickup.volume, TriggerRole::Pickup(index));
        }
        if let Some(exit) = layout.level_exit {
            self.register_trigger(exit, TriggerRole::LevelExit);
        }

        log::debug!("registered {} triggers", self.triggers.trigger_count());
    }

    fn trigger_owner(&self, role: TriggerRole) -> Vec3 {
        match role {
            TriggerRole::EnemyHitBox(i) | TriggerRole::EnemyHurtBox(i) => self.enemies[i].enemy.location(),
            _ => Vec3::ZERO,
        }
    }

    fn update_overlaps(&mut self) -> Vec<TriggerEvent> {
        let owners: Vec<(EntityId, Vec3)> = self
            .roles
            .iter()
            .map(|(&id, &role)| (id, self.trigger_owner(role)))
            .collect();
        let bodies: Vec<OverlapBody> = self.player.character().overlap_body().into_iter().collect();

        let mut events = self.triggers.update(&owners, &bodies);
        events.sort_by_key(|e| self.roles.get(&e.trigger_entity).map_or(1, TriggerRole::order));
        self.last_trigger_events = events.clone();
        events
    }

    /// Route overlap events. The first pass of a level skips enemy volumes;
    /// those are handed to the enemies' begin play instead.
    fn route_trigger_events(&mut self, events: &[TriggerEvent], first_pass: bool) {
        let player = self.player.id();
        let mut stomped = Vec::new();

        for event in events {
            if event.other_entity != player {
                continue;
            }
            let Some(&role) = self.roles.get(&event.trigger_entity) else {
                continue;
            };
            if first_pass && role.is_enemy_volume() {
                continue;
            }

            log::trace!(
                "{} {:?} {}",
                if event.is_begin() { "entered" } else { "left" },
                role,
                event.trigger_entity
            );

            if event.is_begin() {
                self.on_begin_overlap(role, event.trigger_entity, &mut stomped);
            } else {
                self.on_end_overlap(role);
            }
        }
    }

    fn player_blocks(&self, channel: CollisionChannel) -> bool {
        self.player.character().collision.response_to(channel) != CollisionResponse::Ignore
    }

    fn on_begin_overlap(&mut self, role: TriggerRole, trigger: EntityId, stomped: &mut Vec<usize>) {
        match role {
            TriggerRole::EnemyHurtBox(i) => {
                if !self.player_blocks(CollisionChannel::Enemy) {
                    return;
                }
                let enemy = &mut self.enemies[i].enemy;
                let hurt_box = enemy.hurt_box_world();
                let recoil = enemy.config().stomp_recoil;
                if enemy.hurt_begin_overlap(&mut self.player, &hurt_box, recoil) {
                    log::debug!("player stomped enemy {}", enemy.id());
                    stomped.push(i);
                }
            }
            TriggerRole::EnemyHitBox(i) => {
                if stomped.contains(&i) || !self.player_blocks(CollisionChannel::Enemy) {
                    return;
                }
                let enemy = &mut self.enemies[i].enemy;
                let force = enemy.config().touch_force;
                enemy.hit_begin_overlap(&mut self.player, force);
            }
            TriggerRole::PatrolVolume(i) => self.enemies[i]
                .enemy
                .on_begin_patrol_trigger_overlap(CollisionChannel::Player),
            TriggerRole::AttackVolume(i) => self.enemies[i]
                .enemy
                .on_begin_attack_trigger_overlap(CollisionChannel::Player),
            TriggerRole::CameraZone(i) => {
                let fixed_point = self.config.layout.camera_zones[i].fixed_point;
                self.camera.set_camera_fixed_point_target(fixed_point);
                self.camera.set_camera_mode(CameraMode::Fixed);
            }
            TriggerRole::Hazard(i) => {
                if !self.player_blocks(CollisionChannel::Projectile) {
                    return;
                }
                match self.config.layout.hazards[i].launch_force {
                    Some(force) => self.player.hit_character_with_launch_force(force),
                    None => self.player.hit_character(),
                };
            }
            TriggerRole::Pickup(i) => {
                if self.player.is_dead() {
                    return;
                }
                match self.config.layout.pickups[i].kind {
                    PickupKind::HitPoints { amount } => self.player.add_hitpoints(amount),
                    PickupKind::SpeedPowerup { duration, multiplier } => {
                        self.player.activate_speed_powerup(duration, multiplier)
                    }
                }
                log::debug!("pickup {} consumed", i);
                if let Err(e) = self.triggers.set_enabled(trigger, false) {
                    log::warn!("could not disable pickup {}: {}", i, e);
                }
            }
            TriggerRole::LevelExit => {
                if !self.player.is_dead() {
                    log::info!("player reached the level exit");
                    self.level.complete_level();
                }
            }
        }
    }

    fn on_end_overlap(&mut self, role: TriggerRole) {
        match role {
            TriggerRole::PatrolVolume(i) => self.enemies[i]
                .enemy
                .on_end_patrol_trigger_overlap(CollisionChannel::Player),
            TriggerRole::AttackVolume(i) => self.enemies[i]
                .enemy
                .on_end_attack_trigger_overlap(CollisionChannel::Player),
            TriggerRole::CameraZone(_) => self.camera.set_camera_mode(CameraMode::Follow),
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Event routing
    // ------------------------------------------------------------------

    fn route_combat_events(&mut self) {
        for event in self.player.character_mut().drain_events() {
            match event {
                CombatEvent::Hit { remaining, .. } => log::debug!("player hit, {} hit points left", remaining),
                CombatEvent::HitPointsAdded { added, total, .. } => {
                    log::debug!("player gained {} hit points, now {}", added, total)
                }
                CombatEvent::Death { .. } => {
                    log::info!("player died");
                    self.level.player_death();
                }
            }
        }

        for index in 0..self.enemies.len() {
            let events = self.enemies[index].enemy.character_mut().drain_events();
            for event in events {
                let CombatEvent::Death { entity } = event else {
                    continue;
                };
                let slot = &self.enemies[index];
                for trigger in [slot.hit_box, slot.hurt_box] {
                    if let Err(e) = self.triggers.set_enabled(trigger, false) {
                        log::warn!("could not disable box of {}: {}", entity, e);
                    }
                }

                if slot.boss {
                    log::info!("boss {} defeated", entity);
                    self.level.boss_defeated(self.config.layout.boss_defeat_delay);
                } else {
                    log::debug!("enemy {} defeated", entity);
                }
            }
        }
    }

    fn route_level_events(&mut self) {
        for event in self.level.drain_events() {
            match event {
                LevelEvent::Initialized => log::debug!("level initialized"),
                LevelEvent::StateChanged { previous, current } => self.on_level_state_changed(previous, current),
            }
        }
    }

    fn on_level_state_changed(&mut self, previous: LevelState, current: LevelState) {
        match current {
            LevelState::Preload => {}
            LevelState::Ready => {
                let owner = (self.player.id(), self.player.location());
                self.camera
                    .on_world_begin_play(&self.config.world.camera, Some(owner));
            }
            LevelState::Running => {
                if previous == LevelState::Paused {
                    self.audio.level_state_changed(current);
                    if let Some(menu) = self.pause_menu.take() {
                        self.hud.close_screen(menu);
                    }
                    self.hud.set_navigation_enabled(false);
                }
            }
            LevelState::Paused => {
                self.audio.level_state_changed(current);
                self.release_controls();
                self.pause_menu = self.hud.push_content_to_layer(&LayerTag::game_menu(), "pause_menu");
                self.hud.set_navigation_enabled(true);
            }
            LevelState::GameOver | LevelState::Victory => {
                self.audio.level_state_changed(current);
                self.release_controls();
                if let Some(menu) = self.pause_menu.take() {
                    self.hud.close_screen(menu);
                }
                let screen = if current == LevelState::Victory {
                    "victory"
                } else {
                    "game_over"
                };
                self.end_screen = self.hud.push_content_to_layer(&LayerTag::menu(), screen);
                self.hud.set_navigation_enabled(true);
            }
        }
    }

    fn route_loading_events(&mut self) {
        for event in self.loading.drain_events() {
            self.audio.loading_screen_visibility_changed(event.visible);
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Shared tail of begin play and restart
    fn start_level(&mut self) {
        self.route_level_events();

        let events = self.update_overlaps();
        let player = self.player.id();
        for slot in &mut self.enemies {
            let in_patrol = slot
                .enemy
                .patrol_trigger()
                .is_some_and(|id| self.triggers.is_overlapping(id, player));
            let in_attack = slot
                .enemy
                .attack_trigger()
                .is_some_and(|id| self.triggers.is_overlapping(id, player));
            slot.enemy.begin_play(in_attack, in_patrol);
        }
        self.route_trigger_events(&events, true);
        self.route_combat_events();
        self.route_level_events();

        self.loading.end_loading();
        self.route_loading_events();
    }

    fn release_controls(&mut self) {
        self.player.set_move_input(0.0);
        self.player.release_jump();
    }

    fn close_menus(&mut self) {
        for screen in [self.pause_menu.take(), self.end_screen.take()].into_iter().flatten() {
            self.hud.close_screen(screen);
        }
        self.hud.set_navigation_enabled(false);
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            frame: self.frame,
            elapsed: self.elapsed,
            level_state: self.level.level_state(),
            remaining_time: self.level.remaining_time(),
            player: CharacterSnapshot::of(&self.player),
            enemies: self
                .enemies
                .iter()
                .map(|slot| CharacterSnapshot::of(&slot.enemy))
                .collect(),
            camera_mode: self.camera.camera_mode(),
            camera_position: self.camera.get_camera_world_position(),
            music: self.audio.current_music().cloned(),
        }
    }

    pub fn debug_info(&self) -> String {
        format!(
            "Level: {:?} ({:.1}s left) | Enemies: {} | Triggers: {} | Camera: {:?}",
            self.level.level_state(),
            self.level.remaining_time(),
            self.enemies.len(),
            self.triggers.trigger_count(),
            self.camera.camera_mode()
        )
    }
}

impl<B: AudioBackend> std::fmt::Debug for GameWorld<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameWorld")
            .field("level_state", &self.level.level_state())
            .field("frame", &self.frame)
            .field("player", &self.player)
            .field("enemies", &self.enemies.len())
            .field("triggers", &self.triggers.trigger_count())
            .finish()
    }
}
