//! Role-specific presentation hooks

use rogue_combat::{CombatHooks, NoHooks};

/// Player reactions. Every method defaults to doing nothing.
pub trait PlayerHooks: CombatHooks {
    /// Bounced off an enemy
    fn on_enemy_jump(&mut self) {}

    /// Speed powerup started or was re-armed
    fn on_speed_powerup_activated(&mut self, _duration: f32) {}

    fn on_hit_points_added(&mut self, _total: u32) {}
}

/// Enemy reactions. Every method defaults to doing nothing.
pub trait EnemyHooks: CombatHooks {
    fn on_hit_stun(&mut self) {}
    fn on_stop_hit_stun(&mut self) {}
    fn on_setup_patrol(&mut self) {}
    fn on_player_entered_patrol_volume(&mut self) {}
    fn on_player_exited_patrol_volume(&mut self) {}
    fn on_player_entered_attack_volume(&mut self) {}
    fn on_player_exited_attack_volume(&mut self) {}
}

impl PlayerHooks for NoHooks {}
impl EnemyHooks for NoHooks {}
