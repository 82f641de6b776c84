//! Rogue Character - Players and Enemies
//!
//! Characters compose a [`CharacterMovement`](rogue_movement::CharacterMovement)
//! with a [`CombatState`](rogue_combat::CombatState) and layer role-specific
//! behavior on top.
//!
//! # Features
//!
//! - Shared hit/launch/kill/death flow, including corpses that keep falling
//!   until they land before freezing
//! - Player: hit stun, hit invulnerability, speed powerup, stomp validation
//!   and enemy bounce jumps
//! - Enemy: hit stun, touch damage with knockback, stomp handling, patrol
//!   routes and patrol/attack zones
//! - Collision responses per channel so powerups can pass through enemies
//!
//! # Example
//!
//! ```ignore
//! use rogue_character::prelude::*;
//!
//! let mut player = Player::new(EntityId::new(1), PlayerConfig::default(), spawn);
//! let mut enemy = Enemy::new(EntityId::new(2), EnemyConfig::default(), enemy_spawn);
//!
//! if player.is_enemy_jump_valid(&enemy.hurt_box_world()) {
//!     enemy.hurt_begin_overlap(&mut player, &enemy.hurt_box_world(), 300.0);
//! }
//! ```

pub mod character;
pub mod collision;
pub mod enemy;
pub mod hooks;
pub mod player;

pub mod prelude {
    pub use crate::character::{Character, Combatant};
    pub use crate::collision::{CollisionProfile, CollisionResponse};
    pub use crate::enemy::{Enemy, EnemyConfig, EnemyInit, EnemyTimer, PatrolRoute};
    pub use crate::hooks::{EnemyHooks, PlayerHooks};
    pub use crate::player::{Player, PlayerConfig, PlayerTimer};
    pub use rogue_core::EntityId;
    pub use rogue_math::Vec3;
}

pub use prelude::*;
