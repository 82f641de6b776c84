//! Presentation hooks

/// Reactions a character's presentation layer can override.
/// Every method defaults to doing nothing.
pub trait CombatHooks {
    /// A hit was taken and the character survived or died from it
    fn on_character_hit(&mut self) {}

    /// Death happened
    fn on_character_death(&mut self) {}

    /// Play the hit effect. Also fired on death, since no hit animation
    /// plays to trigger it.
    fn on_hit_effect(&mut self) {}
}

/// Hooks that do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl CombatHooks for NoHooks {}
