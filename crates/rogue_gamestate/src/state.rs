//! Level states

use serde::{Deserialize, Serialize};

/// Lifecycle of a loaded level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LevelState {
    /// Loaded, objects still being set up
    #[default]
    Preload,
    /// Set up; transient level data is reset here
    Ready,
    /// Gameplay and countdown running
    Running,
    Paused,
    GameOver,
    Victory,
}

impl LevelState {
    /// The match is over
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }

    /// Gameplay is in progress, paused or not
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_properties() {
        assert!(LevelState::GameOver.is_terminal());
        assert!(LevelState::Victory.is_terminal());
        assert!(!LevelState::Paused.is_terminal());
        assert!(LevelState::Paused.is_in_progress());
        assert!(!LevelState::Ready.is_in_progress());
        assert_eq!(LevelState::default(), LevelState::Preload);
    }
}
