//! Per-channel collision responses

use rogue_triggers::CollisionChannel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a body responds to another channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionResponse {
    Ignore,
    Overlap,
    Block,
}

/// Collision setup of a character's capsule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionProfile {
    /// Channel of the capsule itself
    pub object_channel: CollisionChannel,
    /// Collision as a whole; a frozen corpse has none
    pub enabled: bool,
    responses: HashMap<CollisionChannel, CollisionResponse>,
}

impl CollisionProfile {
    /// Overlaps everything by default
    pub fn new(object_channel: CollisionChannel) -> Self {
        Self {
            object_channel,
            enabled: true,
            responses: HashMap::new(),
        }
    }

    pub fn with_response(mut self, channel: CollisionChannel, response: CollisionResponse) -> Self {
        self.responses.insert(channel, response);
        self
    }

    pub fn response_to(&self, channel: CollisionChannel) -> CollisionResponse {
        self.responses
            .get(&channel)
            .copied()
            .unwrap_or(CollisionResponse::Overlap)
    }

    pub fn set_response(&mut self, channel: CollisionChannel, response: CollisionResponse) {
        self.responses.insert(channel, response);
    }

    /// Whether contact with `channel` should produce overlap events
    pub fn interacts_with(&self, channel: CollisionChannel) -> bool {
        self.enabled && self.response_to(channel) != CollisionResponse::Ignore
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_overlap() {
        let profile = CollisionProfile::new(CollisionChannel::Player);
        assert_eq!(profile.response_to(CollisionChannel::Enemy), CollisionResponse::Overlap);
        assert!(profile.interacts_with(CollisionChannel::Enemy));
    }

    #[test]
    fn test_ignore_and_disable() {
        let mut profile = CollisionProfile::new(CollisionChannel::Player)
            .with_response(CollisionChannel::Projectile, CollisionResponse::Ignore);
        assert!(!profile.interacts_with(CollisionChannel::Projectile));
        profile.enabled = false;
        assert!(!profile.interacts_with(CollisionChannel::Enemy));
    }
}
