//! Keyboard and gamepad focus navigation

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub tab_navigation: bool,
    pub key_navigation: bool,
    pub analog_navigation: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            tab_navigation: true,
            key_navigation: true,
            analog_navigation: true,
        }
    }
}

impl NavigationConfig {
    /// Switch every navigation source at once
    pub fn set_navigation_enabled(&mut self, enabled: bool) {
        self.tab_navigation = enabled;
        self.key_navigation = enabled;
        self.analog_navigation = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.tab_navigation || self.key_navigation || self.analog_navigation
    }
}
