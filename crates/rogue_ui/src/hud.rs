//! HUD bootstrap

use crate::layout::{GameLayout, LayerTag};
use crate::navigation::NavigationConfig;
use crate::screen::{ActivatableScreen, ScreenId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Layer the default screen goes on
    pub default_layer: LayerTag,
    /// Screen pushed on begin play; none skips it
    pub default_screen: Option<String>,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            default_layer: LayerTag::game(),
            default_screen: Some("hud".to_string()),
        }
    }
}

/// Owns the root layout for the local player
#[derive(Debug)]
pub struct Hud {
    config: HudConfig,
    layout: GameLayout,
    navigation: NavigationConfig,
    default_screen: Option<ScreenId>,
}

impl Hud {
    pub fn new(config: HudConfig) -> Self {
        Self {
            config,
            layout: GameLayout::with_default_layers(),
            navigation: NavigationConfig::default(),
            default_screen: None,
        }
    }

    pub fn layout(&self) -> &GameLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut GameLayout {
        &mut self.layout
    }

    pub fn navigation(&self) -> &NavigationConfig {
        &self.navigation
    }

    pub fn set_navigation_enabled(&mut self, enabled: bool) {
        self.navigation.set_navigation_enabled(enabled);
    }

    pub fn default_screen(&self) -> Option<ScreenId> {
        self.default_screen
    }

    /// Push the default screen. Later screens stack on top of it.
    pub fn begin_play(&mut self) {
        if self.default_screen.is_some() {
            return;
        }
        let Some(name) = self.config.default_screen.clone() else {
            log::warn!("no default HUD screen configured");
            return;
        };
        let screen = ActivatableScreen::new(name).with_back_handler(false);
        self.default_screen = self
            .layout
            .push_widget_to_layer_stack(&self.config.default_layer, screen);
    }

    /// Push a screen for the player onto `layer`
    pub fn push_content_to_layer(&mut self, layer: &LayerTag, name: &str) -> Option<ScreenId> {
        self.layout
            .push_widget_to_layer_stack(layer, ActivatableScreen::new(name))
    }

    pub fn close_screen(&mut self, id: ScreenId) -> bool {
        self.layout.find_and_remove_widget_from_layer(id).is_some()
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new(HudConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_play_pushes_default_screen() {
        let mut hud = Hud::default();
        hud.begin_play();
        hud.begin_play();

        let layer = LayerTag::game();
        assert_eq!(hud.layout().stack_len(&layer), 1);
        assert_eq!(hud.layout().active_screen(&layer).map(|s| s.name()), Some("hud"));
        assert!(hud.default_screen().is_some());
    }

    #[test]
    fn test_pause_menu_round_trip() {
        let mut hud = Hud::default();
        hud.begin_play();
        let menu = LayerTag::game_menu();
        let pause = hud.push_content_to_layer(&menu, "pause_menu").unwrap();

        assert!(hud.layout_mut().handle_back_action_topmost());
        assert!(hud.layout().screen(pause).is_none());
        assert!(!hud.close_screen(pause));
        assert_eq!(hud.layout().stack_len(&LayerTag::game()), 1);
    }
}
