//! Root layout with one screen stack per layer

use crate::screen::{ActivatableScreen, ScreenId};
use serde::{Deserialize, Serialize};

/// Layer name, e.g. `UI.Layer.Game`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerTag(String);

impl LayerTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// In-game HUD
    pub fn game() -> Self {
        Self::new("UI.Layer.Game")
    }

    pub fn game_menu() -> Self {
        Self::new("UI.Layer.GameMenu")
    }

    pub fn menu() -> Self {
        Self::new("UI.Layer.Menu")
    }

    pub fn modal() -> Self {
        Self::new("UI.Layer.Modal")
    }
}

impl std::fmt::Display for LayerTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
struct Layer {
    tag: LayerTag,
    stack: Vec<ActivatableScreen>,
}

impl Layer {
    fn activate_top(&mut self) {
        if let Some(top) = self.stack.last_mut() {
            top.activate();
        }
    }
}

/// Root widget holding the layer stacks. Layers keep registration order.
#[derive(Debug, Default)]
pub struct GameLayout {
    layers: Vec<Layer>,
    next_id: u64,
}

impl GameLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout with the game, game menu, menu and modal layers
    pub fn with_default_layers() -> Self {
        let mut layout = Self::new();
        for tag in [LayerTag::game(), LayerTag::game_menu(), LayerTag::menu(), LayerTag::modal()] {
            layout.register_layer(tag);
        }
        layout
    }

    /// Returns `false` if the layer already exists
    pub fn register_layer(&mut self, tag: LayerTag) -> bool {
        if self.has_layer(&tag) {
            log::warn!("layer {} registered twice", tag);
            return false;
        }
        self.layers.push(Layer {
            tag,
            stack: Vec::new(),
        });
        true
    }

    pub fn has_layer(&self, tag: &LayerTag) -> bool {
        self.layer(tag).is_some()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer(&self, tag: &LayerTag) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.tag == tag)
    }

    fn layer_mut(&mut self, tag: &LayerTag) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| &l.tag == tag)
    }

    /// Push `screen` on top of `layer` and make it the active one there
    pub fn push_widget_to_layer_stack(
        &mut self,
        layer: &LayerTag,
        mut screen: ActivatableScreen,
    ) -> Option<ScreenId> {
        self.next_id += 1;
        let id = ScreenId(self.next_id);

        let Some(target) = self.layer_mut(layer) else {
            log::warn!("cannot push '{}', layer {} is not registered", screen.name(), layer);
            return None;
        };

        if let Some(top) = target.stack.last_mut() {
            top.deactivate();
        }
        screen.attach(id);
        screen.activate();
        target.stack.push(screen);
        Some(id)
    }

    /// Remove the screen wherever it is. The screen below becomes active
    /// if the removed one was on top.
    pub fn find_and_remove_widget_from_layer(&mut self, id: ScreenId) -> Option<ActivatableScreen> {
        for layer in &mut self.layers {
            let Some(index) = layer.stack.iter().position(|s| s.id() == Some(id)) else {
                continue;
            };
            let mut removed = layer.stack.remove(index);
            removed.deactivate();
            layer.activate_top();
            return Some(removed);
        }
        None
    }

    /// Top screen of the layer
    pub fn active_screen(&self, layer: &LayerTag) -> Option<&ActivatableScreen> {
        self.layer(layer).and_then(|l| l.stack.last())
    }

    pub fn screen(&self, id: ScreenId) -> Option<&ActivatableScreen> {
        self.layers
            .iter()
            .flat_map(|l| l.stack.iter())
            .find(|s| s.id() == Some(id))
    }

    pub fn stack_len(&self, layer: &LayerTag) -> usize {
        self.layer(layer).map(|l| l.stack.len()).unwrap_or(0)
    }

    /// Give the layer's active screen the back action. Returns whether it
    /// was handled, in which case the screen has been closed.
    pub fn handle_back_action(&mut self, layer: &LayerTag) -> bool {
        let Some(id) = self
            .active_screen(layer)
            .filter(|s| s.handle_back_action())
            .and_then(|s| s.id())
        else {
            return false;
        };
        self.find_and_remove_widget_from_layer(id).is_some()
    }

    /// Back action to the topmost layer with a screen on it
    pub fn handle_back_action_topmost(&mut self) -> bool {
        let Some(tag) = self
            .layers
            .iter()
            .rev()
            .find(|l| !l.stack.is_empty())
            .map(|l| l.tag.clone())
        else {
            return false;
        };
        self.handle_back_action(&tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_layer_once() {
        let mut layout = GameLayout::new();
        assert!(layout.register_layer(LayerTag::game()));
        assert!(!layout.register_layer(LayerTag::game()));
        assert_eq!(layout.layer_count(), 1);
    }

    #[test]
    fn test_push_to_unknown_layer() {
        let mut layout = GameLayout::new();
        let id = layout.push_widget_to_layer_stack(&LayerTag::menu(), ActivatableScreen::new("pause"));
        assert!(id.is_none());
    }

    #[test]
    fn test_only_top_screen_active() {
        let mut layout = GameLayout::with_default_layers();
        let menu = LayerTag::menu();
        let first = layout
            .push_widget_to_layer_stack(&menu, ActivatableScreen::new("pause"))
            .unwrap();
        let second = layout
            .push_widget_to_layer_stack(&menu, ActivatableScreen::new("options"))
            .unwrap();

        assert_eq!(layout.active_screen(&menu).and_then(|s| s.id()), Some(second));
        assert!(!layout.screen(first).unwrap().is_active());
        assert!(layout.screen(second).unwrap().is_active());

        let removed = layout.find_and_remove_widget_from_layer(second).unwrap();
        assert_eq!(removed.name(), "options");
        assert!(layout.screen(first).unwrap().is_active());
        assert_eq!(layout.stack_len(&menu), 1);
    }

    #[test]
    fn test_remove_below_top_keeps_top_active() {
        let mut layout = GameLayout::with_default_layers();
        let menu = LayerTag::menu();
        let first = layout
            .push_widget_to_layer_stack(&menu, ActivatableScreen::new("a"))
            .unwrap();
        let second = layout
            .push_widget_to_layer_stack(&menu, ActivatableScreen::new("b"))
            .unwrap();

        layout.find_and_remove_widget_from_layer(first);
        assert!(layout.screen(second).unwrap().is_active());
        assert!(layout.find_and_remove_widget_from_layer(first).is_none());
    }

    #[test]
    fn test_back_action_closes_screen() {
        let mut layout = GameLayout::with_default_layers();
        let game = LayerTag::game();
        let menu = LayerTag::menu();
        layout.push_widget_to_layer_stack(&game, ActivatableScreen::new("hud").with_back_handler(false));
        layout.push_widget_to_layer_stack(&menu, ActivatableScreen::new("pause"));

        assert!(layout.handle_back_action_topmost());
        assert_eq!(layout.stack_len(&menu), 0);

        assert!(!layout.handle_back_action_topmost());
        assert_eq!(layout.stack_len(&game), 1);
    }
}
