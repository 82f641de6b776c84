//! Rogue UI - Screen Stack Shell
//!
//! Widget rendering lives elsewhere; this crate tracks which screens are
//! on which layer and which one is active.
//!
//! # Features
//!
//! - Named layers, each a stack with only its top screen active
//! - Screens that close themselves on a generic back action
//! - HUD that pushes its default screen on begin play
//! - Loading screen hold flag with visibility observers
//! - Keyboard/gamepad navigation toggle
//!
//! # Example
//!
//! ```ignore
//! use rogue_ui::prelude::*;
//!
//! let mut layout = GameLayout::new();
//! layout.register_layer(LayerTag::game());
//! layout.register_layer(LayerTag::menu());
//!
//! let pause = layout.push_widget_to_layer_stack(&LayerTag::menu(), ActivatableScreen::new("pause_menu"));
//! layout.handle_back_action(&LayerTag::menu());
//! ```

pub mod hud;
pub mod layout;
pub mod loading;
pub mod navigation;
pub mod screen;

pub mod prelude {
    pub use crate::hud::{Hud, HudConfig};
    pub use crate::layout::{GameLayout, LayerTag};
    pub use crate::loading::{LoadingScreen, LoadingScreenVisibilityChanged};
    pub use crate::navigation::NavigationConfig;
    pub use crate::screen::{ActivatableScreen, ScreenId};
}

pub use prelude::*;
