//! Activatable screens

use serde::{Deserialize, Serialize};

/// Identifier handed out when a screen is pushed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenId(pub u64);

/// A screen that can sit on a layer stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatableScreen {
    id: Option<ScreenId>,
    name: String,
    back_handler: bool,
    active: bool,
}

impl ActivatableScreen {
    /// Screens handle the generic back action unless told otherwise
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            back_handler: true,
            active: false,
        }
    }

    pub fn with_back_handler(mut self, back_handler: bool) -> Self {
        self.back_handler = back_handler;
        self
    }

    /// Assigned once pushed to a layer
    pub fn id(&self) -> Option<ScreenId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_back_handler(&self) -> bool {
        self.back_handler
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a back press should close this screen
    pub fn handle_back_action(&self) -> bool {
        self.back_handler && self.active
    }

    pub(crate) fn attach(&mut self, id: ScreenId) {
        self.id = Some(id);
    }

    pub(crate) fn activate(&mut self) {
        if !self.active {
            log::debug!("screen '{}' activated", self.name);
        }
        self.active = true;
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }
}
