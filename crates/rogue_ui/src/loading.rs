//! Loading screen visibility

use rogue_event::{EventBus, SubscriberId};

/// Raised when the loading screen appears or goes away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingScreenVisibilityChanged {
    pub visible: bool,
}

/// Decides whether the loading screen is up and tells observers when
/// that changes
#[derive(Default)]
pub struct LoadingScreen {
    hold: bool,
    loading: bool,
    visible: bool,
    observers: EventBus,
    pending: Vec<LoadingScreenVisibilityChanged>,
}

impl LoadingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the loading screen up after loading finishes, e.g. for a
    /// transition the game controls
    pub fn hold_loading_screen(&mut self, hold: bool) {
        self.hold = hold;
        self.update();
    }

    pub fn should_hold_loading_screen(&self) -> bool {
        self.hold
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.update();
    }

    pub fn end_loading(&mut self) {
        self.loading = false;
        self.update();
    }

    /// Reason the loading screen must be shown, if any
    pub fn should_show(&self) -> Option<&'static str> {
        if self.loading {
            Some("level is loading")
        } else if self.hold {
            Some("loading screen is held")
        } else {
            None
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Notifies observers only on a real change
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        log::debug!("loading screen visible: {}", visible);

        let event = LoadingScreenVisibilityChanged { visible };
        self.observers.publish(event);
        self.pending.push(event);
    }

    fn update(&mut self) {
        let show = self.should_show().is_some();
        self.set_visible(show);
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriberId
    where
        F: Fn(&LoadingScreenVisibilityChanged) + Send + Sync + 'static,
    {
        self.observers.subscribe::<LoadingScreenVisibilityChanged, F>(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Visibility changes since the last drain
    pub fn drain_events(&mut self) -> Vec<LoadingScreenVisibilityChanged> {
        std::mem::take(&mut self.pending)
    }
}

impl std::fmt::Debug for LoadingScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingScreen")
            .field("hold", &self.hold)
            .field("loading", &self.loading)
            .field("visible", &self.visible)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_hold_keeps_screen_up() {
        let mut screen = LoadingScreen::new();
        screen.begin_loading();
        screen.hold_loading_screen(true);
        screen.end_loading();
        assert!(screen.is_visible());
        assert_eq!(screen.should_show(), Some("loading screen is held"));

        screen.hold_loading_screen(false);
        assert!(!screen.is_visible());
        assert_eq!(screen.should_show(), None);
    }

    #[test]
    fn test_observers_see_changes_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut screen = LoadingScreen::new();
        screen.subscribe(move |e| sink.lock().push(e.visible));

        screen.begin_loading();
        screen.set_visible(true);
        screen.end_loading();
        screen.end_loading();

        assert_eq!(*seen.lock(), vec![true, false]);
        assert_eq!(screen.drain_events().len(), 2);
        assert!(screen.drain_events().is_empty());
    }
}
