//! Mix classes and volume buses

use serde::{Deserialize, Serialize};

/// Sound class a volume applies to. `Main` is the parent of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MixClass {
    Main,
    Music,
    Sfx,
}

impl MixClass {
    pub const ALL: [MixClass; 3] = [MixClass::Main, MixClass::Music, MixClass::Sfx];

    pub fn parent(self) -> Option<MixClass> {
        match self {
            MixClass::Main => None,
            MixClass::Music | MixClass::Sfx => Some(MixClass::Main),
        }
    }
}

/// One class volume, fading linearly toward its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixBus {
    volume: f32,
    start: f32,
    target: f32,
    fade_time: f32,
    fade_elapsed: f32,
}

impl MixBus {
    pub fn new(volume: f32) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        Self {
            volume,
            start: volume,
            target: volume,
            fade_time: 0.0,
            fade_elapsed: 0.0,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_fading(&self) -> bool {
        self.fade_elapsed < self.fade_time
    }

    /// Fade to `volume` over `fade_in` seconds. A non-positive fade applies at once.
    pub fn set_target(&mut self, volume: f32, fade_in: f32) {
        let volume = if volume.is_finite() { volume.clamp(0.0, 1.0) } else { 0.0 };
        self.target = volume;
        if fade_in > 0.0 {
            self.start = self.volume;
            self.fade_time = fade_in;
            self.fade_elapsed = 0.0;
        } else {
            self.volume = volume;
            self.start = volume;
            self.fade_time = 0.0;
            self.fade_elapsed = 0.0;
        }
    }

    pub fn update(&mut self, delta: f32) {
        if !self.is_fading() {
            return;
        }
        self.fade_elapsed = (self.fade_elapsed + delta).min(self.fade_time);
        let alpha = self.fade_elapsed / self.fade_time;
        self.volume = self.start + (self.target - self.start) * alpha;
    }
}

impl Default for MixBus {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// The three class buses
#[derive(Debug, Clone, Default)]
pub struct MixBuses {
    main: MixBus,
    music: MixBus,
    sfx: MixBus,
}

impl MixBuses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bus(&self, class: MixClass) -> &MixBus {
        match class {
            MixClass::Main => &self.main,
            MixClass::Music => &self.music,
            MixClass::Sfx => &self.sfx,
        }
    }

    pub fn bus_mut(&mut self, class: MixClass) -> &mut MixBus {
        match class {
            MixClass::Main => &mut self.main,
            MixClass::Music => &mut self.music,
            MixClass::Sfx => &mut self.sfx,
        }
    }

    pub fn set_volume(&mut self, class: MixClass, volume: f32, fade_in: f32) {
        self.bus_mut(class).set_target(volume, fade_in);
    }

    /// Class volume multiplied through its parent chain
    pub fn effective_volume(&self, class: MixClass) -> f32 {
        let mut volume = self.bus(class).volume();
        let mut parent = class.parent();
        while let Some(p) = parent {
            volume *= self.bus(p).volume();
            parent = p.parent();
        }
        volume
    }

    pub fn update(&mut self, delta: f32) {
        for class in MixClass::ALL {
            self.bus_mut(class).update(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_immediate_volume() {
        let mut bus = MixBus::default();
        bus.set_target(0.4, 0.0);
        assert_eq!(bus.volume(), 0.4);
        assert!(!bus.is_fading());
    }

    #[test]
    fn test_fade() {
        let mut bus = MixBus::new(1.0);
        bus.set_target(0.0, 2.0);
        assert!(bus.is_fading());

        bus.update(0.5);
        assert_relative_eq!(bus.volume(), 0.75);
        bus.update(5.0);
        assert_eq!(bus.volume(), 0.0);
        assert!(!bus.is_fading());
    }

    #[test]
    fn test_refade_starts_from_current() {
        let mut bus = MixBus::new(0.0);
        bus.set_target(1.0, 1.0);
        bus.update(0.5);
        bus.set_target(0.0, 1.0);
        bus.update(0.5);
        assert_relative_eq!(bus.volume(), 0.25);
    }

    #[test]
    fn test_clamped() {
        let mut bus = MixBus::default();
        bus.set_target(3.0, 0.0);
        assert_eq!(bus.volume(), 1.0);
        bus.set_target(f32::NAN, 0.0);
        assert_eq!(bus.volume(), 0.0);
    }

    #[test]
    fn test_main_scales_children() {
        let mut buses = MixBuses::new();
        buses.set_volume(MixClass::Main, 0.5, 0.0);
        buses.set_volume(MixClass::Music, 0.8, 0.0);

        assert_relative_eq!(buses.effective_volume(MixClass::Music), 0.4);
        assert_relative_eq!(buses.effective_volume(MixClass::Sfx), 0.5);
        assert_relative_eq!(buses.effective_volume(MixClass::Main), 0.5);
    }
}
