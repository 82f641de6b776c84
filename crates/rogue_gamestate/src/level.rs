//! Level state machine

use crate::state::LevelState;
use rogue_core::TimerManager;
use rogue_event::{EventBus, SubscriberId};
use serde::{Deserialize, Serialize};

/// Seconds left that still count as out of time
const COUNTDOWN_TOLERANCE: f64 = 1e-4;

/// Observer registration handle
pub type ObserverId = SubscriberId;

/// Level tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Countdown budget in seconds
    pub time_per_level: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self { time_per_level: 60.0 }
    }
}

/// Notifications raised by the level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEvent {
    /// Begin play finished; the level is set up
    Initialized,
    StateChanged { previous: LevelState, current: LevelState },
}

/// Level timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelTimer {
    BossDefeatedDelay,
}

/// Level lifecycle, countdown and deferred victory
pub struct LevelStateMachine {
    config: LevelConfig,
    state: LevelState,
    remaining_time: f32,
    /// Running time this level, summed in f64 so a long countdown ends on
    /// the frame its duration adds up to
    accumulated_time: f64,
    timers: TimerManager<LevelTimer>,
    observers: EventBus,
    /// Events since the last drain, for owners that react with `&mut` access
    pending: Vec<LevelEvent>,
}

impl LevelStateMachine {
    pub fn new(config: LevelConfig) -> Self {
        Self {
            remaining_time: config.time_per_level,
            accumulated_time: 0.0,
            config,
            state: LevelState::Preload,
            timers: TimerManager::new(),
            observers: EventBus::new(),
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn level_state(&self) -> LevelState {
        self.state
    }

    pub fn remaining_time(&self) -> f32 {
        self.remaining_time
    }

    pub fn accumulated_time(&self) -> f32 {
        self.accumulated_time as f32
    }

    pub fn has_match_ended(&self) -> bool {
        self.state.is_terminal()
    }

    /// Boss victory is pending
    pub fn is_victory_pending(&self) -> bool {
        self.timers.is_active(&LevelTimer::BossDefeatedDelay)
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Called synchronously for every level event
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: Fn(&LevelEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe::<LevelEvent, F>(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.subscriber_count::<LevelEvent>()
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<LevelEvent> {
        std::mem::take(&mut self.pending)
    }

    fn broadcast(&mut self, event: LevelEvent) {
        self.observers.publish(event);
        self.pending.push(event);
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Everything is constructed: get ready, which starts the level
    pub fn begin_play(&mut self) {
        self.set_level_state(LevelState::Ready);
        self.broadcast(LevelEvent::Initialized);
    }

    /// Move to `new_state`. Setting the current state again does nothing.
    pub fn set_level_state(&mut self, new_state: LevelState) {
        if self.state == new_state {
            return;
        }

        let previous = self.state;
        self.state = new_state;
        log::info!("level state {:?} -> {:?}", previous, new_state);

        self.broadcast(LevelEvent::StateChanged {
            previous,
            current: new_state,
        });

        if new_state == LevelState::Ready {
            self.handle_ready();
        }
    }

    fn handle_ready(&mut self) {
        self.remaining_time = self.config.time_per_level;
        self.accumulated_time = 0.0;
        self.set_level_state(LevelState::Running);
    }

    pub fn pause_game(&mut self) {
        if self.state == LevelState::Running {
            self.set_level_state(LevelState::Paused);
        }
    }

    pub fn unpause_game(&mut self) {
        if self.state == LevelState::Paused {
            self.set_level_state(LevelState::Running);
        }
    }

    fn end_match(&mut self, result: LevelState) {
        if self.has_match_ended() {
            log::debug!("match already ended as {:?}, ignoring {:?}", self.state, result);
            return;
        }
        self.timers.clear_all();
        self.set_level_state(result);
    }

    /// The player reached the level exit
    pub fn complete_level(&mut self) {
        self.end_match(LevelState::Victory);
    }

    pub fn player_out_of_bounds(&mut self) {
        self.end_match(LevelState::GameOver);
    }

    pub fn player_death(&mut self) {
        self.end_match(LevelState::GameOver);
    }

    /// Win after `delay` seconds, or now when the delay is not positive.
    /// Calling again re-arms the delay.
    pub fn boss_defeated(&mut self, delay: f32) {
        if self.has_match_ended() {
            return;
        }
        if !(delay > 0.0) {
            self.boss_defeated_timer_complete();
            return;
        }
        self.timers.set_timer(LevelTimer::BossDefeatedDelay, delay);
    }

    fn boss_defeated_timer_complete(&mut self) {
        self.end_match(LevelState::Victory);
    }

    /// Restart: back to preload with timers dropped, then begin play again
    pub fn reset_current_level(&mut self) {
        self.timers.clear_all();
        self.set_level_state(LevelState::Preload);
        self.begin_play();
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Advance timers and the countdown. Nothing advances while paused.
    pub fn tick(&mut self, delta: f32) {
        if self.state == LevelState::Paused || delta <= 0.0 {
            return;
        }

        for timer in self.timers.tick(delta) {
            match timer {
                LevelTimer::BossDefeatedDelay => self.boss_defeated_timer_complete(),
            }
        }

        if self.state != LevelState::Running {
            return;
        }

        self.accumulated_time += f64::from(delta);
        let remaining = f64::from(self.config.time_per_level) - self.accumulated_time;
        self.remaining_time = remaining.max(0.0) as f32;

        if remaining <= COUNTDOWN_TOLERANCE {
            self.remaining_time = 0.0;
            log::info!("level timer ran out after {:.2}s", self.accumulated_time);
            self.set_level_state(LevelState::GameOver);
        }
    }
}

impl Default for LevelStateMachine {
    fn default() -> Self {
        Self::new(LevelConfig::default())
    }
}

impl std::fmt::Debug for LevelStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelStateMachine")
            .field("state", &self.state)
            .field("remaining_time", &self.remaining_time)
            .field("accumulated_time", &self.accumulated_time)
            .field("observers", &self.observer_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use parking_lot::Mutex;
    use std::sync::Arc;

    const DT: f32 = 1.0 / 60.0;

    fn running() -> LevelStateMachine {
        let mut level = LevelStateMachine::default();
        level.begin_play();
        level
    }

    fn changes(events: &[LevelEvent]) -> Vec<LevelState> {
        events
            .iter()
            .filter_map(|e| match e {
                LevelEvent::StateChanged { current, .. } => Some(*current),
                LevelEvent::Initialized => None,
            })
            .collect()
    }

    #[test]
    fn test_begin_play_runs() {
        let mut level = LevelStateMachine::default();
        level.begin_play();
        assert_eq!(level.level_state(), LevelState::Running);
        assert_relative_eq!(level.remaining_time(), 60.0);

        let events = level.drain_events();
        assert_eq!(changes(&events), vec![LevelState::Ready, LevelState::Running]);
        assert_eq!(events.last(), Some(&LevelEvent::Initialized));
    }

    #[test]
    fn test_countdown_to_game_over() {
        let mut level = running();
        for _ in 0..3599 {
            level.tick(DT);
        }
        assert_eq!(level.level_state(), LevelState::Running);
        assert!(level.remaining_time() > 0.0);

        level.tick(DT);
        assert_eq!(level.level_state(), LevelState::GameOver);
        assert_eq!(level.remaining_time(), 0.0);
        assert_relative_eq!(level.accumulated_time(), 60.0, epsilon = 1e-3);
    }

    #[test]
    fn test_same_state_not_broadcast_twice() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut level = LevelStateMachine::default();
        let sink = seen.clone();
        level.subscribe(move |event| sink.lock().push(*event));

        level.begin_play();
        level.set_level_state(LevelState::Running);
        level.set_level_state(LevelState::Running);
        level.pause_game();
        level.pause_game();

        let states = changes(&seen.lock());
        assert_eq!(states, vec![LevelState::Ready, LevelState::Running, LevelState::Paused]);
    }

    #[test]
    fn test_pause_guards() {
        let mut level = LevelStateMachine::default();
        level.pause_game();
        assert_eq!(level.level_state(), LevelState::Preload);

        level.begin_play();
        level.unpause_game();
        assert_eq!(level.level_state(), LevelState::Running);

        level.pause_game();
        let remaining = level.remaining_time();
        level.tick(1.0);
        assert_eq!(level.remaining_time(), remaining);

        level.unpause_game();
        assert_eq!(level.level_state(), LevelState::Running);

        level.player_death();
        level.pause_game();
        assert_eq!(level.level_state(), LevelState::GameOver);
    }

    #[test]
    fn test_boss_defeated_delay() {
        let mut level = running();
        level.boss_defeated(1.0);
        assert!(level.is_victory_pending());

        for _ in 0..30 {
            level.tick(DT);
        }
        assert_eq!(level.level_state(), LevelState::Running);

        for _ in 0..35 {
            level.tick(DT);
        }
        assert_eq!(level.level_state(), LevelState::Victory);
        assert!(level.has_match_ended());
    }

    #[test]
    fn test_boss_defeated_immediately() {
        let mut level = running();
        level.boss_defeated(0.0);
        assert_eq!(level.level_state(), LevelState::Victory);
    }

    #[test]
    fn test_match_end_is_final() {
        let mut level = running();
        level.complete_level();
        level.player_out_of_bounds();
        level.player_death();
        assert_eq!(level.level_state(), LevelState::Victory);

        let mut level = running();
        level.boss_defeated(0.5);
        level.player_death();
        for _ in 0..60 {
            level.tick(DT);
        }
        assert_eq!(level.level_state(), LevelState::GameOver);
    }

    #[test]
    fn test_reset_current_level() {
        let mut level = running();
        for _ in 0..600 {
            level.tick(DT);
        }
        level.player_death();
        level.drain_events();

        level.reset_current_level();
        assert_eq!(level.level_state(), LevelState::Running);
        assert_relative_eq!(level.remaining_time(), 60.0);
        assert_eq!(level.accumulated_time(), 0.0);

        let states = changes(&level.drain_events());
        assert_eq!(states, vec![LevelState::Preload, LevelState::Ready, LevelState::Running]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut level = LevelStateMachine::default();
        let id = level.subscribe(|_| {});
        assert_eq!(level.observer_count(), 1);
        assert!(level.unsubscribe(id));
        assert!(!level.unsubscribe(id));
        assert_eq!(level.observer_count(), 0);
    }
}
