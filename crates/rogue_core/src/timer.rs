//! Frame-driven timers
//!
//! Timers are keyed by a caller-chosen id. Arming an id that already has a
//! pending timer replaces the old deadline, so a re-armed powerup or stun
//! always runs its full duration from the moment of re-arming. Expired ids
//! are returned from [`TimerManager::tick`] and the owner dispatches them;
//! the manager never calls back into its owner.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Handle identifying one arming of a timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    deadline: f64,
    duration: f32,
}

/// Timer manager keyed by `K`
#[derive(Debug)]
pub struct TimerManager<K> {
    timers: HashMap<K, PendingTimer>,
    /// Accumulated world time in seconds
    now: f64,
    next_handle: u64,
}

impl<K: Eq + Hash + Clone + Debug> TimerManager<K> {
    /// Create an empty timer manager
    pub fn new() -> Self {
        Self {
            timers: HashMap::new(),
            now: 0.0,
            next_handle: 1,
        }
    }

    /// Arm `key` to fire after `duration` seconds.
    ///
    /// Replaces any pending timer with the same key. A non-positive or
    /// non-finite duration clears the timer instead and returns `None`.
    pub fn set_timer(&mut self, key: K, duration: f32) -> Option<TimerHandle> {
        if !duration.is_finite() || duration <= 0.0 {
            self.clear_timer(&key);
            return None;
        }

        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        let replaced = self.timers.insert(
            key.clone(),
            PendingTimer {
                handle,
                deadline: self.now + f64::from(duration),
                duration,
            },
        );
        if replaced.is_some() {
            log::trace!("timer {:?} re-armed for {}s", key, duration);
        }

        Some(handle)
    }

    /// Cancel a pending timer. Returns true if one was pending.
    pub fn clear_timer(&mut self, key: &K) -> bool {
        self.timers.remove(key).is_some()
    }

    /// Cancel every pending timer
    pub fn clear_all(&mut self) {
        self.timers.clear();
    }

    /// Whether `key` has a pending timer
    pub fn is_active(&self, key: &K) -> bool {
        self.timers.contains_key(key)
    }

    /// Whether this exact arming is still pending (not fired, cleared or re-armed)
    pub fn is_handle_active(&self, handle: TimerHandle) -> bool {
        self.timers.values().any(|t| t.handle == handle)
    }

    /// Seconds left before `key` fires
    pub fn remaining(&self, key: &K) -> Option<f32> {
        self.timers
            .get(key)
            .map(|t| (t.deadline - self.now).max(0.0) as f32)
    }

    /// Seconds since `key` was armed
    pub fn elapsed(&self, key: &K) -> Option<f32> {
        self.timers
            .get(key)
            .map(|t| (f64::from(t.duration) - (t.deadline - self.now)).max(0.0) as f32)
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Accumulated time seen by this manager
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance time and return expired keys in deadline order
    pub fn tick(&mut self, delta: f32) -> Vec<K> {
        if delta > 0.0 && delta.is_finite() {
            self.now += f64::from(delta);
        }

        let now = self.now;
        let mut expired: Vec<(f64, K)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .map(|(k, t)| (t.deadline, k.clone()))
            .collect();

        expired.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, key) in &expired {
            self.timers.remove(key);
        }

        expired.into_iter().map(|(_, key)| key).collect()
    }
}

impl<K: Eq + Hash + Clone + Debug> Default for TimerManager<K> {
    fn default() -> Self {
        Self::new()
    }
}
