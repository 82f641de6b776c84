//! # rogue_event - Observer Lists
//!
//! Gameplay notifications without engine delegates:
//! - `EventBus`: typed observer lists. `publish` calls every observer of
//!   the event's type before returning, highest priority first
//! - `EventChannel`: a single-type queue that producers fill during a frame
//!   and the owner drains at a fixed point in its tick
//!
//! ```ignore
//! let mut bus = EventBus::new();
//! let id = bus.subscribe(|e: &LevelStateChanged| log::info!("{:?}", e.state));
//! bus.publish(LevelStateChanged { state: LevelState::Running });
//! bus.unsubscribe(id);
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use crossbeam_channel::{Receiver, Sender};

/// Observer priority. Higher runs first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    Low = 0,
    #[default]
    Normal = 1,
    High = 2,
}

/// Anything that can travel through a bus or channel
pub trait Event: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Event for T {}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(pub u64);

type Observer = Box<dyn Fn(&dyn Any) + Send + Sync>;

struct Subscription {
    id: SubscriberId,
    priority: Priority,
    observer: Observer,
}

/// Typed observer lists keyed by event type
#[derive(Default)]
pub struct EventBus {
    observers: HashMap<TypeId, Vec<Subscription>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer at [`Priority::Normal`]
    pub fn subscribe<E: Event, F>(&mut self, observer: F) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe_with_priority(observer, Priority::Normal)
    }

    /// Add an observer. Observers with equal priority run in subscription order.
    pub fn subscribe_with_priority<E: Event, F>(&mut self, observer: F, priority: Priority) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.next_id += 1;
        let id = SubscriberId(self.next_id);

        let list = self.observers.entry(TypeId::of::<E>()).or_default();
        let at = list.partition_point(|s| s.priority >= priority);
        list.insert(
            at,
            Subscription {
                id,
                priority,
                observer: Box::new(move |any: &dyn Any| {
                    if let Some(event) = any.downcast_ref::<E>() {
                        observer(event);
                    }
                }),
            },
        );

        id
    }

    /// Remove an observer. Returns false for unknown ids.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        for list in self.observers.values_mut() {
            if let Some(index) = list.iter().position(|s| s.id == id) {
                list.remove(index);
                return true;
            }
        }
        false
    }

    /// Call every observer of `E` now
    pub fn publish<E: Event>(&self, event: E) {
        let Some(list) = self.observers.get(&TypeId::of::<E>()) else {
            return;
        };
        log::trace!("publishing {} to {} observers", std::any::type_name::<E>(), list.len());
        for subscription in list {
            (subscription.observer)(&event);
        }
    }

    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.observers.get(&TypeId::of::<E>()).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.observers.values().all(Vec::is_empty)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("event_types", &self.observers.len())
            .field("observers", &self.observers.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

/// Queue of one event type
pub struct EventChannel<E: Event> {
    sender: Sender<E>,
    receiver: Receiver<E>,
}

impl<E: Event> EventChannel<E> {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    pub fn send(&self, event: E) {
        // The receiver lives in self, so the channel is never disconnected
        let _ = self.sender.send(event);
    }

    /// A producer handle that can outlive the borrow of the channel
    pub fn sender(&self) -> Sender<E> {
        self.sender.clone()
    }

    /// Take everything queued so far, oldest first
    pub fn drain(&self) -> Vec<E> {
        self.receiver.try_iter().collect()
    }

    /// Drop everything queued so far
    pub fn clear(&self) -> usize {
        self.receiver.try_iter().count()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<E: Event> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel").field("pending", &self.len()).finish()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{Event, EventBus, EventChannel, Priority, SubscriberId};
}
