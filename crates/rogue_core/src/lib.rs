//! # rogue_core - Rogue Core
//!
//! Foundational primitives shared by every gameplay crate:
//! - **Ids**: stable entity identifiers and a generator
//! - **Errors**: the shared error type and `Result` alias
//! - **Timers**: frame-driven timers keyed by id, where re-arming an id
//!   replaces its pending deadline
//!
//! Gameplay runs on a single thread with a fixed tick order, so nothing in
//! here locks.

pub mod error;
pub mod id;
pub mod timer;

pub use error::*;
pub use id::*;
pub use timer::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{CoreError, Result};
    pub use crate::id::{EntityId, IdGenerator};
    pub use crate::timer::{TimerHandle, TimerManager};
}
