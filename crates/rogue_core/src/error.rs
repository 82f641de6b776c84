//! Error types for the core library

use thiserror::Error;

use crate::id::EntityId;

/// The core error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A referenced entity does not exist in the world
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),
    /// A required collaborator was not registered
    #[error("missing dependency: {0}")]
    MissingDependency(&'static str),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CoreError>;
