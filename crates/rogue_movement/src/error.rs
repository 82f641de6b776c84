//! Movement errors

use thiserror::Error;

/// Movement errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MovementError {
    /// A tuning value is outside its allowed range
    #[error("invalid movement config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Result type for movement operations
pub type Result<T> = std::result::Result<T, MovementError>;
