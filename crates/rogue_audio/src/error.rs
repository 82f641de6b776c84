//! Audio errors

use rogue_gamestate::SaveError;
use thiserror::Error;

/// Audio error types
#[derive(Debug, Error)]
pub enum AudioError {
    /// Failed to initialize audio device
    #[error("Failed to initialize audio device: {0}")]
    DeviceInit(String),
    /// Failed to decode audio data
    #[error("Failed to load audio: {0}")]
    LoadError(String),
    /// Audio file not found
    #[error("Audio file not found: {0}")]
    FileNotFound(String),
    /// Invalid handle
    #[error("Invalid sound handle")]
    InvalidHandle,
    /// Persisting user settings failed
    #[error(transparent)]
    Settings(#[from] SaveError),
}

/// Result type for audio operations
pub type Result<T> = std::result::Result<T, AudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_error_display() {
        let err = AudioError::FileNotFound("level1.ogg".to_string());
        assert!(err.to_string().contains("level1.ogg"));
    }
}
