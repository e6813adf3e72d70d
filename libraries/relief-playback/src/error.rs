//! Error types for playback control

use relief_core::{AudioOperation, PlaybackStatus, ReliefError};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The sound failed to load at startup; play stays disabled
    #[error("Audio unavailable: the sound could not be loaded")]
    AudioUnavailable,

    /// A single audio call failed; state was left as it was before the call
    #[error("Audio {operation} failed: {message}")]
    AudioOperation {
        operation: AudioOperation,
        message: String,
    },

    /// Duration can only be changed while stopped
    #[error("Duration cannot change while {status}")]
    DurationLocked { status: PlaybackStatus },

    /// Duration outside the configured range or off-step
    #[error("Invalid duration {minutes} min (allowed {min}-{max} in steps of {step})")]
    InvalidDuration {
        minutes: u32,
        min: u32,
        max: u32,
        step: u32,
    },

    /// Configuration rejected by `PlayerConfig::validate`
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The player task is gone
    #[error("Player closed")]
    PlayerClosed,

    /// The command queue is full; the command was dropped
    #[error("Player busy")]
    PlayerBusy,

    /// The controller was torn down
    #[error("Player shut down")]
    ShutDown,
}

impl PlaybackError {
    /// Build from a collaborator error raised during `operation`
    pub fn audio(operation: AudioOperation, err: ReliefError) -> Self {
        match err {
            ReliefError::AudioOperation { operation, message } => {
                Self::AudioOperation { operation, message }
            }
            other => Self::AudioOperation {
                operation,
                message: other.to_string(),
            },
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_keeps_engine_operation_label() {
        let err = PlaybackError::audio(
            AudioOperation::Play,
            ReliefError::audio_operation(AudioOperation::Play, "device lost"),
        );
        assert_eq!(err.to_string(), "Audio play failed: device lost");
    }

    #[test]
    fn audio_wraps_foreign_errors() {
        let err = PlaybackError::audio(AudioOperation::Stop, ReliefError::Other("boom".into()));
        assert!(matches!(
            err,
            PlaybackError::AudioOperation {
                operation: AudioOperation::Stop,
                ..
            }
        ));
    }
}
