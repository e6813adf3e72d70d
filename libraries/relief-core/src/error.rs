/// Core error types for Relief Player
use thiserror::Error;

use crate::types::AudioOperation;

/// Result type alias using `ReliefError`
pub type Result<T> = std::result::Result<T, ReliefError>;

/// Core error type for Relief Player
///
/// Collaborators (audio engine, notification backend, identity provider)
/// report their failures with this type; the playback and notification
/// crates translate them into their own taxonomies at the boundary.
#[derive(Error, Debug)]
pub enum ReliefError {
    /// The sound asset could not be loaded
    #[error("Audio load failed: {0}")]
    AudioLoad(String),

    /// A play/pause/stop/unload call on a loaded sound failed
    #[error("Audio {operation} failed: {message}")]
    AudioOperation {
        operation: AudioOperation,
        message: String,
    },

    /// The notification system refused or failed a request
    #[error("Notification error: {0}")]
    Notification(String),

    /// The identity provider rejected or aborted the login
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The user dismissed the login prompt
    #[error("Authentication cancelled")]
    AuthCancelled,

    /// Keep-awake could not be acquired
    #[error("Wake lock error: {0}")]
    WakeLock(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl ReliefError {
    /// Create an audio load error
    pub fn audio_load(msg: impl Into<String>) -> Self {
        Self::AudioLoad(msg.into())
    }

    /// Create an audio operation error
    pub fn audio_operation(operation: AudioOperation, msg: impl Into<String>) -> Self {
        Self::AudioOperation {
            operation,
            message: msg.into(),
        }
    }

    /// Create a notification error
    pub fn notification(msg: impl Into<String>) -> Self {
        Self::Notification(msg.into())
    }

    /// Create an authentication error
    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::AuthFailed(msg.into())
    }

    /// Create a wake lock error
    pub fn wake_lock(msg: impl Into<String>) -> Self {
        Self::WakeLock(msg.into())
    }

    /// Whether the user can reasonably retry the same action
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::AudioOperation { .. } | Self::AuthFailed(_) | Self::AuthCancelled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_operation_message_names_the_operation() {
        let err = ReliefError::audio_operation(AudioOperation::Pause, "engine busy");
        assert_eq!(err.to_string(), "Audio pause failed: engine busy");
    }

    #[test]
    fn load_failures_are_not_retryable() {
        assert!(!ReliefError::audio_load("missing asset").is_retryable());
        assert!(ReliefError::audio_operation(AudioOperation::Play, "x").is_retryable());
        assert!(ReliefError::auth_failed("denied").is_retryable());
        assert!(!ReliefError::wake_lock("no power manager").is_retryable());
    }
}
