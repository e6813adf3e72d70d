//! Player Events
//!
//! Event-based communication for UI synchronization. Events are emitted at
//! key points:
//! - State changes (play/pause/stop, duration changes, visibility)
//! - Countdown ticks
//! - Natural expiry
//! - One-shot notices the UI should surface to the user

use relief_core::{AudioOperation, SessionSnapshot};
use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Status, duration or visibility changed
    StateChanged {
        /// The session after the change
        snapshot: SessionSnapshot,
    },

    /// Countdown advanced while playing
    Tick {
        /// Seconds left
        remaining_seconds: u32,
    },

    /// Countdown reached zero; the session is idle again
    Expired,

    /// Something the user should be told about once
    Notice(UserNotice),

    /// The controller was torn down
    ShutDown,
}

/// User-visible message for a failure caught at a boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserNotice {
    /// The sound could not be loaded; playback is disabled for this session
    AudioLoadFailed {
        /// Engine error text
        message: String,
    },

    /// A play/pause/stop call failed; nothing changed, the user may retry
    PlaybackFailed {
        /// The failed call
        operation: AudioOperation,
        /// Engine error text
        message: String,
    },

    /// The background notification could not be shown
    NotificationFailed {
        /// Backend error text
        message: String,
    },
}

impl UserNotice {
    /// Alert title
    pub fn title(&self) -> &'static str {
        match self {
            Self::AudioLoadFailed { .. } => "Sound failed to load",
            Self::PlaybackFailed { .. } => "Playback error",
            Self::NotificationFailed { .. } => "Notification unavailable",
        }
    }

    /// Alert body
    pub fn body(&self) -> &'static str {
        match self {
            Self::AudioLoadFailed { .. } => "Please check the sound file.",
            Self::PlaybackFailed { .. } => {
                "A problem occurred during audio playback. Please try again."
            }
            Self::NotificationFailed { .. } => {
                "Playback continues, but controls will not appear in the notification."
            }
        }
    }
}
