//! Player commands
//!
//! Every input channel (in-app buttons, notification taps, lifecycle events)
//! is expressed as a `PlayerCommand` so they all reach the same transitions.

use relief_core::{AppState, NotificationAction};
use serde::{Deserialize, Serialize};

/// Commands accepted by the playback controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Start, or resume when paused
    Play,

    /// Pause playback
    Pause,

    /// Stop and reset the countdown
    Stop,

    /// The in-app play/pause button
    TogglePlayback,

    /// Change session length (minutes); only while idle
    SetDuration(u32),

    /// The operating system reported a new app state
    AppState(AppState),

    /// Tear the session down
    Shutdown,
}

impl From<NotificationAction> for PlayerCommand {
    fn from(action: NotificationAction) -> Self {
        match action {
            NotificationAction::Play => PlayerCommand::Play,
            NotificationAction::Pause => PlayerCommand::Pause,
            NotificationAction::Stop => PlayerCommand::Stop,
        }
    }
}

impl From<AppState> for PlayerCommand {
    fn from(state: AppState) -> Self {
        PlayerCommand::AppState(state)
    }
}
