/// Playback session types shared by the player, the notification presenter and the UI
use serde::{Deserialize, Serialize};
use std::fmt;

/// Audio + countdown status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// Stopped, countdown reset to the full duration
    #[default]
    Idle,

    /// Audio playing and countdown ticking
    Playing,

    /// Audio paused mid-session, countdown frozen
    Paused,
}

impl PlaybackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the app's UI is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppVisibility {
    #[default]
    Foreground,
    Background,
}

/// Raw app state as reported by the operating system
///
/// `Inactive` is the transitional state some platforms report while the app
/// is being switched away from; it counts as background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppState {
    Active,
    Inactive,
    Background,
}

impl AppState {
    /// Parse the platform's state name
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "background" => Some(Self::Background),
            _ => None,
        }
    }
}

impl From<AppState> for AppVisibility {
    fn from(state: AppState) -> Self {
        match state {
            AppState::Active => AppVisibility::Foreground,
            AppState::Inactive | AppState::Background => AppVisibility::Background,
        }
    }
}

/// Read-only view of a playback session
///
/// Built by the player after every state change and handed to the UI and
/// the notification presenter; neither keeps its own copy of these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Seconds left on the countdown
    pub remaining_seconds: u32,

    /// Current playback status
    pub status: PlaybackStatus,

    /// Configured session length in minutes
    pub duration_minutes: u32,

    /// False once the sound failed to load; play stays disabled
    pub audio_available: bool,

    /// Last visibility reported by the lifecycle observer
    pub visibility: AppVisibility,
}

impl SessionSnapshot {
    /// Snapshot of a fresh, stopped session
    pub fn idle(duration_minutes: u32) -> Self {
        Self {
            remaining_seconds: duration_minutes * 60,
            status: PlaybackStatus::Idle,
            duration_minutes,
            audio_available: true,
            visibility: AppVisibility::Foreground,
        }
    }

    /// Full session length in seconds
    pub fn total_seconds(&self) -> u32 {
        self.duration_minutes * 60
    }

    /// Seconds already played
    pub fn elapsed_seconds(&self) -> u32 {
        self.total_seconds().saturating_sub(self.remaining_seconds)
    }

    /// Fraction of the session played, clamped to `[0, 1]`
    pub fn progress(&self) -> f64 {
        let total = self.total_seconds();
        if total == 0 {
            return 0.0;
        }
        let elapsed = f64::from(total) - f64::from(self.remaining_seconds);
        (elapsed / f64::from(total)).clamp(0.0, 1.0)
    }

    /// A session is in progress while playing or paused part-way through
    pub fn is_in_progress(&self) -> bool {
        self.status.is_playing() || self.remaining_seconds < self.total_seconds()
    }

    /// Play button enabled
    pub fn can_play(&self) -> bool {
        self.audio_available && !self.status.is_playing()
    }

    /// Pause control enabled
    pub fn can_pause(&self) -> bool {
        self.audio_available && self.status.is_playing()
    }

    /// Stop button enabled
    pub fn can_stop(&self) -> bool {
        self.audio_available && self.status != PlaybackStatus::Idle
    }

    /// Duration slider enabled
    pub fn can_change_duration(&self) -> bool {
        self.status == PlaybackStatus::Idle
    }

    /// Countdown as `m:ss`
    pub fn formatted_remaining(&self) -> String {
        format_time(self.remaining_seconds)
    }
}

/// Format seconds as `m:ss` (minutes are not wrapped into hours)
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
