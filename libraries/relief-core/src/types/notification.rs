/// Notification payload types
///
/// These describe what the presenter asks the platform to render. They are
/// plain data; the rendering rules live in `relief-notification`.
use serde::{Deserialize, Serialize};
use std::fmt;

use super::playback::PlaybackStatus;

/// Identifier the platform returns for a presented notification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Button the user can tap on the rendered notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationAction {
    Play,
    Pause,
    Stop,
}

impl NotificationAction {
    /// Action identifier registered with the platform
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
        }
    }

    /// Parse an action identifier delivered by the platform
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "play" => Some(Self::Play),
            "pause" => Some(Self::Pause),
            "stop" => Some(Self::Stop),
            _ => None,
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Pause => "Pause",
            Self::Stop => "Stop",
        }
    }
}

impl fmt::Display for NotificationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Machine-readable data attached to the notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub remaining_seconds: u32,
    pub playback_state: PlaybackStatus,
    pub duration_setting: u32,
    /// Elapsed fraction, `[0, 1]`
    pub progress: f64,
}

/// Determinate progress bar shown on Android
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressBar {
    pub max: u32,
    pub current: u32,
    pub indeterminate: bool,
}

/// Android-only presentation metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidExtras {
    pub channel_id: String,
    pub category: String,
    /// Ongoing notifications cannot be swiped away
    pub ongoing: bool,
    pub low_priority: bool,
    pub progress: ProgressBar,
    pub actions: Vec<NotificationAction>,
}

/// Everything the platform needs to render one notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub subtitle: String,
    pub data: NotificationData,
    pub sticky: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidExtras>,
}

impl NotificationContent {
    /// JSON payload for bridges that take untyped notification content
    pub fn to_payload(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
