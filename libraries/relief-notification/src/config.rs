//! Presenter configuration

use serde::{Deserialize, Serialize};

/// Target platform, which decides the presentation metadata attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Android,
    Ios,
    /// Anything else (desktop shells, tests)
    Other,
}

impl Platform {
    /// Parse a platform name as given on the command line or in config
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "android" => Some(Self::Android),
            "ios" => Some(Self::Ios),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Notification presenter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Notification title (default: "Tinnitus Relief Therapy")
    #[serde(default = "default_title")]
    pub title: String,

    /// Android channel identifier (default: "tinnitus-player")
    #[serde(default = "default_channel_id")]
    pub channel_id: String,

    /// Android channel name shown in system settings
    #[serde(default = "default_channel_name")]
    pub channel_name: String,

    /// Android notification category (default: "media")
    #[serde(default = "default_category")]
    pub category: String,

    /// Platform to render for
    #[serde(default)]
    pub platform: Platform,
}

fn default_title() -> String {
    "Tinnitus Relief Therapy".to_string()
}

fn default_channel_id() -> String {
    "tinnitus-player".to_string()
}

fn default_channel_name() -> String {
    "Tinnitus Relief Player".to_string()
}

fn default_category() -> String {
    "media".to_string()
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            channel_id: default_channel_id(),
            channel_name: default_channel_name(),
            category: default_category(),
            platform: Platform::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NotificationConfig::default();
        assert_eq!(config.channel_id, "tinnitus-player");
        assert_eq!(config.category, "media");
        assert_eq!(config.platform, Platform::Android);
    }

    #[test]
    fn platform_names_are_case_insensitive() {
        assert_eq!(Platform::from_str("iOS"), Some(Platform::Ios));
        assert_eq!(Platform::from_str("ANDROID"), Some(Platform::Android));
        assert_eq!(Platform::from_str("web"), None);
    }
}
