/// Console configuration
use crate::error::{ConsoleError, Result};
use relief_notification::NotificationConfig;
use relief_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "relief.toml";

/// Environment prefix; nested keys are separated by `__`
/// (e.g. `RELIEF_PLAYER__DEFAULT_DURATION_MINUTES=45`)
pub const ENV_PREFIX: &str = "RELIEF";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub notification: NotificationConfig,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// Knobs for the simulated platform collaborators
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Make the sound fail to load, to exercise the disabled-player path
    #[serde(default)]
    pub fail_audio_load: bool,

    /// Time each simulated audio call takes to settle
    #[serde(default = "default_audio_latency_ms")]
    pub audio_latency_ms: u64,

    /// Answer to the notification permission prompt
    #[serde(default = "default_grant_notifications")]
    pub grant_notifications: bool,
}

fn default_audio_latency_ms() -> u64 {
    20
}

fn default_grant_notifications() -> bool {
    true
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            fail_audio_load: false,
            audio_latency_ms: default_audio_latency_ms(),
            grant_notifications: default_grant_notifications(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `relief.toml` is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConsoleError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with RELIEF_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.player
            .validate()
            .map_err(|e| ConsoleError::Config(e.to_string()))?;

        if self.notification.channel_id.trim().is_empty() {
            return Err(ConsoleError::Config(
                "notification.channel_id must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_notification::Platform;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ConsoleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.player.default_duration_minutes, 30);
        assert_eq!(config.notification.channel_id, "tinnitus-player");
        assert!(!config.simulation.fail_audio_load);
    }

    #[test]
    fn loads_partial_file_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[player]
default_duration_minutes = 45

[notification]
platform = "ios"

[simulation]
fail_audio_load = true
"#
        )
        .unwrap();

        let config = ConsoleConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.player.default_duration_minutes, 45);
        assert_eq!(config.player.max_duration_minutes, 120);
        assert_eq!(config.notification.platform, Platform::Ios);
        assert_eq!(config.notification.title, "Tinnitus Relief Therapy");
        assert!(config.simulation.fail_audio_load);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = ConsoleConfig::load(Some(Path::new("/nonexistent/relief.toml")));
        assert!(matches!(result, Err(ConsoleError::Config(_))));
    }

    #[test]
    fn validate_rejects_off_step_default() {
        let mut config = ConsoleConfig::default();
        config.player.default_duration_minutes = 32;
        assert!(matches!(config.validate(), Err(ConsoleError::Config(_))));
    }
}
